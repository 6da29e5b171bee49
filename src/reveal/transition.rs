use crate::{
    config::model::TransitionConfig,
    page::surface::{Element, Fade, Page},
    runtime::{
        Runtime,
        scheduler::{Task, TimerId},
    },
};

/// Where the sequencer is between dismissal and content-ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStage {
    Idle,
    OverlayFading,
    HandoffPending,
    AwaitingMount,
    CurtainFading,
    Done,
}

/// Milestones reached by one sequencer step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    pub loading_complete: bool,
    pub content_ready: bool,
    /// Elements whose effect was skipped because they were not mounted.
    pub skipped_overlay: bool,
    pub skipped_curtain: bool,
}

/// Fades the loading overlay out and the content in.
///
/// Stages: overlay fade → handoff delay → `loading_complete` → wait for the
/// shell to mount content → curtain fade → content ready. A missing overlay
/// or curtain skips straight past its fade.
#[derive(Debug)]
pub struct TransitionSequencer {
    config: TransitionConfig,
    stage: TransitionStage,
    mounted: bool,
    first_activation_done: bool,
    timer: Option<TimerId>,
}

impl TransitionSequencer {
    pub fn new(config: &TransitionConfig) -> Self {
        Self {
            config: *config,
            stage: TransitionStage::Idle,
            mounted: false,
            first_activation_done: false,
            timer: None,
        }
    }

    fn schedule<P: Page>(&mut self, rt: &mut Runtime<P>, delay_ms: u64, task: Task) {
        if let Some(id) = self.timer.take() {
            rt.sched.cancel(id);
        }
        self.timer = Some(rt.sched.after(delay_ms, task));
    }

    /// Dismissal fired.
    pub fn begin<P: Page>(&mut self, rt: &mut Runtime<P>) -> Signals {
        if self.stage != TransitionStage::Idle {
            return Signals::default();
        }
        if !rt.page.is_mounted(Element::LoadingOverlay) {
            tracing::warn!("loading overlay missing; skipping fade");
            let mut signals = self.handoff(rt);
            signals.skipped_overlay = true;
            return signals;
        }
        if rt.page.is_mounted(Element::ScrollPrompt) {
            rt.page
                .fade(Element::ScrollPrompt, Fade::out(self.config.prompt_fade_ms));
        }
        rt.page
            .fade(Element::LoadingOverlay, Fade::out(self.config.overlay_fade_ms));
        self.stage = TransitionStage::OverlayFading;
        self.schedule(rt, self.config.overlay_fade_ms, Task::OverlayFaded);
        Signals::default()
    }

    pub fn on_overlay_faded<P: Page>(&mut self, rt: &mut Runtime<P>) -> Signals {
        self.timer = None;
        if self.stage == TransitionStage::OverlayFading {
            self.stage = TransitionStage::HandoffPending;
            self.schedule(rt, self.config.handoff_delay_ms, Task::Handoff);
        }
        Signals::default()
    }

    pub fn on_handoff<P: Page>(&mut self, rt: &mut Runtime<P>) -> Signals {
        self.timer = None;
        if self.stage != TransitionStage::HandoffPending {
            return Signals::default();
        }
        self.handoff(rt)
    }

    fn handoff<P: Page>(&mut self, rt: &mut Runtime<P>) -> Signals {
        self.stage = TransitionStage::AwaitingMount;
        let mut signals = if self.mounted {
            self.start_curtain(rt)
        } else {
            self.schedule(rt, self.config.mount_timeout_ms, Task::MountTimeout);
            Signals::default()
        };
        signals.loading_complete = true;
        signals
    }

    /// The page shell rendered the content tree. May arrive before handoff.
    pub fn on_content_mounted<P: Page>(&mut self, rt: &mut Runtime<P>) -> Signals {
        if self.mounted {
            return Signals::default();
        }
        self.mounted = true;
        if self.stage == TransitionStage::AwaitingMount {
            return self.start_curtain(rt);
        }
        Signals::default()
    }

    pub fn on_mount_timeout<P: Page>(&mut self, rt: &mut Runtime<P>) -> Signals {
        self.timer = None;
        if self.stage != TransitionStage::AwaitingMount {
            return Signals::default();
        }
        tracing::warn!(
            timeout_ms = self.config.mount_timeout_ms,
            "content mount signal missing; proceeding"
        );
        self.start_curtain(rt)
    }

    fn start_curtain<P: Page>(&mut self, rt: &mut Runtime<P>) -> Signals {
        if let Some(id) = self.timer.take() {
            rt.sched.cancel(id);
        }
        if !rt.page.is_mounted(Element::Curtain) {
            let mut signals = self.finish(rt);
            signals.skipped_curtain = true;
            return signals;
        }
        rt.page
            .fade(Element::Curtain, Fade::out(self.config.curtain_fade_ms));
        self.stage = TransitionStage::CurtainFading;
        self.schedule(rt, self.config.curtain_fade_ms, Task::CurtainFaded);
        Signals::default()
    }

    pub fn on_curtain_faded<P: Page>(&mut self, rt: &mut Runtime<P>) -> Signals {
        self.timer = None;
        if self.stage != TransitionStage::CurtainFading {
            return Signals::default();
        }
        self.finish(rt)
    }

    fn finish<P: Page>(&mut self, rt: &mut Runtime<P>) -> Signals {
        self.stage = TransitionStage::Done;
        rt.lock.release(&mut rt.page);
        if !self.first_activation_done {
            self.first_activation_done = true;
            rt.page.set_smooth_scroll(true);
            tracing::debug!("smooth scrolling enabled");
        }
        Signals {
            content_ready: true,
            ..Signals::default()
        }
    }

    pub fn teardown<P: Page>(&mut self, rt: &mut Runtime<P>) {
        if let Some(id) = self.timer.take() {
            rt.sched.cancel(id);
        }
    }

    /// Page reinitialization; first activation is remembered.
    pub fn reset(&mut self) {
        self.stage = TransitionStage::Idle;
        self.mounted = false;
        self.timer = None;
    }

    pub fn stage(&self) -> TransitionStage {
        self.stage
    }

    pub fn is_content_mounted(&self) -> bool {
        self.mounted
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/transition.rs"]
mod tests;
