use crate::{
    animation::timeline::Timeline,
    config::model::{ExpansionConfig, ProgressPolicy},
    foundation::{
        core::Millis,
        math::{PROGRESS_EPSILON, clamp_unit},
    },
    lock::scroll_lock::LockReason,
    page::surface::{Element, Fade, Page},
    reveal::viewport::TriggerGeometry,
    runtime::{
        Runtime,
        listeners::{EventKind, Owner},
        scheduler::{Task, TimerId},
    },
};

/// Rendered progress this close to the committed value snaps to it.
const SCRUB_SNAP: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionState {
    Idle,
    Tracking,
    /// Page hidden mid-expansion; listeners are detached, the lock is kept.
    Suspended,
    Complete,
}

/// Outcome of feeding a gesture delta to the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExpansionUpdate {
    Ignored,
    Progressed(f64),
    /// Progress reached 1; reported once.
    Completed,
}

/// Maps scroll gestures onto the staged frame expansion.
///
/// Completion is distance based: the frame is full-screen once the
/// accumulated gesture distance covers the scroll budget, regardless of how
/// long that takes.
#[derive(Debug)]
pub struct ExpansionController {
    config: ExpansionConfig,
    timeline: Timeline,
    state: ExpansionState,
    progress: f64,
    rendered: f64,
    budget: f64,
    last_offset: f64,
    touch_anchor: Option<f64>,
    scrub_timer: Option<TimerId>,
    last_frame_at: Millis,
    completions: u32,
}

impl ExpansionController {
    pub const LISTENS: [EventKind; 4] = [
        EventKind::Scroll,
        EventKind::Wheel,
        EventKind::TouchStart,
        EventKind::TouchMove,
    ];

    pub fn new(config: &ExpansionConfig) -> Self {
        Self {
            config: *config,
            timeline: Timeline::expansion(&config.frame),
            state: ExpansionState::Idle,
            progress: 0.0,
            rendered: 0.0,
            budget: 1.0,
            last_offset: 0.0,
            touch_anchor: None,
            scrub_timer: None,
            last_frame_at: Millis::ZERO,
            completions: 0,
        }
    }

    /// Set the frame to its minimum bound, take the lock and start listening.
    ///
    /// Returns `false` on the direct path (expansion disabled or no frame
    /// element); the controller is then already complete and holds nothing.
    pub fn initialize<P: Page>(&mut self, geometry: TriggerGeometry, rt: &mut Runtime<P>) -> bool {
        match self.state {
            ExpansionState::Idle => {}
            ExpansionState::Tracking | ExpansionState::Suspended => return true,
            ExpansionState::Complete => return false,
        }
        if !self.config.enabled || !rt.page.is_mounted(Element::Frame) {
            tracing::debug!(
                enabled = self.config.enabled,
                "expansion skipped; revealing content directly"
            );
            self.state = ExpansionState::Complete;
            self.reveal_content(rt);
            return false;
        }

        self.progress = 0.0;
        self.rendered = 0.0;
        self.touch_anchor = None;
        self.set_budget(geometry);
        self.last_offset = rt.page.scroll_offset();
        rt.page.apply_frame(&self.timeline.sample(0.0));
        let now = rt.sched.now();
        rt.lock.acquire(LockReason::Expansion, now, &mut rt.page);
        rt.listeners.replace_owner(Owner::Expansion, &Self::LISTENS);
        self.state = ExpansionState::Tracking;
        tracing::debug!(budget = self.budget, "expansion tracking");
        true
    }

    /// Progress is kept; only the distance still to cover changes.
    pub fn set_budget(&mut self, geometry: TriggerGeometry) {
        self.budget = geometry.scroll_budget;
    }

    pub fn on_scroll<P: Page>(&mut self, offset: f64, rt: &mut Runtime<P>) -> ExpansionUpdate {
        if self.state != ExpansionState::Tracking || !offset.is_finite() {
            return ExpansionUpdate::Ignored;
        }
        let update = self.advance_by(offset - self.last_offset, rt);
        self.pin(rt);
        update
    }

    pub fn on_wheel<P: Page>(&mut self, delta_y: f64, rt: &mut Runtime<P>) -> ExpansionUpdate {
        if self.state != ExpansionState::Tracking {
            return ExpansionUpdate::Ignored;
        }
        let update = self.advance_by(delta_y, rt);
        self.pin(rt);
        update
    }

    pub fn on_touch_start(&mut self, y: f64) {
        if self.state == ExpansionState::Tracking && y.is_finite() {
            self.touch_anchor = Some(y);
        }
    }

    /// Finger moving up scrolls down.
    pub fn on_touch_move<P: Page>(&mut self, y: f64, rt: &mut Runtime<P>) -> ExpansionUpdate {
        if self.state != ExpansionState::Tracking || !y.is_finite() {
            return ExpansionUpdate::Ignored;
        }
        let Some(anchor) = self.touch_anchor.replace(y) else {
            return ExpansionUpdate::Ignored;
        };
        let update = self.advance_by(anchor - y, rt);
        self.pin(rt);
        update
    }

    /// Hold the native offset while the frame is still growing.
    fn pin<P: Page>(&self, rt: &mut Runtime<P>) {
        if self.state == ExpansionState::Tracking && rt.page.scroll_offset() != self.last_offset {
            rt.page.scroll_to(self.last_offset);
        }
    }

    fn advance_by<P: Page>(&mut self, delta: f64, rt: &mut Runtime<P>) -> ExpansionUpdate {
        if !delta.is_finite() || delta == 0.0 {
            return ExpansionUpdate::Ignored;
        }
        let increment = delta / self.budget;
        if increment < 0.0 && self.config.policy == ProgressPolicy::Accumulate {
            return ExpansionUpdate::Ignored;
        }
        let next = clamp_unit(self.progress + increment);
        if next == self.progress {
            return ExpansionUpdate::Ignored;
        }
        if next >= 1.0 - PROGRESS_EPSILON {
            self.progress = 1.0;
            self.complete(rt);
            return ExpansionUpdate::Completed;
        }
        self.progress = next;
        tracing::trace!(progress = next, delta, "expansion progressed");
        self.render(rt);
        ExpansionUpdate::Progressed(next)
    }

    fn render<P: Page>(&mut self, rt: &mut Runtime<P>) {
        if self.config.scrub_ms == 0 {
            self.rendered = self.progress;
            rt.page.apply_frame(&self.timeline.sample(self.rendered));
            return;
        }
        if self.scrub_timer.is_none() {
            self.last_frame_at = rt.sched.now();
            self.scrub_timer = Some(
                rt.sched
                    .after(self.config.frame_interval_ms, Task::ScrubFrame),
            );
        }
    }

    /// One smoothing step of the rendered frame towards committed progress.
    pub fn on_scrub_frame<P: Page>(&mut self, rt: &mut Runtime<P>) -> Option<f64> {
        self.scrub_timer = None;
        if self.state != ExpansionState::Tracking {
            return None;
        }
        let now = rt.sched.now();
        let dt = now.since(self.last_frame_at) as f64;
        self.last_frame_at = now;
        let alpha = (dt / self.config.scrub_ms as f64).min(1.0);
        self.rendered += (self.progress - self.rendered) * alpha;
        if (self.progress - self.rendered).abs() < SCRUB_SNAP {
            self.rendered = self.progress;
        }
        rt.page.apply_frame(&self.timeline.sample(self.rendered));
        if self.rendered != self.progress {
            self.render(rt);
        }
        Some(self.rendered)
    }

    fn complete<P: Page>(&mut self, rt: &mut Runtime<P>) {
        self.state = ExpansionState::Complete;
        self.cancel_scrub(rt);
        self.touch_anchor = None;
        self.rendered = 1.0;
        rt.page.apply_frame(&self.timeline.sample(1.0));
        rt.listeners.remove_owner(Owner::Expansion);
        rt.lock.release(&mut rt.page);
        self.reveal_content(rt);
        self.completions += 1;
        tracing::debug!("expansion complete");
    }

    fn reveal_content<P: Page>(&self, rt: &mut Runtime<P>) {
        if rt.page.is_mounted(Element::Content) {
            rt.page
                .fade(Element::Content, Fade::reveal(self.config.reveal_fade_ms));
        }
    }

    fn cancel_scrub<P: Page>(&mut self, rt: &mut Runtime<P>) {
        if let Some(id) = self.scrub_timer.take() {
            rt.sched.cancel(id);
        }
    }

    /// Page hidden: drop listeners so a later show starts from a clean slate.
    pub fn suspend<P: Page>(&mut self, rt: &mut Runtime<P>) -> bool {
        if self.state != ExpansionState::Tracking {
            return false;
        }
        rt.listeners.remove_owner(Owner::Expansion);
        self.cancel_scrub(rt);
        self.touch_anchor = None;
        self.state = ExpansionState::Suspended;
        tracing::debug!(progress = self.progress, "expansion suspended");
        true
    }

    /// Page shown again: rebuild listeners against fresh geometry and offset.
    pub fn resume<P: Page>(&mut self, geometry: TriggerGeometry, rt: &mut Runtime<P>) -> bool {
        if self.state != ExpansionState::Suspended {
            return false;
        }
        self.set_budget(geometry);
        self.last_offset = rt.page.scroll_offset();
        rt.listeners.replace_owner(Owner::Expansion, &Self::LISTENS);
        self.rendered = self.progress;
        rt.page.apply_frame(&self.timeline.sample(self.rendered));
        self.state = ExpansionState::Tracking;
        tracing::debug!(progress = self.progress, "expansion resumed");
        true
    }

    /// Detach everything this controller registered or holds.
    pub fn teardown<P: Page>(&mut self, rt: &mut Runtime<P>) {
        rt.listeners.remove_owner(Owner::Expansion);
        self.cancel_scrub(rt);
        if rt
            .lock
            .token()
            .is_some_and(|t| t.reason == LockReason::Expansion)
        {
            rt.lock.release(&mut rt.page);
        }
    }

    pub fn reset(&mut self) {
        self.state = ExpansionState::Idle;
        self.progress = 0.0;
        self.rendered = 0.0;
        self.touch_anchor = None;
        self.scrub_timer = None;
        self.completions = 0;
    }

    pub fn state(&self) -> ExpansionState {
        self.state
    }

    /// Committed progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress currently shown on the frame; lags `progress` when scrubbing.
    pub fn rendered(&self) -> f64 {
        self.rendered
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn completions(&self) -> u32 {
        self.completions
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/expansion.rs"]
mod tests;
