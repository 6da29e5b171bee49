use crate::{
    config::model::RevealConfig,
    foundation::{core::Millis, error::RevealResult},
    loading::{
        dismissal::{DismissReason, DismissalGate, DismissalState},
        hint::HintLatch,
        phase_timer::{PhaseTimer, Tick},
    },
    lock::scroll_lock::{LockReason, ScrollLock},
    page::surface::{Element, Fade, Page},
    reveal::{
        event::{InputEvent, Phase, RevealEvent},
        expansion::{ExpansionController, ExpansionState, ExpansionUpdate},
        transition::{Signals, TransitionSequencer, TransitionStage},
        viewport::{TriggerGeometry, ViewportSync},
    },
    runtime::{
        Runtime,
        listeners::{EventKind, Listeners, Owner},
        scheduler::Task,
    },
};

type LoadingCallback = Box<dyn FnOnce()>;

/// Scroll-gated progressive reveal of a page.
///
/// Drives the page through `Loading → TransitioningOut → Expanding → Ready`.
/// The host feeds it a monotonic clock, raw input events and the
/// content-mounted signal; every visual effect goes through [`Page`].
///
/// Dropping the controller tears it down, which always leaves the page
/// scrollable.
pub struct Reveal<P: Page> {
    config: RevealConfig,
    rt: Runtime<P>,
    phase: Phase,
    started: bool,
    torn_down: bool,
    timer: PhaseTimer,
    gate: DismissalGate,
    hint: HintLatch,
    seq: TransitionSequencer,
    expansion: ExpansionController,
    viewport: ViewportSync,
    events: Vec<RevealEvent>,
    on_loading_complete: Option<LoadingCallback>,
    loading_completions: u32,
}

impl<P: Page> Reveal<P> {
    pub fn new(config: RevealConfig, page: P) -> RevealResult<Self> {
        config.validate()?;
        Ok(Self {
            timer: PhaseTimer::from_config(&config.loading),
            gate: DismissalGate::new(&config.dismiss),
            hint: HintLatch::new(),
            seq: TransitionSequencer::new(&config.transition),
            expansion: ExpansionController::new(&config.expansion),
            viewport: ViewportSync::new(&config.viewport, config.expansion.budget_fraction),
            rt: Runtime::new(page),
            phase: Phase::Loading,
            started: false,
            torn_down: false,
            events: Vec::new(),
            on_loading_complete: None,
            loading_completions: 0,
            config,
        })
    }

    /// Invoked once, when the overlay has faded and the page shell may swap
    /// in the content tree.
    pub fn on_loading_complete(&mut self, f: impl FnOnce() + 'static) {
        self.on_loading_complete = Some(Box::new(f));
    }

    /// Enter `Loading`: scroll to the top, lock scrolling, start the timer.
    pub fn start(&mut self, now: Millis) {
        if self.started {
            return;
        }
        self.started = true;
        self.torn_down = false;
        self.rt.sched.advance_clock(now);

        self.rt.page.scroll_to(0.0);
        self.rt
            .lock
            .acquire(LockReason::Loading, now, &mut self.rt.page);
        self.rt.page.set_loading_progress(0.0);
        self.timer.start(&mut self.rt.sched);

        self.hint.attach(&mut self.rt.listeners);
        self.viewport.attach(&mut self.rt.listeners);
        self.rt
            .listeners
            .add(Owner::Controller, EventKind::Visibility);
        self.gate.attach_early(&mut self.rt.listeners);
        self.viewport.refresh(&self.rt.page);
        tracing::debug!(at = now.0, "reveal started");
    }

    /// Run every task due at or before `now`. Returns how many ran.
    pub fn advance(&mut self, now: Millis) -> usize {
        let mut ran = 0;
        while let Some((_, task)) = self.rt.sched.pop_due(now) {
            self.run_task(task);
            ran += 1;
        }
        self.rt.sched.advance_clock(now);
        ran
    }

    /// Deliver a raw input event. Returns the number of listeners it reached.
    #[tracing::instrument(level = "trace", skip(self), fields(phase = ?self.phase))]
    pub fn handle(&mut self, now: Millis, event: InputEvent) -> usize {
        self.advance(now);
        let kind = event.kind();
        let mut delivered = 0;
        for owner in self.rt.listeners.owners_for(kind) {
            // An earlier owner may have unregistered this one mid-dispatch.
            if !self.rt.listeners.is_listening(owner, kind) {
                continue;
            }
            delivered += 1;
            self.deliver(owner, event);
        }
        delivered
    }

    /// The page shell finished mounting the content tree.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn content_mounted(&mut self, now: Millis) {
        self.advance(now);
        let signals = self.seq.on_content_mounted(&mut self.rt);
        self.apply_signals(signals);
    }

    /// Remove every listener and timer and release the scroll lock.
    /// Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.timer.cancel(&mut self.rt.sched);
        self.gate.teardown(&mut self.rt.listeners, &mut self.rt.sched);
        self.hint.detach(&mut self.rt.listeners);
        self.seq.teardown(&mut self.rt);
        self.expansion.teardown(&mut self.rt);
        self.viewport
            .teardown(&mut self.rt.listeners, &mut self.rt.sched);
        self.rt.listeners.clear();
        self.rt.sched.cancel_all();
        if let Some(token) = self.rt.lock.release(&mut self.rt.page) {
            tracing::debug!(reason = ?token.reason, "scroll lock released by teardown");
        }
        tracing::debug!(phase = ?self.phase, "reveal torn down");
    }

    /// Page reinitialization: reset progress and latches and start over.
    pub fn restart(&mut self, now: Millis) {
        self.teardown();
        self.gate.reset(&mut self.rt.listeners, &mut self.rt.sched);
        self.hint.reset();
        self.seq.reset();
        self.expansion.reset();
        self.viewport.invalidate();
        self.set_phase(Phase::Loading);
        self.started = false;
        self.start(now);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Loading progress in `0..=100`.
    pub fn loading_progress(&self) -> f64 {
        self.timer.progress()
    }

    pub fn expansion_progress(&self) -> f64 {
        self.expansion.progress()
    }

    pub fn expansion_state(&self) -> ExpansionState {
        self.expansion.state()
    }

    pub fn transition_stage(&self) -> TransitionStage {
        self.seq.stage()
    }

    pub fn dismissal(&self) -> DismissalState {
        self.gate.state()
    }

    pub fn lock(&self) -> &ScrollLock {
        &self.rt.lock
    }

    pub fn listeners(&self) -> &Listeners {
        &self.rt.listeners
    }

    pub fn page(&self) -> &P {
        &self.rt.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.rt.page
    }

    pub fn geometry(&self) -> Option<TriggerGeometry> {
        self.viewport.geometry()
    }

    /// A geometry recomputation is scheduled but has not run yet.
    pub fn has_pending_refresh(&self) -> bool {
        self.viewport.has_pending_refresh()
    }

    pub fn now(&self) -> Millis {
        self.rt.sched.now()
    }

    /// Due time of the next scheduled task, if any.
    pub fn next_due(&mut self) -> Option<Millis> {
        self.rt.sched.next_due()
    }

    pub fn events(&self) -> &[RevealEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<RevealEvent> {
        std::mem::take(&mut self.events)
    }

    /// How many times `loading_complete` was signalled.
    pub fn loading_complete_calls(&self) -> u32 {
        self.loading_completions
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        tracing::debug!(?from, ?to, "phase changed");
        self.events.push(RevealEvent::PhaseChanged { from, to });
        if to == Phase::Ready && self.rt.lock.release(&mut self.rt.page).is_some() {
            tracing::warn!("scroll lock still held on entering ready; released");
        }
    }

    fn fade_or_skip(&mut self, element: Element, fade: Fade) {
        if self.rt.page.is_mounted(element) {
            self.rt.page.fade(element, fade);
        } else {
            self.skipped(element);
        }
    }

    fn skipped(&mut self, element: Element) {
        tracing::warn!(?element, "element missing; effect skipped");
        self.events.push(RevealEvent::EffectSkipped { element });
    }

    fn deliver(&mut self, owner: Owner, event: InputEvent) {
        match owner {
            Owner::Hint => {
                if self.hint.on_interaction(&mut self.rt.listeners) {
                    self.fade_or_skip(
                        Element::InteractionHint,
                        Fade::out(self.config.dismiss.hint_fade_ms),
                    );
                    self.events.push(RevealEvent::HintDismissed);
                }
            }
            Owner::Dismissal => {
                let reason = match event {
                    InputEvent::Click => Some(DismissReason::Click),
                    InputEvent::Wheel { .. } => Some(DismissReason::Wheel),
                    InputEvent::TouchMove { .. } => Some(DismissReason::TouchMove),
                    InputEvent::KeyDown => Some(DismissReason::Key),
                    InputEvent::Scroll { offset } => self.gate.scroll_trigger(offset),
                    _ => None,
                };
                if let Some(reason) = reason {
                    self.dismiss(reason);
                }
            }
            Owner::Expansion => {
                let update = match event {
                    InputEvent::Scroll { offset } => self.expansion.on_scroll(offset, &mut self.rt),
                    InputEvent::Wheel { delta_y } => self.expansion.on_wheel(delta_y, &mut self.rt),
                    InputEvent::TouchStart { y } => {
                        self.expansion.on_touch_start(y);
                        ExpansionUpdate::Ignored
                    }
                    InputEvent::TouchMove { y } => self.expansion.on_touch_move(y, &mut self.rt),
                    _ => ExpansionUpdate::Ignored,
                };
                self.on_expansion_update(update);
            }
            Owner::Viewport => self.viewport.on_resize(&mut self.rt.sched),
            Owner::Controller => {
                if let InputEvent::Visibility { visible } = event {
                    self.on_visibility(visible);
                }
            }
        }
    }

    fn dismiss(&mut self, reason: DismissReason) {
        let Some(reason) =
            self.gate
                .request_dismiss(reason, &mut self.rt.listeners, &mut self.rt.sched)
        else {
            return;
        };
        self.timer.cancel(&mut self.rt.sched);
        self.hint.detach(&mut self.rt.listeners);
        self.events.push(RevealEvent::Dismissed { reason });
        self.set_phase(Phase::TransitioningOut);
        let signals = self.seq.begin(&mut self.rt);
        self.apply_signals(signals);
    }

    fn on_visibility(&mut self, visible: bool) {
        if !visible {
            if self.expansion.suspend(&mut self.rt) {
                self.events.push(RevealEvent::ExpansionSuspended);
            }
            return;
        }
        if self.expansion.state() != ExpansionState::Suspended {
            if matches!(self.phase, Phase::Expanding | Phase::Ready) {
                self.viewport.on_content_ready(&mut self.rt.sched);
            }
            return;
        }
        self.viewport.invalidate();
        let geometry = self.viewport.refresh(&self.rt.page);
        self.events.push(RevealEvent::GeometryRefreshed {
            scroll_budget: geometry.scroll_budget,
        });
        if self.expansion.resume(geometry, &mut self.rt) {
            self.events.push(RevealEvent::ExpansionResumed);
        }
    }

    fn on_expansion_update(&mut self, update: ExpansionUpdate) {
        match update {
            ExpansionUpdate::Ignored => {}
            ExpansionUpdate::Progressed(progress) => {
                self.events.push(RevealEvent::ExpansionProgress { progress });
            }
            ExpansionUpdate::Completed => {
                self.events
                    .push(RevealEvent::ExpansionProgress { progress: 1.0 });
                self.events.push(RevealEvent::ExpansionComplete);
                self.set_phase(Phase::Ready);
            }
        }
    }

    fn run_task(&mut self, task: Task) {
        tracing::trace!(?task, at = self.rt.sched.now().0, "task due");
        match task {
            Task::LoadingTick { generation } => {
                match self.timer.on_tick(generation, &mut self.rt.sched) {
                    Tick::Stale => {}
                    Tick::Progress(percent) => {
                        self.rt.page.set_loading_progress(percent);
                        self.events.push(RevealEvent::LoadingProgress { percent });
                    }
                    Tick::Completed => self.loading_finished(),
                }
            }
            Task::DismissTimeout => {
                self.gate.timeout_elapsed();
                self.dismiss(DismissReason::Timeout);
            }
            Task::OverlayFaded => {
                let signals = self.seq.on_overlay_faded(&mut self.rt);
                self.apply_signals(signals);
            }
            Task::Handoff => {
                let signals = self.seq.on_handoff(&mut self.rt);
                self.apply_signals(signals);
            }
            Task::MountTimeout => {
                let signals = self.seq.on_mount_timeout(&mut self.rt);
                self.apply_signals(signals);
            }
            Task::CurtainFaded => {
                let signals = self.seq.on_curtain_faded(&mut self.rt);
                self.apply_signals(signals);
            }
            Task::GeometryRefresh => {
                let geometry = self.viewport.refresh_due(&self.rt.page);
                self.events.push(RevealEvent::GeometryRefreshed {
                    scroll_budget: geometry.scroll_budget,
                });
                if matches!(
                    self.expansion.state(),
                    ExpansionState::Tracking | ExpansionState::Suspended
                ) {
                    self.expansion.set_budget(geometry);
                }
            }
            Task::ScrubFrame => {
                self.expansion.on_scrub_frame(&mut self.rt);
            }
        }
    }

    fn loading_finished(&mut self) {
        self.rt.page.set_loading_progress(100.0);
        self.events
            .push(RevealEvent::LoadingProgress { percent: 100.0 });
        self.events.push(RevealEvent::LoadingFinished);
        let reveal_ms = self.config.dismiss.prompt_reveal_ms;
        self.fade_or_skip(Element::ProgressBar, Fade::out(reveal_ms));
        self.fade_or_skip(Element::ScrollPrompt, Fade::reveal(reveal_ms));
        self.gate.arm(&mut self.rt.listeners, &mut self.rt.sched);
    }

    fn apply_signals(&mut self, signals: Signals) {
        if signals.skipped_overlay {
            self.skipped(Element::LoadingOverlay);
        }
        if signals.loading_complete {
            self.loading_completions += 1;
            if let Some(callback) = self.on_loading_complete.take() {
                callback();
            }
            self.events.push(RevealEvent::LoadingComplete);
            self.viewport.schedule_refresh(
                self.config.transition.handoff_refresh_ms,
                &mut self.rt.sched,
            );
        }
        if signals.skipped_curtain {
            self.skipped(Element::Curtain);
        }
        if signals.content_ready {
            self.events.push(RevealEvent::ContentReady);
            self.viewport.on_content_ready(&mut self.rt.sched);
            let geometry = self.viewport.current_or_refresh(&self.rt.page);
            self.events.push(RevealEvent::GeometryRefreshed {
                scroll_budget: geometry.scroll_budget,
            });
            if self.expansion.initialize(geometry, &mut self.rt) {
                self.set_phase(Phase::Expanding);
            } else {
                if self.config.expansion.enabled {
                    self.skipped(Element::Frame);
                }
                self.set_phase(Phase::Ready);
            }
        }
    }
}

impl<P: Page> Drop for Reveal<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<P: Page + std::fmt::Debug> std::fmt::Debug for Reveal<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reveal")
            .field("phase", &self.phase)
            .field("loading_progress", &self.timer.progress())
            .field("expansion_progress", &self.expansion.progress())
            .field("dismissal", &self.gate.state())
            .field("page", &self.rt.page)
            .finish_non_exhaustive()
    }
}
