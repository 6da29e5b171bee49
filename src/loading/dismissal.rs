use crate::{
    config::model::DismissConfig,
    runtime::{
        listeners::{EventKind, Listeners, Owner},
        scheduler::{Scheduler, Task, TimerId},
    },
};

/// What ended the loading phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    Click,
    Wheel,
    TouchMove,
    Scroll,
    Key,
    Timeout,
}

/// Single-fire latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum DismissalState {
    Pending,
    Fired(DismissReason),
}

/// Decides when loading ends. First writer wins; every later request is a
/// no-op regardless of its source.
#[derive(Debug)]
pub struct DismissalGate {
    config: DismissConfig,
    state: DismissalState,
    armed: bool,
    timeout: Option<TimerId>,
}

impl DismissalGate {
    /// Sources the gate listens to once armed.
    pub const LISTENS: [EventKind; 5] = [
        EventKind::Click,
        EventKind::Wheel,
        EventKind::TouchMove,
        EventKind::Scroll,
        EventKind::KeyDown,
    ];

    pub fn new(config: &DismissConfig) -> Self {
        Self {
            config: *config,
            state: DismissalState::Pending,
            armed: false,
            timeout: None,
        }
    }

    /// Register listeners before loading completes, when early dismissal is allowed.
    pub fn attach_early(&mut self, listeners: &mut Listeners) {
        if self.config.allow_early && self.state == DismissalState::Pending {
            listeners.replace_owner(Owner::Dismissal, &Self::LISTENS);
        }
    }

    /// Loading reached 100: accept every trigger and start the timeout grace window.
    pub fn arm(&mut self, listeners: &mut Listeners, sched: &mut Scheduler) {
        if self.armed || self.state != DismissalState::Pending {
            return;
        }
        self.armed = true;
        listeners.replace_owner(Owner::Dismissal, &Self::LISTENS);
        self.timeout = Some(sched.after(self.config.grace_ms, Task::DismissTimeout));
        tracing::debug!(grace_ms = self.config.grace_ms, "dismissal armed");
    }

    fn accepts(&self, reason: DismissReason) -> bool {
        match reason {
            DismissReason::Timeout => self.armed,
            _ => self.armed || self.config.allow_early,
        }
    }

    /// Map a native scroll offset to a dismiss trigger.
    pub fn scroll_trigger(&self, offset: f64) -> Option<DismissReason> {
        (offset > self.config.scroll_threshold_px).then_some(DismissReason::Scroll)
    }

    /// Returns the winning reason if this call fired the latch.
    pub fn request_dismiss(
        &mut self,
        reason: DismissReason,
        listeners: &mut Listeners,
        sched: &mut Scheduler,
    ) -> Option<DismissReason> {
        if let DismissalState::Fired(first) = self.state {
            tracing::trace!(?reason, ?first, "dismissal already fired");
            return None;
        }
        if !self.accepts(reason) {
            tracing::trace!(?reason, "dismissal not armed yet");
            return None;
        }
        self.state = DismissalState::Fired(reason);
        self.teardown(listeners, sched);
        tracing::debug!(?reason, "loading dismissed");
        Some(reason)
    }

    /// The timeout task ran; its handle is spent.
    pub fn timeout_elapsed(&mut self) {
        self.timeout = None;
    }

    /// Remove listeners and the pending timeout without touching the latch.
    pub fn teardown(&mut self, listeners: &mut Listeners, sched: &mut Scheduler) {
        listeners.remove_owner(Owner::Dismissal);
        if let Some(id) = self.timeout.take() {
            sched.cancel(id);
        }
    }

    /// Page reinitialization.
    pub fn reset(&mut self, listeners: &mut Listeners, sched: &mut Scheduler) {
        self.teardown(listeners, sched);
        self.state = DismissalState::Pending;
        self.armed = false;
    }

    pub fn state(&self) -> DismissalState {
        self.state
    }

    pub fn is_fired(&self) -> bool {
        matches!(self.state, DismissalState::Fired(_))
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loading/dismissal.rs"]
mod tests;
