use crate::{
    config::model::ViewportConfig,
    foundation::core::Viewport,
    page::surface::Page,
    runtime::{
        listeners::{EventKind, Listeners, Owner},
        scheduler::{Scheduler, Task, TimerId},
    },
};

/// Smallest scroll budget; keeps the delta-to-progress division finite on
/// collapsed viewports.
pub const MIN_SCROLL_BUDGET_PX: f64 = 1.0;

/// Viewport-relative thresholds. Derived, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TriggerGeometry {
    pub viewport: Viewport,
    /// Gesture distance that takes expansion from 0 to 1.
    pub scroll_budget: f64,
    pub revision: u64,
}

impl TriggerGeometry {
    pub fn compute(viewport: Viewport, budget_fraction: f64, revision: u64) -> Self {
        let raw = viewport.height * budget_fraction;
        let scroll_budget = if raw.is_finite() {
            raw.max(MIN_SCROLL_BUDGET_PX)
        } else {
            MIN_SCROLL_BUDGET_PX
        };
        Self {
            viewport,
            scroll_budget,
            revision,
        }
    }
}

/// Keeps [`TriggerGeometry`] in step with the live viewport.
///
/// All recomputation requests coalesce into a single pending refresh task;
/// a new request replaces the pending one.
#[derive(Debug)]
pub struct ViewportSync {
    config: ViewportConfig,
    budget_fraction: f64,
    geometry: Option<TriggerGeometry>,
    revision: u64,
    pending: Option<TimerId>,
}

impl ViewportSync {
    pub fn new(config: &ViewportConfig, budget_fraction: f64) -> Self {
        Self {
            config: *config,
            budget_fraction,
            geometry: None,
            revision: 0,
            pending: None,
        }
    }

    pub fn attach(&self, listeners: &mut Listeners) {
        listeners.add(Owner::Viewport, EventKind::Resize);
    }

    /// Debounced: only the last resize in a burst triggers a refresh.
    pub fn on_resize(&mut self, sched: &mut Scheduler) {
        self.schedule_refresh(self.config.resize_debounce_ms, sched);
    }

    pub fn schedule_refresh(&mut self, delay_ms: u64, sched: &mut Scheduler) {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
        self.pending = Some(sched.after(delay_ms, Task::GeometryRefresh));
    }

    /// Drop geometry computed against a stale layout.
    pub fn invalidate(&mut self) {
        self.geometry = None;
    }

    /// Content became visible: clear, then recompute once the DOM has settled.
    pub fn on_content_ready(&mut self, sched: &mut Scheduler) {
        self.invalidate();
        self.schedule_refresh(self.config.settle_ms, sched);
    }

    /// Recompute from the page's current viewport.
    pub fn refresh<P: Page + ?Sized>(&mut self, page: &P) -> TriggerGeometry {
        self.revision += 1;
        let geometry = TriggerGeometry::compute(page.viewport(), self.budget_fraction, self.revision);
        tracing::debug!(
            revision = geometry.revision,
            scroll_budget = geometry.scroll_budget,
            "trigger geometry refreshed"
        );
        self.geometry = Some(geometry);
        geometry
    }

    /// The scheduled refresh task ran.
    pub fn refresh_due<P: Page + ?Sized>(&mut self, page: &P) -> TriggerGeometry {
        self.pending = None;
        self.refresh(page)
    }

    pub fn current_or_refresh<P: Page + ?Sized>(&mut self, page: &P) -> TriggerGeometry {
        match self.geometry {
            Some(g) => g,
            None => self.refresh(page),
        }
    }

    pub fn teardown(&mut self, listeners: &mut Listeners, sched: &mut Scheduler) {
        listeners.remove_owner(Owner::Viewport);
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
    }

    pub fn geometry(&self) -> Option<TriggerGeometry> {
        self.geometry
    }

    /// Number of recomputations so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/viewport.rs"]
mod tests;
