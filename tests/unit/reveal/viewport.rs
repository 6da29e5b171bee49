use super::*;
use crate::{foundation::core::Millis, page::memory::MemoryPage};

fn sync() -> ViewportSync {
    ViewportSync::new(&ViewportConfig::default(), 1.2)
}

#[test]
fn budget_is_a_fraction_of_viewport_height() {
    let g = TriggerGeometry::compute(Viewport::new(1280.0, 800.0), 1.2, 1);
    assert!((g.scroll_budget - 960.0).abs() < 1e-9);
}

#[test]
fn collapsed_viewport_keeps_a_positive_budget() {
    let g = TriggerGeometry::compute(Viewport::new(0.0, 0.0), 1.2, 1);
    assert_eq!(g.scroll_budget, MIN_SCROLL_BUDGET_PX);
}

#[test]
fn resize_bursts_collapse_into_one_refresh() {
    let mut vs = sync();
    let mut sched = Scheduler::new();
    for t in [0, 40, 80, 120] {
        sched.advance_clock(Millis(t));
        vs.on_resize(&mut sched);
    }
    assert_eq!(sched.pending_len(), 1);
    assert_eq!(sched.next_due(), Some(Millis(270)));
}

#[test]
fn content_ready_invalidates_then_schedules_settle_refresh() {
    let page = MemoryPage::new(Viewport::new(1000.0, 500.0));
    let mut vs = sync();
    let mut sched = Scheduler::new();
    vs.refresh(&page);
    vs.on_content_ready(&mut sched);
    assert!(vs.geometry().is_none());
    assert_eq!(sched.next_due(), Some(Millis(500)));

    let (_, task) = sched.pop_due(Millis(500)).unwrap();
    assert_eq!(task, Task::GeometryRefresh);
    let g = vs.refresh_due(&page);
    assert_eq!(g.revision, 2);
    assert!(!vs.has_pending_refresh());
}

#[test]
fn current_or_refresh_reuses_fresh_geometry() {
    let page = MemoryPage::new(Viewport::new(1000.0, 500.0));
    let mut vs = sync();
    let a = vs.current_or_refresh(&page);
    let b = vs.current_or_refresh(&page);
    assert_eq!(a, b);
    assert_eq!(vs.revision(), 1);
}

#[test]
fn teardown_cancels_pending_refresh_and_listener() {
    let mut vs = sync();
    let mut sched = Scheduler::new();
    let mut listeners = Listeners::new();
    vs.attach(&mut listeners);
    vs.on_resize(&mut sched);
    vs.teardown(&mut listeners, &mut sched);
    assert!(listeners.is_empty());
    assert_eq!(sched.next_due(), None);
}
