use super::*;
use crate::{
    config::model::ExpansionConfig,
    foundation::core::Viewport,
    page::memory::MemoryPage,
};

fn setup(config: ExpansionConfig, page: MemoryPage) -> (ExpansionController, Runtime<MemoryPage>, TriggerGeometry) {
    let geometry = TriggerGeometry::compute(page.viewport(), config.budget_fraction, 1);
    (ExpansionController::new(&config), Runtime::new(page), geometry)
}

fn page() -> MemoryPage {
    MemoryPage::new(Viewport::new(1280.0, 800.0))
}

#[test]
fn initialize_sets_minimum_frame_and_takes_the_lock() {
    let (mut ctl, mut rt, g) = setup(ExpansionConfig::default(), page());
    assert!(ctl.initialize(g, &mut rt));
    assert_eq!(ctl.state(), ExpansionState::Tracking);
    let frame = rt.page.frame().unwrap();
    assert_eq!(frame.width_vw, 20.0);
    assert_eq!(frame.height_vh, 20.0);
    assert_eq!(rt.lock.token().unwrap().reason, LockReason::Expansion);
    assert_eq!(rt.listeners.count_owner(Owner::Expansion), 4);
    assert!((ctl.budget() - 960.0).abs() < 1e-9);
}

#[test]
fn half_budget_wheel_reaches_half_progress_and_keeps_offset() {
    let (mut ctl, mut rt, g) = setup(ExpansionConfig::default(), page());
    ctl.initialize(g, &mut rt);
    assert_eq!(ctl.on_wheel(480.0, &mut rt), ExpansionUpdate::Progressed(0.5));
    assert_eq!(rt.page.frame(), Some(ctl.timeline().sample(0.5)));
    assert_eq!(rt.page.scroll_offset(), 0.0);
    assert!(rt.page.is_scroll_suppressed());
}

#[test]
fn oversized_wheel_clamps_and_completes_once() {
    let (mut ctl, mut rt, g) = setup(ExpansionConfig::default(), page());
    ctl.initialize(g, &mut rt);
    assert_eq!(ctl.on_wheel(1920.0, &mut rt), ExpansionUpdate::Completed);
    assert_eq!(ctl.progress(), 1.0);
    assert!(!rt.page.is_scroll_suppressed());
    assert!(!rt.lock.is_held());
    assert_eq!(rt.listeners.count_owner(Owner::Expansion), 0);
    assert_eq!(rt.page.opacity(Element::Content), Some(1.0));

    assert_eq!(ctl.on_wheel(100.0, &mut rt), ExpansionUpdate::Ignored);
    assert_eq!(ctl.completions(), 1);
    assert_eq!(rt.lock.releases(), 1);
}

#[test]
fn native_scroll_is_pinned_back_while_growing() {
    let (mut ctl, mut rt, g) = setup(ExpansionConfig::default(), page());
    ctl.initialize(g, &mut rt);
    rt.page.user_scroll(96.0);
    assert!(matches!(
        ctl.on_scroll(96.0, &mut rt),
        ExpansionUpdate::Progressed(p) if (p - 0.1).abs() < 1e-9
    ));
    assert_eq!(rt.page.scroll_offset(), 0.0);
}

#[test]
fn accumulate_ignores_backward_deltas() {
    let (mut ctl, mut rt, g) = setup(ExpansionConfig::default(), page());
    ctl.initialize(g, &mut rt);
    ctl.on_wheel(480.0, &mut rt);
    assert_eq!(ctl.on_wheel(-240.0, &mut rt), ExpansionUpdate::Ignored);
    assert_eq!(ctl.progress(), 0.5);
}

#[test]
fn bidirectional_shrinks_on_backward_deltas() {
    let config = ExpansionConfig {
        policy: ProgressPolicy::Bidirectional,
        ..ExpansionConfig::default()
    };
    let (mut ctl, mut rt, g) = setup(config, page());
    ctl.initialize(g, &mut rt);
    ctl.on_wheel(480.0, &mut rt);
    assert_eq!(ctl.on_wheel(-240.0, &mut rt), ExpansionUpdate::Progressed(0.25));
    assert_eq!(ctl.on_wheel(-10_000.0, &mut rt), ExpansionUpdate::Progressed(0.0));
}

#[test]
fn touch_drag_up_advances() {
    let (mut ctl, mut rt, g) = setup(ExpansionConfig::default(), page());
    ctl.initialize(g, &mut rt);
    assert_eq!(ctl.on_touch_move(300.0, &mut rt), ExpansionUpdate::Ignored);
    ctl.on_touch_start(700.0);
    assert_eq!(ctl.on_touch_move(460.0, &mut rt), ExpansionUpdate::Progressed(0.25));
    assert_eq!(ctl.on_touch_move(220.0, &mut rt), ExpansionUpdate::Progressed(0.5));
}

#[test]
fn disabled_expansion_takes_the_direct_path() {
    let config = ExpansionConfig {
        enabled: false,
        ..ExpansionConfig::default()
    };
    let (mut ctl, mut rt, g) = setup(config, page());
    assert!(!ctl.initialize(g, &mut rt));
    assert_eq!(ctl.state(), ExpansionState::Complete);
    assert!(!rt.lock.is_held());
    assert!(rt.listeners.is_empty());
    assert_eq!(ctl.completions(), 0);
}

#[test]
fn missing_frame_takes_the_direct_path() {
    let (mut ctl, mut rt, g) = setup(ExpansionConfig::default(), page().without(Element::Frame));
    assert!(!ctl.initialize(g, &mut rt));
    assert!(rt.page.frame().is_none());
    assert_eq!(rt.lock.acquisitions(), 0);
}

#[test]
fn suspend_and_resume_rebuild_one_listener_set() {
    let (mut ctl, mut rt, g) = setup(ExpansionConfig::default(), page());
    ctl.initialize(g, &mut rt);
    ctl.on_wheel(240.0, &mut rt);
    for _ in 0..5 {
        assert!(ctl.suspend(&mut rt));
        assert!(!ctl.suspend(&mut rt));
        assert_eq!(rt.listeners.count_owner(Owner::Expansion), 0);
        assert!(ctl.resume(g, &mut rt));
        assert!(!ctl.resume(g, &mut rt));
    }
    assert_eq!(rt.listeners.count_owner(Owner::Expansion), 4);
    assert_eq!(ctl.progress(), 0.25);
    assert!(rt.lock.is_held());
    assert_eq!(rt.lock.acquisitions(), 1);
}

#[test]
fn scrub_lags_then_catches_up() {
    let config = ExpansionConfig {
        scrub_ms: 200,
        frame_interval_ms: 20,
        ..ExpansionConfig::default()
    };
    let (mut ctl, mut rt, g) = setup(config, page());
    ctl.initialize(g, &mut rt);
    ctl.on_wheel(480.0, &mut rt);
    assert_eq!(ctl.rendered(), 0.0);

    let (_, task) = rt.sched.pop_due(Millis(20)).unwrap();
    assert_eq!(task, Task::ScrubFrame);
    let first = ctl.on_scrub_frame(&mut rt).unwrap();
    assert!(first > 0.0 && first < 0.5);

    let mut frames = 1;
    while let Some((_, Task::ScrubFrame)) = rt.sched.pop_due(Millis(10_000)) {
        ctl.on_scrub_frame(&mut rt);
        frames += 1;
    }
    assert!(frames > 2);
    assert_eq!(ctl.rendered(), 0.5);
    assert_eq!(rt.sched.pending_len(), 0);
}

#[test]
fn teardown_releases_an_expansion_lock() {
    let (mut ctl, mut rt, g) = setup(ExpansionConfig::default(), page());
    ctl.initialize(g, &mut rt);
    ctl.teardown(&mut rt);
    assert!(!rt.lock.is_held());
    assert!(rt.listeners.is_empty());
}
