use super::*;
use crate::foundation::core::Millis;

fn armed_gate() -> (DismissalGate, Listeners, Scheduler) {
    let mut gate = DismissalGate::new(&DismissConfig::default());
    let mut listeners = Listeners::new();
    let mut sched = Scheduler::new();
    gate.arm(&mut listeners, &mut sched);
    (gate, listeners, sched)
}

#[test]
fn first_writer_wins_for_every_arrival_order() {
    let reasons = [
        DismissReason::Click,
        DismissReason::Wheel,
        DismissReason::Key,
        DismissReason::Timeout,
    ];
    for first in 0..reasons.len() {
        let (mut gate, mut listeners, mut sched) = armed_gate();
        let order: Vec<_> = reasons[first..]
            .iter()
            .chain(&reasons[..first])
            .copied()
            .collect();
        let fired: Vec<_> = order
            .iter()
            .filter_map(|r| gate.request_dismiss(*r, &mut listeners, &mut sched))
            .collect();
        assert_eq!(fired, vec![order[0]]);
        assert_eq!(gate.state(), DismissalState::Fired(order[0]));
    }
}

#[test]
fn firing_removes_listeners_and_timeout() {
    let (mut gate, mut listeners, mut sched) = armed_gate();
    assert_eq!(listeners.count_owner(Owner::Dismissal), 5);
    assert_eq!(sched.next_due(), Some(Millis(8000)));
    gate.request_dismiss(DismissReason::Key, &mut listeners, &mut sched);
    assert_eq!(listeners.count_owner(Owner::Dismissal), 0);
    assert_eq!(sched.next_due(), None);
}

#[test]
fn unarmed_gate_ignores_triggers_by_default() {
    let mut gate = DismissalGate::new(&DismissConfig::default());
    let mut listeners = Listeners::new();
    let mut sched = Scheduler::new();
    gate.attach_early(&mut listeners);
    assert!(listeners.is_empty());
    assert_eq!(
        gate.request_dismiss(DismissReason::Wheel, &mut listeners, &mut sched),
        None
    );
    assert_eq!(gate.state(), DismissalState::Pending);
}

#[test]
fn early_dismissal_accepts_gestures_but_not_timeout() {
    let config = DismissConfig {
        allow_early: true,
        ..DismissConfig::default()
    };
    let mut gate = DismissalGate::new(&config);
    let mut listeners = Listeners::new();
    let mut sched = Scheduler::new();
    gate.attach_early(&mut listeners);
    assert_eq!(listeners.count_owner(Owner::Dismissal), 5);
    assert_eq!(
        gate.request_dismiss(DismissReason::Timeout, &mut listeners, &mut sched),
        None
    );
    assert_eq!(
        gate.request_dismiss(DismissReason::Click, &mut listeners, &mut sched),
        Some(DismissReason::Click)
    );
}

#[test]
fn scroll_only_counts_past_the_threshold() {
    let gate = DismissalGate::new(&DismissConfig::default());
    assert_eq!(gate.scroll_trigger(10.0), None);
    assert_eq!(gate.scroll_trigger(10.5), Some(DismissReason::Scroll));
}

#[test]
fn reset_reopens_the_latch() {
    let (mut gate, mut listeners, mut sched) = armed_gate();
    gate.request_dismiss(DismissReason::Click, &mut listeners, &mut sched);
    gate.reset(&mut listeners, &mut sched);
    assert_eq!(gate.state(), DismissalState::Pending);
    assert!(!gate.is_armed());
}
