use super::*;

fn drain(s: &mut Scheduler<&'static str>, until: u64) -> Vec<(u64, &'static str)> {
    let mut out = Vec::new();
    while let Some((_, task)) = s.pop_due(Millis(until)) {
        out.push((s.now().0, task));
    }
    out
}

#[test]
fn tasks_run_in_due_order_then_fifo() {
    let mut s = Scheduler::new();
    s.after(20, "late");
    s.after(10, "first");
    s.after(10, "second");
    assert_eq!(
        drain(&mut s, 100),
        vec![(10, "first"), (10, "second"), (20, "late")]
    );
}

#[test]
fn nothing_runs_before_its_due_time() {
    let mut s = Scheduler::new();
    s.after(50, "tick");
    assert!(drain(&mut s, 49).is_empty());
    assert_eq!(s.next_due(), Some(Millis(50)));
    assert_eq!(drain(&mut s, 50), vec![(50, "tick")]);
}

#[test]
fn cancelled_tasks_never_fire() {
    let mut s = Scheduler::new();
    let id = s.after(5, "stale");
    s.after(6, "live");
    assert!(s.cancel(id));
    assert!(!s.cancel(id));
    assert!(!s.is_pending(id));
    assert_eq!(drain(&mut s, 10), vec![(6, "live")]);
    assert_eq!(s.pending_len(), 0);
}

#[test]
fn delays_are_relative_to_the_current_clock() {
    let mut s = Scheduler::new();
    s.advance_clock(Millis(100));
    s.after(10, "x");
    assert_eq!(s.next_due(), Some(Millis(110)));
}

#[test]
fn clock_never_runs_backwards() {
    let mut s: Scheduler<()> = Scheduler::new();
    s.advance_clock(Millis(30));
    s.advance_clock(Millis(10));
    assert_eq!(s.now(), Millis(30));
}

#[test]
fn cancel_all_empties_the_queue() {
    let mut s = Scheduler::new();
    s.after(1, "a");
    s.after(2, "b");
    s.cancel_all();
    assert_eq!(s.next_due(), None);
    assert!(drain(&mut s, 10).is_empty());
}
