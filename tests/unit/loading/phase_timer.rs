use super::*;
use crate::foundation::core::Millis;

fn run(timer: &mut PhaseTimer, sched: &mut Scheduler, until: u64) -> Vec<Tick> {
    let mut out = Vec::new();
    while let Some((_, task)) = sched.pop_due(Millis(until)) {
        if let Task::LoadingTick { generation } = task {
            out.push(timer.on_tick(generation, sched));
        }
    }
    out
}

#[test]
fn reference_timing_completes_after_eighty_ticks() {
    let mut sched = Scheduler::new();
    let mut timer = PhaseTimer::new(4000, 50);
    timer.start(&mut sched);

    let ticks = run(&mut timer, &mut sched, 3950);
    assert_eq!(ticks.len(), 79);
    assert_eq!(timer.progress(), 98.75);
    assert!(!timer.is_complete());

    let ticks = run(&mut timer, &mut sched, 4000);
    assert_eq!(ticks, vec![Tick::Completed]);
    assert_eq!(timer.ticks(), 80);
    assert_eq!(timer.progress(), 100.0);
    assert_eq!(sched.pending_len(), 0);
}

#[test]
fn progress_is_monotonic_and_completion_fires_once() {
    let mut sched = Scheduler::new();
    let mut timer = PhaseTimer::new(1000, 30);
    timer.start(&mut sched);
    let ticks = run(&mut timer, &mut sched, 10_000);
    let completions = ticks.iter().filter(|t| **t == Tick::Completed).count();
    assert_eq!(completions, 1);
    let mut last = 0.0;
    for t in &ticks {
        if let Tick::Progress(p) = t {
            assert!(*p >= last);
            assert!(*p < 100.0);
            last = *p;
        }
    }
}

#[test]
fn cancelled_timer_never_completes() {
    let mut sched = Scheduler::new();
    let mut timer = PhaseTimer::new(200, 50);
    timer.start(&mut sched);
    run(&mut timer, &mut sched, 100);
    timer.cancel(&mut sched);
    assert!(run(&mut timer, &mut sched, 10_000).is_empty());
    assert_eq!(timer.state(), TimerState::Cancelled);
    assert_eq!(timer.progress(), 50.0);
}

#[test]
fn ticks_from_a_previous_run_are_stale() {
    let mut sched = Scheduler::new();
    let mut timer = PhaseTimer::new(200, 50);
    timer.start(&mut sched);
    timer.start(&mut sched);
    assert_eq!(timer.on_tick(1, &mut sched), Tick::Stale);
    assert_eq!(run(&mut timer, &mut sched, 200).len(), 4);
    assert!(timer.is_complete());
}

#[test]
fn values_run_from_zero_to_exactly_one_hundred() {
    let timer = PhaseTimer::new(4000, 50);
    let values: Vec<f64> = timer.values().collect();
    assert_eq!(values.len(), 81);
    assert_eq!(values[0], 0.0);
    assert_eq!(values[1], 1.25);
    assert_eq!(values.iter().filter(|v| **v == 100.0).count(), 1);
    assert_eq!(timer.values().size_hint(), (81, Some(81)));
    let mut rest = timer.values().skip(80);
    assert_eq!(rest.size_hint(), (1, Some(1)));
    assert_eq!(rest.next(), Some(100.0));
    assert_eq!(rest.next(), None);
}

#[test]
fn uneven_duration_rounds_the_step_count_up() {
    let timer = PhaseTimer::new(1000, 300);
    assert_eq!(timer.steps(), 4);
    assert_eq!(timer.values().last(), Some(100.0));
}
