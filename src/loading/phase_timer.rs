use crate::{
    config::model::LoadingConfig,
    runtime::scheduler::{Scheduler, Task, TimerId},
};

/// Lifecycle of a [`PhaseTimer`] run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Result of delivering a tick to the timer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// Tick from a cancelled or superseded run.
    Stale,
    Progress(f64),
    /// Progress reached 100; reported once per run.
    Completed,
}

/// Lazy sequence of the progress values one run shows: the initial 0, then
/// one value per tick up to and including 100.
#[derive(Clone, Debug)]
pub struct ProgressSteps {
    steps: u64,
    next: u64,
}

impl Iterator for ProgressSteps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next > self.steps {
            return None;
        }
        let value = step_progress(self.next, self.steps);
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.steps + 1).saturating_sub(self.next);
        let left = usize::try_from(left).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

fn step_progress(tick: u64, steps: u64) -> f64 {
    if tick >= steps {
        100.0
    } else {
        (tick as f64 * 100.0 / steps as f64).min(100.0)
    }
}

/// Linear 0..=100 progress over a fixed wall-clock duration.
///
/// Each run carries a generation number; ticks scheduled by an earlier run
/// are reported as [`Tick::Stale`] so a torn-down run can never complete.
#[derive(Debug)]
pub struct PhaseTimer {
    interval_ms: u64,
    steps: u64,
    ticks: u64,
    progress: f64,
    state: TimerState,
    generation: u64,
    pending: Option<TimerId>,
}

impl PhaseTimer {
    pub fn new(duration_ms: u64, interval_ms: u64) -> Self {
        let interval_ms = interval_ms.max(1);
        Self {
            interval_ms,
            steps: duration_ms.div_ceil(interval_ms).max(1),
            ticks: 0,
            progress: 0.0,
            state: TimerState::Idle,
            generation: 0,
            pending: None,
        }
    }

    pub fn from_config(config: &LoadingConfig) -> Self {
        Self::new(config.duration_ms, config.tick_ms)
    }

    /// Fresh lazy sequence of the values a run produces.
    pub fn values(&self) -> ProgressSteps {
        ProgressSteps {
            steps: self.steps,
            next: 0,
        }
    }

    /// Start (or restart) a run from 0.
    pub fn start(&mut self, sched: &mut Scheduler) {
        self.cancel(sched);
        self.generation += 1;
        self.ticks = 0;
        self.progress = 0.0;
        self.state = TimerState::Running;
        self.schedule(sched);
        tracing::debug!(
            steps = self.steps,
            interval_ms = self.interval_ms,
            "loading timer started"
        );
    }

    fn schedule(&mut self, sched: &mut Scheduler) {
        self.pending = Some(sched.after(
            self.interval_ms,
            Task::LoadingTick {
                generation: self.generation,
            },
        ));
    }

    pub fn on_tick(&mut self, generation: u64, sched: &mut Scheduler) -> Tick {
        if generation != self.generation || self.state != TimerState::Running {
            tracing::trace!(generation, current = self.generation, "stale loading tick");
            return Tick::Stale;
        }
        self.pending = None;
        self.ticks += 1;
        self.progress = step_progress(self.ticks, self.steps);
        if self.ticks >= self.steps {
            self.state = TimerState::Completed;
            tracing::debug!(ticks = self.ticks, "loading timer completed");
            return Tick::Completed;
        }
        self.schedule(sched);
        Tick::Progress(self.progress)
    }

    /// Stop a running timer; later ticks of this run are stale.
    pub fn cancel(&mut self, sched: &mut Scheduler) {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
        if self.state == TimerState::Running {
            self.state = TimerState::Cancelled;
            self.generation += 1;
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_complete(&self) -> bool {
        self.state == TimerState::Completed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loading/phase_timer.rs"]
mod tests;
