use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use crate::foundation::core::Millis;

/// Handle to a scheduled task; used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Named tasks driven by the controller's scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Loading progress tick; stale generations are ignored.
    LoadingTick { generation: u64 },
    DismissTimeout,
    OverlayFaded,
    Handoff,
    MountTimeout,
    CurtainFaded,
    GeometryRefresh,
    ScrubFrame,
}

/// Single-threaded timer queue over a host-supplied clock.
///
/// Tasks due at the same instant run in scheduling order. Cancellation is
/// lazy: cancelled entries stay in the heap and are skipped when popped.
#[derive(Debug)]
pub struct Scheduler<T = Task> {
    now: Millis,
    next_id: u64,
    queue: BinaryHeap<Reverse<(Millis, u64)>>,
    pending: HashMap<u64, T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Millis::ZERO,
            next_id: 0,
            queue: BinaryHeap::new(),
            pending: HashMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Move the clock forward; earlier timestamps are ignored.
    pub fn advance_clock(&mut self, to: Millis) {
        if to > self.now {
            self.now = to;
        }
    }

    pub fn after(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push(Reverse((self.now.after(delay_ms), id)));
        self.pending.insert(id, task);
        TimerId(id)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id.0).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
        self.queue.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id.0)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn drop_cancelled(&mut self) {
        while let Some(Reverse((_, id))) = self.queue.peek() {
            if self.pending.contains_key(id) {
                break;
            }
            self.queue.pop();
        }
    }

    pub fn next_due(&mut self) -> Option<Millis> {
        self.drop_cancelled();
        self.queue.peek().map(|Reverse((due, _))| *due)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its
    /// due time.
    pub fn pop_due(&mut self, until: Millis) -> Option<(TimerId, T)> {
        self.drop_cancelled();
        let Reverse((due, id)) = *self.queue.peek()?;
        if due > until {
            return None;
        }
        self.queue.pop();
        self.advance_clock(due);
        let task = self.pending.remove(&id)?;
        Some((TimerId(id), task))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
