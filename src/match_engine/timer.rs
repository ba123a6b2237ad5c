//! Deferred actions on a virtual clock.
//!
//! Every task carries the generation of the deck it was scheduled for. The
//! controller bumps its generation whenever a deck is rebuilt, so a task
//! outliving its deck is recognised as stale when it comes due.

use std::time::Duration;

/// What to do when a task comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Mark the matched pair in flight.
    Reveal,
    /// Turn the mismatched pair in flight face down.
    Recover,
    /// Leave the finished level.
    Celebrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub due: Duration,
    pub generation: u64,
    pub action: TimerAction,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    tasks: Vec<ScheduledTask>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn schedule(&mut self, delay: Duration, generation: u64, action: TimerAction) -> ScheduledTask {
        let task = ScheduledTask { due: self.now + delay, generation, action, seq: self.next_seq };
        self.next_seq += 1;
        self.tasks.push(task);
        task
    }

    /// Time remaining until the earliest task, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }

    /// Remove and return the earliest task due at or before `until`, moving
    /// the clock to its deadline.
    ///
    /// Ties keep scheduling order. Tasks scheduled while handling a popped
    /// task are timed from that task's deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<ScheduledTask> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        let task = self.tasks.remove(idx);
        self.now = self.now.max(task.due);
        Some(task)
    }

    /// Move the clock to `until` once nothing more is due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
