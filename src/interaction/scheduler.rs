use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle of one armed delayed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Cancellable delayed callbacks provided by the host event loop.
///
/// When an armed task comes due, the host reports its `TaskId` back to the
/// owner (for example `InteractionController::on_timer_expired`). Cancelled
/// tasks must never be reported; owners still ignore unknown ids.
pub trait DelayedTaskScheduler {
    fn arm(&mut self, delay: Duration) -> TaskId;
    fn cancel(&mut self, task: TaskId);
}

/// Deterministic scheduler driven by explicit clock advances.
///
/// Used by tests and by hosts that already run a frame clock.
#[derive(Debug, Default, Clone)]
pub struct ManualTaskScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<(TaskId, Duration)>,
    armed_total: usize,
    cancelled_total: usize,
}

impl ManualTaskScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, task: TaskId) -> bool {
        self.pending.iter().any(|(id, _)| *id == task)
    }

    #[must_use]
    pub fn armed_total(&self) -> usize {
        self.armed_total
    }

    #[must_use]
    pub fn cancelled_total(&self) -> usize {
        self.cancelled_total
    }

    /// Moves the clock forward and returns the tasks that came due, earliest
    /// deadline first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TaskId> {
        self.now += elapsed;
        let now = self.now;
        let mut due: Vec<(TaskId, Duration)> = Vec::new();
        self.pending.retain(|&(id, deadline)| {
            if deadline <= now {
                due.push((id, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(id, deadline)| (deadline, id));
        due.into_iter().map(|(id, _)| id).collect()
    }
}

impl DelayedTaskScheduler for ManualTaskScheduler {
    fn arm(&mut self, delay: Duration) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        self.pending.push((id, self.now + delay));
        self.armed_total += 1;
        id
    }

    fn cancel(&mut self, task: TaskId) {
        let before = self.pending.len();
        self.pending.retain(|(id, _)| *id != task);
        if self.pending.len() != before {
            self.cancelled_total += 1;
        }
    }
}
