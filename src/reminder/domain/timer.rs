//! Armed reminder timer state.

use super::Cadence;
use crate::assignment::domain::TaskId;
use chrono::{DateTime, Utc};

/// An armed reminder timer for a single open task.
///
/// Timers are runtime-only state owned by the scheduler: they are created
/// when a task enters the open state (at creation or recovery), destroyed
/// when the task leaves it, and fully reconstructible from the task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTimer {
    task_id: TaskId,
    cadence: Cadence,
    next_fire_at: DateTime<Utc>,
}

impl ReminderTimer {
    /// Creates an armed timer.
    #[must_use]
    pub const fn new(task_id: TaskId, cadence: Cadence, next_fire_at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            cadence,
            next_fire_at,
        }
    }

    /// Returns the task this timer belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the timer cadence.
    #[must_use]
    pub const fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Returns the next fire instant.
    #[must_use]
    pub const fn next_fire_at(&self) -> DateTime<Utc> {
        self.next_fire_at
    }

    /// Returns whether the timer is due at `now`.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_fire_at <= now
    }

    /// Moves the next fire instant.
    pub const fn reschedule(&mut self, next_fire_at: DateTime<Utc>) {
        self.next_fire_at = next_fire_at;
    }
}
