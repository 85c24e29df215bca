//! Restart recovery: rebuilding scheduler timers from the task store.

use crate::assignment::{
    domain::{Task, TaskState},
    ports::{Notifier, TaskStore, TaskStoreError},
};
use crate::reminder::domain::{Cadence, ReminderTimer};
use crate::reminder::services::ReminderScheduler;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Computes the arming plan for a set of recovered tasks.
///
/// This is a pure function of the stored task list and the current time,
/// so recovery is deterministic and re-entrant. Per open task: a missing or
/// stale last-delivery timestamp (age at least one cadence span) arms the
/// timer immediately due, so a reminder that fell due during downtime fires
/// promptly after recovery; a fresh timestamp arms the timer at the next
/// cadence instant, so a restart never resets an in-progress cadence.
#[must_use]
pub fn recovery_plan(tasks: &[Task], now: DateTime<Utc>) -> Vec<ReminderTimer> {
    tasks
        .iter()
        .filter(|task| task.state() == TaskState::Open)
        .map(|task| {
            let cadence = Cadence::for_priority(task.priority());
            let next_fire_at = match task.last_reminder_sent_at() {
                Some(last) if now - last < cadence.span() => cadence.next_fire_after(last),
                _ => now,
            };
            ReminderTimer::new(task.id(), cadence, next_fire_at)
        })
        .collect()
}

/// Rebuilds scheduler timers from the task store after a process restart.
///
/// Runs once, before the scheduler clock starts ticking; the store is
/// authoritative and any in-memory timer state from a previous process is
/// gone.
pub struct RecoveryManager<S, N, C>
where
    S: TaskStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    scheduler: Arc<ReminderScheduler<S, N, C>>,
    clock: Arc<C>,
}

impl<S, N, C> RecoveryManager<S, N, C>
where
    S: TaskStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a recovery manager.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        scheduler: Arc<ReminderScheduler<S, N, C>>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            scheduler,
            clock,
        }
    }

    /// Reads every open task and arms its reminder timer.
    ///
    /// Returns the number of timers armed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the open-task listing fails; no
    /// timers are touched in that case.
    pub async fn run(&self) -> Result<usize, TaskStoreError> {
        let tasks = self.store.list_all_open_tasks().await?;
        let plan = recovery_plan(&tasks, self.clock.utc());
        let armed = plan.len();
        self.scheduler.restore(plan).await;
        info!(armed, "restored reminder timers from task store");
        Ok(armed)
    }
}
