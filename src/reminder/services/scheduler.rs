//! Reminder scheduler: one armed timer per open task, driven by one clock.

use crate::assignment::{
    domain::{Task, TaskId, TaskState},
    ports::{Notifier, NotifierError, TaskStore, TaskStoreError},
    services::{MessageCatalog, MessageTemplateError},
};
use crate::reminder::domain::{Cadence, DeliveryWindow, ReminderTimer};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Default period of the scheduler clock. One minute comfortably resolves
/// the hourly, six-hourly, and daily cadences.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(60);

/// Errors raised while delivering a single due reminder.
#[derive(Debug, Error)]
pub enum ReminderDeliveryError {
    /// Reading or updating the task store failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// Rendering the reminder message failed.
    #[error(transparent)]
    Template(#[from] MessageTemplateError),

    /// The outbound notification failed; the reminder is retried on the
    /// next due tick.
    #[error(transparent)]
    Notifier(#[from] NotifierError),
}

/// Per-process reminder scheduler.
///
/// Holds at most one armed timer per task. A single clock drives all timer
/// evaluations; each due task is processed as an isolated unit of work so
/// one failure never aborts the rest of the tick.
pub struct ReminderScheduler<S, N, C>
where
    S: TaskStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    notifier: Arc<N>,
    messages: Arc<MessageCatalog>,
    clock: Arc<C>,
    window: DeliveryWindow,
    timers: Mutex<HashMap<TaskId, ReminderTimer>>,
    // Serializes terminal lifecycle transitions with in-flight deliveries.
    transitions: Mutex<()>,
}

impl<S, N, C> ReminderScheduler<S, N, C>
where
    S: TaskStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a scheduler with the standard delivery window.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        notifier: Arc<N>,
        messages: Arc<MessageCatalog>,
        clock: Arc<C>,
    ) -> Self {
        Self::with_window(store, notifier, messages, clock, DeliveryWindow::default())
    }

    /// Creates a scheduler with a custom delivery window.
    #[must_use]
    pub fn with_window(
        store: Arc<S>,
        notifier: Arc<N>,
        messages: Arc<MessageCatalog>,
        clock: Arc<C>,
        window: DeliveryWindow,
    ) -> Self {
        Self {
            store,
            notifier,
            messages,
            clock,
            window,
            timers: Mutex::new(HashMap::new()),
            transitions: Mutex::new(()),
        }
    }

    /// Acquires the guard serializing terminal transitions with deliveries.
    ///
    /// Registry operations hold this guard across the state write and the
    /// disarm so no tick can fire a reminder for a task whose terminal
    /// transition is in flight.
    pub async fn transition_guard(&self) -> MutexGuard<'_, ()> {
        self.transitions.lock().await
    }

    /// Arms a reminder timer for an open task.
    ///
    /// Arming a task whose timer already carries the same cadence is a
    /// no-op; a different cadence supersedes the armed timer. Tasks outside
    /// the open state are ignored.
    pub async fn arm(&self, task: &Task) {
        if task.state() != TaskState::Open {
            return;
        }
        let cadence = Cadence::for_priority(task.priority());
        let now = self.clock.utc();
        let mut timers = self.timers.lock().await;
        if timers
            .get(&task.id())
            .is_some_and(|timer| timer.cadence() == cadence)
        {
            return;
        }
        let next_fire_at = cadence.next_fire_after(now);
        timers.insert(task.id(), ReminderTimer::new(task.id(), cadence, next_fire_at));
        debug!(task_id = %task.id(), ?next_fire_at, "armed reminder timer");
    }

    /// Disarms the timer for a task, if any. Returns whether a timer was
    /// removed.
    pub async fn disarm(&self, task_id: TaskId) -> bool {
        let removed = self.timers.lock().await.remove(&task_id).is_some();
        if removed {
            debug!(%task_id, "disarmed reminder timer");
        }
        removed
    }

    /// Replaces timers with a recovery plan.
    ///
    /// Each planned timer overwrites any armed timer for the same task, so
    /// replaying the same plan is idempotent.
    pub async fn restore(&self, plan: Vec<ReminderTimer>) {
        let mut timers = self.timers.lock().await;
        for timer in plan {
            timers.insert(timer.task_id(), timer);
        }
    }

    /// Returns the armed timer for a task, if any.
    pub async fn armed_timer(&self, task_id: TaskId) -> Option<ReminderTimer> {
        self.timers.lock().await.get(&task_id).copied()
    }

    /// Returns the number of armed timers.
    pub async fn armed_count(&self) -> usize {
        self.timers.lock().await.len()
    }

    /// Evaluates all armed timers once.
    ///
    /// Failures are isolated per task: a store, rendering, or delivery
    /// error for one task is logged and does not abort the others. A failed
    /// delivery leaves the timer due, so it retries on the next tick.
    pub async fn tick(&self) {
        let now = self.clock.utc();
        let due: Vec<ReminderTimer> = {
            let timers = self.timers.lock().await;
            timers
                .values()
                .filter(|timer| timer.is_due(now))
                .copied()
                .collect()
        };

        for timer in due {
            if let Err(error) = self.deliver(timer).await {
                warn!(task_id = %timer.task_id(), %error, "reminder delivery failed");
            }
        }
    }

    /// Drives the scheduler clock forever at the given period.
    pub async fn run(self: Arc<Self>, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    async fn deliver(&self, timer: ReminderTimer) -> Result<(), ReminderDeliveryError> {
        let _transition = self.transitions.lock().await;
        let now = self.clock.utc();
        let task_id = timer.task_id();

        let Some(task) = self.store.find_task(task_id).await? else {
            self.disarm(task_id).await;
            return Ok(());
        };
        if task.state() != TaskState::Open {
            self.disarm(task_id).await;
            return Ok(());
        }

        if !self.window.contains(now.with_timezone(&Local).time()) {
            // Deferred, not dropped: the reminder moves to the next window
            // opening without a delivery.
            self.reschedule(task_id, self.window.next_open_at(now)).await;
            debug!(%task_id, "reminder deferred outside delivery window");
            return Ok(());
        }

        let cadence = timer.cadence();
        if let Some(last) = task.last_reminder_sent_at() {
            if now - last < cadence.span() {
                // A delivery recorded shortly before this timer was armed
                // (e.g. just before a restart) suppresses the send.
                self.reschedule(task_id, next_after_delivery(cadence, last, now))
                    .await;
                return Ok(());
            }
        }

        let text = self.messages.reminder(&task)?;
        self.notifier.send(task.owner_id(), &text).await?;
        self.store.set_last_reminder_sent(task_id, now).await?;
        self.reschedule(task_id, cadence.next_fire_after(now)).await;
        Ok(())
    }

    async fn reschedule(&self, task_id: TaskId, next_fire_at: DateTime<Utc>) {
        if let Some(timer) = self.timers.lock().await.get_mut(&task_id) {
            timer.reschedule(next_fire_at);
        }
    }
}

/// Next fire instant following a delivery recorded at `last`, clamped
/// forward so the timer never lands in the past.
fn next_after_delivery(cadence: Cadence, last: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let next = cadence.next_fire_after(last);
    if next <= now {
        cadence.next_fire_after(now)
    } else {
        next
    }
}
