//! Shared fixtures for reminder tests.

use crate::assignment::{
    adapters::InMemoryTaskStore,
    domain::{NewTask, Priority, Task, UserId},
    ports::TaskStore,
    services::MessageCatalog,
};
use crate::reminder::services::ReminderScheduler;
use crate::testing::{ManualClock, RecordingNotifier};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

pub const OWNER: UserId = UserId::new(42);
pub const ASSIGNER: UserId = UserId::new(7);

pub type TestScheduler = ReminderScheduler<InMemoryTaskStore, RecordingNotifier, ManualClock>;

pub struct SchedulerHarness {
    pub store: Arc<InMemoryTaskStore>,
    pub notifier: RecordingNotifier,
    pub clock: ManualClock,
    pub scheduler: Arc<TestScheduler>,
}

/// A mid-January wall-clock time, clear of daylight-saving transitions.
pub fn local(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .expect("fixed test date should be valid")
}

pub fn harness_at(now: NaiveDateTime) -> SchedulerHarness {
    let store = Arc::new(InMemoryTaskStore::new());
    let notifier = RecordingNotifier::new();
    let clock = ManualClock::at_local(now);
    let messages = Arc::new(MessageCatalog::new().expect("templates should parse"));
    let scheduler = Arc::new(ReminderScheduler::new(
        Arc::clone(&store),
        Arc::new(notifier.clone()),
        messages,
        Arc::new(clock.clone()),
    ));
    SchedulerHarness {
        store,
        notifier,
        clock,
        scheduler,
    }
}

/// Creates and persists an open task owned by [`OWNER`].
pub async fn open_task(harness: &SchedulerHarness, text: &str, priority: Priority) -> Task {
    let draft = NewTask::new(OWNER, text, priority, "alice", ASSIGNER, &harness.clock)
        .expect("draft should validate");
    harness
        .store
        .create_task(&draft)
        .await
        .expect("creation should succeed")
}
