//! Unit tests for the notification message catalogue.

use crate::assignment::domain::{PersistedTaskData, Priority, Task, TaskId, TaskState, UserId};
use crate::assignment::services::MessageCatalog;
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

#[fixture]
fn catalog() -> MessageCatalog {
    MessageCatalog::new().expect("templates should parse")
}

#[fixture]
fn task() -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(1),
        owner_id: UserId::new(42),
        text: "Deploy the release".to_owned(),
        priority: Priority::Urgent,
        assigned_by_name: "alice".to_owned(),
        assigned_by_id: UserId::new(7),
        created_at: DefaultClock.utc(),
        last_reminder_sent_at: None,
        state: TaskState::Open,
    })
}

#[rstest]
fn assignment_message_carries_task_fields(catalog: MessageCatalog, task: Task) {
    let text = catalog
        .assignment(&task)
        .expect("rendering should succeed");

    assert!(text.contains("Deploy the release"));
    assert!(text.contains("Urgent"));
    assert!(text.contains("alice"));
    assert!(text.contains("Reminders will arrive"));
}

#[rstest]
fn reminder_message_carries_task_fields(catalog: MessageCatalog, task: Task) {
    let text = catalog.reminder(&task).expect("rendering should succeed");

    assert!(text.starts_with("⏰ Reminder:"));
    assert!(text.contains("Deploy the release"));
    assert!(text.contains("Urgent"));
    assert!(text.contains("alice"));
}

#[rstest]
fn completion_message_addresses_owner_by_name(catalog: MessageCatalog, task: Task) {
    let text = catalog
        .completion(&task, "bob")
        .expect("rendering should succeed");

    assert!(text.starts_with("✅ bob completed"));
    assert!(text.contains("Deploy the release"));
}

#[rstest]
fn rejection_message_carries_reason(catalog: MessageCatalog, task: Task) {
    let text = catalog
        .rejection(&task, "bob", "on vacation this week")
        .expect("rendering should succeed");

    assert!(text.starts_with("🚫 bob cannot complete"));
    assert!(text.contains("Reason: on vacation this week"));
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_rejection_reason_reads_as_no_reason_given(
    catalog: MessageCatalog,
    task: Task,
    #[case] reason: &str,
) {
    let text = catalog
        .rejection(&task, "bob", reason)
        .expect("rendering should succeed");

    assert!(text.contains("Reason: no reason given"));
}
