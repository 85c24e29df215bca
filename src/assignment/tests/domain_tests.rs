//! Unit tests for assignment domain types.

use crate::assignment::domain::{
    NewTask, PersistedTaskData, Priority, Task, TaskDomainError, TaskId, TaskState, UserId,
};
use chrono::TimeDelta;
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn open_task(clock: &impl Clock) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(1),
        owner_id: UserId::new(42),
        text: "Deploy the release".to_owned(),
        priority: Priority::Urgent,
        assigned_by_name: "alice".to_owned(),
        assigned_by_id: UserId::new(7),
        created_at: clock.utc(),
        last_reminder_sent_at: None,
        state: TaskState::Open,
    })
}

#[rstest]
#[case("urgent", Priority::Urgent)]
#[case("medium", Priority::Medium)]
#[case("low", Priority::Low)]
#[case(" Urgent ", Priority::Urgent)]
fn priority_parses_canonical_and_padded_forms(#[case] input: &str, #[case] expected: Priority) {
    assert_eq!(Priority::try_from(input), Ok(expected));
}

#[rstest]
fn priority_rejects_unknown_value() {
    let result = Priority::try_from("asap");
    assert!(result.is_err());
}

#[rstest]
#[case(Priority::Urgent, "Urgent")]
#[case(Priority::Medium, "Medium")]
#[case(Priority::Low, "Low")]
fn priority_label_is_human_readable(#[case] priority: Priority, #[case] label: &str) {
    assert_eq!(priority.label(), label);
}

#[rstest]
#[case("open", TaskState::Open)]
#[case("completed", TaskState::Completed)]
#[case("rejected", TaskState::Rejected)]
fn state_round_trips_through_storage_form(#[case] stored: &str, #[case] state: TaskState) {
    assert_eq!(state.as_str(), stored);
    assert_eq!(TaskState::try_from(stored), Ok(state));
}

#[rstest]
fn state_rejects_unknown_storage_value() {
    assert!(TaskState::try_from("paused").is_err());
}

#[rstest]
fn new_task_rejects_empty_text(clock: DefaultClock) {
    let result = NewTask::new(
        UserId::new(42),
        "   ",
        Priority::Medium,
        "alice",
        UserId::new(7),
        &clock,
    );
    assert_eq!(result, Err(TaskDomainError::EmptyTaskText));
}

#[rstest]
fn new_task_keeps_supplied_fields(clock: DefaultClock) {
    let draft = NewTask::new(
        UserId::new(42),
        "Deploy the release",
        Priority::Low,
        "alice",
        UserId::new(7),
        &clock,
    )
    .expect("draft should validate");

    assert_eq!(draft.owner_id(), UserId::new(42));
    assert_eq!(draft.text(), "Deploy the release");
    assert_eq!(draft.priority(), Priority::Low);
    assert_eq!(draft.assigned_by_name(), "alice");
    assert_eq!(draft.assigned_by_id(), UserId::new(7));
}

#[rstest]
fn complete_moves_open_task_to_terminal_state(clock: DefaultClock) {
    let mut task = open_task(&clock);
    task.complete().expect("open task should complete");
    assert_eq!(task.state(), TaskState::Completed);
    assert!(task.state().is_terminal());
}

#[rstest]
fn reject_moves_open_task_to_terminal_state(clock: DefaultClock) {
    let mut task = open_task(&clock);
    task.reject().expect("open task should reject");
    assert_eq!(task.state(), TaskState::Rejected);
}

#[rstest]
fn terminal_task_rejects_further_transitions(clock: DefaultClock) {
    let mut task = open_task(&clock);
    task.complete().expect("open task should complete");

    let result = task.reject();

    assert_eq!(
        result,
        Err(TaskDomainError::InvalidTransition {
            task: TaskId::new(1),
            from: TaskState::Completed,
            to: TaskState::Rejected,
        })
    );
}

#[rstest]
fn reminder_timestamp_is_monotonic(clock: DefaultClock) {
    let mut task = open_task(&clock);
    let first = clock.utc();
    task.record_reminder_sent(first)
        .expect("first delivery should record");

    let regression = task.record_reminder_sent(first - TimeDelta::seconds(30));

    assert_eq!(
        regression,
        Err(TaskDomainError::ReminderTimestampRegression(TaskId::new(1)))
    );
    assert_eq!(task.last_reminder_sent_at(), Some(first));

    task.record_reminder_sent(first + TimeDelta::seconds(30))
        .expect("newer delivery should record");
    assert_eq!(
        task.last_reminder_sent_at(),
        Some(first + TimeDelta::seconds(30))
    );
}
