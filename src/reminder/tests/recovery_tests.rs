//! Tests for restart recovery of reminder timers.

use super::support::{OWNER, harness_at, local, open_task};
use crate::assignment::domain::{Priority, TaskState};
use crate::assignment::ports::TaskStore;
use crate::reminder::services::{RecoveryManager, recovery_plan};
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recovery_arms_stale_tasks_immediately() {
    let harness = harness_at(local(10, 0, 0));
    let never_reminded = open_task(&harness, "Never reminded", Priority::Urgent).await;
    let stale = open_task(&harness, "Stale", Priority::Urgent).await;
    let now = harness.clock.utc();
    harness
        .store
        .set_last_reminder_sent(stale.id(), now - TimeDelta::hours(2))
        .await
        .expect("update should succeed");

    let tasks = harness
        .store
        .list_all_open_tasks()
        .await
        .expect("listing should succeed");
    let plan = recovery_plan(&tasks, now);

    assert_eq!(plan.len(), 2);
    for timer in &plan {
        assert_eq!(timer.next_fire_at(), now);
    }
    assert!(plan.iter().any(|timer| timer.task_id() == never_reminded.id()));
    assert!(plan.iter().any(|timer| timer.task_id() == stale.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recovery_continues_a_fresh_cadence() {
    let harness = harness_at(local(10, 0, 0));
    let task = open_task(&harness, "Recently reminded", Priority::Urgent).await;
    let now = harness.clock.utc();
    let last_sent = now - TimeDelta::minutes(10);
    harness
        .store
        .set_last_reminder_sent(task.id(), last_sent)
        .await
        .expect("update should succeed");

    let tasks = harness
        .store
        .list_all_open_tasks()
        .await
        .expect("listing should succeed");
    let plan = recovery_plan(&tasks, now);

    assert_eq!(plan.len(), 1);
    assert!(
        plan.first()
            .is_some_and(|timer| timer.next_fire_at() == last_sent + TimeDelta::hours(1))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recovery_skips_terminal_tasks() {
    let harness = harness_at(local(10, 0, 0));
    let open = open_task(&harness, "Still open", Priority::Medium).await;
    let done = open_task(&harness, "Done", Priority::Medium).await;
    harness
        .store
        .set_state(done.id(), TaskState::Completed)
        .await
        .expect("state update should succeed");

    let manager = RecoveryManager::new(
        Arc::clone(&harness.store),
        Arc::clone(&harness.scheduler),
        Arc::new(harness.clock.clone()),
    );
    let armed = manager.run().await.expect("recovery should succeed");

    assert_eq!(armed, 1);
    assert!(harness.scheduler.armed_timer(open.id()).await.is_some());
    assert!(harness.scheduler.armed_timer(done.id()).await.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recovery_is_idempotent_between_ticks() {
    let harness = harness_at(local(10, 0, 0));
    let task = open_task(&harness, "Recovered twice", Priority::Low).await;
    let now = harness.clock.utc();
    harness
        .store
        .set_last_reminder_sent(task.id(), now - TimeDelta::hours(3))
        .await
        .expect("update should succeed");

    let manager = RecoveryManager::new(
        Arc::clone(&harness.store),
        Arc::clone(&harness.scheduler),
        Arc::new(harness.clock.clone()),
    );

    manager.run().await.expect("first recovery should succeed");
    let first = harness.scheduler.armed_timer(task.id()).await;

    manager.run().await.expect("second recovery should succeed");
    let second = harness.scheduler.armed_timer(task.id()).await;

    assert_eq!(first, second);
    assert_eq!(harness.scheduler.armed_count().await, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recovery_shortly_after_delivery_sends_no_duplicate() {
    let harness = harness_at(local(10, 0, 0));
    let task = open_task(&harness, "Just reminded", Priority::Urgent).await;
    let now = harness.clock.utc();
    harness
        .store
        .set_last_reminder_sent(task.id(), now - TimeDelta::seconds(10))
        .await
        .expect("update should succeed");

    let manager = RecoveryManager::new(
        Arc::clone(&harness.store),
        Arc::clone(&harness.scheduler),
        Arc::new(harness.clock.clone()),
    );
    manager.run().await.expect("recovery should succeed");

    harness.scheduler.tick().await;

    assert!(harness.notifier.sent_to(OWNER).is_empty());
}
