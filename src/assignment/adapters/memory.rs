//! In-memory task store for tests and single-process deployments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::assignment::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskState, User, UserId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_task_id: i64,
    tasks: BTreeMap<TaskId, Task>,
    users: HashMap<UserId, User>,
}

impl InMemoryState {
    fn task_mut(&mut self, id: TaskId) -> TaskStoreResult<&mut Task> {
        self.tasks.get_mut(&id).ok_or(TaskStoreError::NotFound(id))
    }
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, InMemoryState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::storage(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::storage(std::io::Error::other(err.to_string())))
    }
}

/// Returns open tasks matching `filter`, ordered by creation time ascending.
fn collect_open(state: &InMemoryState, filter: impl Fn(&Task) -> bool) -> Vec<Task> {
    let mut tasks: Vec<Task> = state
        .tasks
        .values()
        .filter(|task| task.state() == TaskState::Open && filter(task))
        .cloned()
        .collect();
    tasks.sort_by_key(|task| (task.created_at(), task.id()));
    tasks
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create_task(&self, draft: &NewTask) -> TaskStoreResult<Task> {
        let mut state = self.write()?;
        state.next_task_id += 1;
        let task = Task::from_persisted(PersistedTaskData {
            id: TaskId::new(state.next_task_id),
            owner_id: draft.owner_id(),
            text: draft.text().to_owned(),
            priority: draft.priority(),
            assigned_by_name: draft.assigned_by_name().to_owned(),
            assigned_by_id: draft.assigned_by_id(),
            created_at: draft.created_at(),
            last_reminder_sent_at: None,
            state: TaskState::Open,
        });
        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn list_open_tasks_by_owner(&self, owner_id: UserId) -> TaskStoreResult<Vec<Task>> {
        let guard = self.read()?;
        Ok(collect_open(&guard, |task| task.owner_id() == owner_id))
    }

    async fn list_all_open_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let guard = self.read()?;
        Ok(collect_open(&guard, |_| true))
    }

    async fn set_state(&self, id: TaskId, state: TaskState) -> TaskStoreResult<()> {
        let mut guard = self.write()?;
        let task = guard.task_mut(id)?;
        let updated = Task::from_persisted(PersistedTaskData {
            id: task.id(),
            owner_id: task.owner_id(),
            text: task.text().to_owned(),
            priority: task.priority(),
            assigned_by_name: task.assigned_by_name().to_owned(),
            assigned_by_id: task.assigned_by_id(),
            created_at: task.created_at(),
            last_reminder_sent_at: task.last_reminder_sent_at(),
            state,
        });
        *task = updated;
        Ok(())
    }

    async fn set_last_reminder_sent(
        &self,
        id: TaskId,
        sent_at: DateTime<Utc>,
    ) -> TaskStoreResult<()> {
        let mut guard = self.write()?;
        let task = guard.task_mut(id)?;
        // A regression is dropped so the stored timestamp stays monotonic.
        task.record_reminder_sent(sent_at).ok();
        Ok(())
    }

    async fn upsert_user(&self, user: &User) -> TaskStoreResult<()> {
        self.write()?.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_user(&self, id: UserId) -> TaskStoreResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }
}
