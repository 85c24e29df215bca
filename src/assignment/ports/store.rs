//! Store port for durable task and user records.

use crate::assignment::domain::{NewTask, Task, TaskId, TaskState, User, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Durable record of users, tasks, and reminder bookkeeping.
///
/// The store is the single source of truth for every durable field; all
/// in-memory scheduler state must be reconstructible from it. Each
/// operation is transactionally consistent on its own — callers must not
/// assume partial writes are rolled back across operations.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a task draft and returns the stored aggregate with its
    /// store-assigned identifier, `Open` state, and no reminder recorded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Storage`] on persistence failure.
    async fn create_task(&self, draft: &NewTask) -> TaskStoreResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns the open tasks assigned to `owner_id`, ordered by creation
    /// time ascending.
    async fn list_open_tasks_by_owner(&self, owner_id: UserId) -> TaskStoreResult<Vec<Task>>;

    /// Returns every open task, ordered by creation time ascending.
    async fn list_all_open_tasks(&self) -> TaskStoreResult<Vec<Task>>;

    /// Persists a lifecycle state change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn set_state(&self, id: TaskId, state: TaskState) -> TaskStoreResult<()>;

    /// Persists a reminder delivery timestamp.
    ///
    /// The stored timestamp is monotonically non-decreasing: a `sent_at`
    /// older than the recorded value is ignored rather than applied.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn set_last_reminder_sent(
        &self,
        id: TaskId,
        sent_at: DateTime<Utc>,
    ) -> TaskStoreResult<()>;

    /// Creates the user or refreshes its display name.
    async fn upsert_user(&self, user: &User) -> TaskStoreResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user has never interacted with the system.
    async fn find_user(&self, id: UserId) -> TaskStoreResult<Option<User>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
