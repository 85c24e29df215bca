//! Task registry: the command surface consumed by the front-end.

use crate::assignment::{
    domain::{NewTask, Priority, Task, TaskDomainError, TaskId, TaskState, User, UserId},
    ports::{Notifier, TaskStore, TaskStoreError},
    services::MessageCatalog,
};
use crate::reminder::services::ReminderScheduler;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    owner_id: UserId,
    text: String,
    priority: Priority,
    assigned_by_name: String,
    assigned_by_id: UserId,
}

impl CreateTaskRequest {
    /// Creates a request with all task fields.
    #[must_use]
    pub fn new(
        owner_id: UserId,
        text: impl Into<String>,
        priority: Priority,
        assigned_by_name: impl Into<String>,
        assigned_by_id: UserId,
    ) -> Self {
        Self {
            owner_id,
            text: text.into(),
            priority,
            assigned_by_name: assigned_by_name.into(),
            assigned_by_id,
        }
    }
}

/// Service-level errors for registry operations.
#[derive(Debug, Error)]
pub enum TaskRegistryError {
    /// Input validation failed before any persistence.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The task does not exist or is not owned by the requester.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task already reached a terminal state.
    #[error("task {task} is already {state}")]
    InvalidState {
        /// Task whose transition was rejected.
        task: TaskId,
        /// Terminal state the task is in.
        state: TaskState,
    },

    /// The task store failed; the operation did not happen.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for registry operations.
pub type TaskRegistryResult<T> = Result<T, TaskRegistryError>;

/// How a task left the open state, for resolution notifications.
enum Resolution {
    Completed,
    Rejected { reason: String },
}

/// Task lifecycle command service.
///
/// The registry holds no authoritative state of its own: every durable
/// field lives in the injected store, and timer state lives in the
/// scheduler. Notifications are best-effort — a delivery failure is logged
/// and never fails the task-state operation that triggered it.
pub struct TaskRegistry<S, N, C>
where
    S: TaskStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    notifier: Arc<N>,
    scheduler: Arc<ReminderScheduler<S, N, C>>,
    messages: Arc<MessageCatalog>,
    clock: Arc<C>,
}

impl<S, N, C> TaskRegistry<S, N, C>
where
    S: TaskStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a task registry.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        notifier: Arc<N>,
        scheduler: Arc<ReminderScheduler<S, N, C>>,
        messages: Arc<MessageCatalog>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            notifier,
            scheduler,
            messages,
            clock,
        }
    }

    /// Registers a user or refreshes their display name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Store`] when persistence fails.
    pub async fn upsert_user(
        &self,
        id: UserId,
        display_name: impl Into<String> + Send,
    ) -> TaskRegistryResult<()> {
        self.store.upsert_user(&User::new(id, display_name)).await?;
        Ok(())
    }

    /// Creates an open task, arms its reminder timer, and notifies the
    /// owner.
    ///
    /// The "task assigned" notification is fire-and-forget: a failure is
    /// logged and never aborts task creation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Validation`] when the task text is
    /// empty, or [`TaskRegistryError::Store`] when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskRegistryResult<Task> {
        let draft = NewTask::new(
            request.owner_id,
            request.text,
            request.priority,
            request.assigned_by_name,
            request.assigned_by_id,
            self.clock.as_ref(),
        )?;
        let task = self.store.create_task(&draft).await?;
        self.scheduler.arm(&task).await;
        self.notify_assignment(&task).await;
        Ok(task)
    }

    /// Returns the open tasks of `owner_id`, oldest first.
    ///
    /// An owner without open tasks yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Store`] when the listing fails.
    pub async fn list_open_tasks(&self, owner_id: UserId) -> TaskRegistryResult<Vec<Task>> {
        Ok(self.store.list_open_tasks_by_owner(owner_id).await?)
    }

    /// Completes an open task owned by `requester_id` and notifies the
    /// assigning user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] when the task does not exist
    /// or belongs to another owner, and [`TaskRegistryError::InvalidState`]
    /// when the task is already terminal.
    pub async fn complete_task(
        &self,
        task_id: TaskId,
        requester_id: UserId,
    ) -> TaskRegistryResult<Task> {
        let task = self.resolve(task_id, requester_id, Task::complete).await?;
        self.notify_resolution(&task, Resolution::Completed).await;
        Ok(task)
    }

    /// Rejects an open task owned by `requester_id` and notifies the
    /// assigning user with the given reason.
    ///
    /// An empty reason is accepted and reported as "no reason given".
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] when the task does not exist
    /// or belongs to another owner, and [`TaskRegistryError::InvalidState`]
    /// when the task is already terminal.
    pub async fn reject_task(
        &self,
        task_id: TaskId,
        requester_id: UserId,
        reason: impl Into<String> + Send,
    ) -> TaskRegistryResult<Task> {
        let task = self.resolve(task_id, requester_id, Task::reject).await?;
        self.notify_resolution(
            &task,
            Resolution::Rejected {
                reason: reason.into(),
            },
        )
        .await;
        Ok(task)
    }

    /// Applies a terminal transition as one atomic unit: validate, persist
    /// the state, and disarm the timer under the scheduler's transition
    /// guard.
    async fn resolve(
        &self,
        task_id: TaskId,
        requester_id: UserId,
        transition: impl FnOnce(&mut Task) -> Result<(), TaskDomainError> + Send,
    ) -> TaskRegistryResult<Task> {
        let _transition_guard = self.scheduler.transition_guard().await;

        let mut task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or(TaskRegistryError::NotFound(task_id))?;
        if task.owner_id() != requester_id {
            // Ownership is not revealed to other users.
            return Err(TaskRegistryError::NotFound(task_id));
        }
        if task.state().is_terminal() {
            return Err(TaskRegistryError::InvalidState {
                task: task_id,
                state: task.state(),
            });
        }
        transition(&mut task)?;
        self.store.set_state(task_id, task.state()).await?;
        self.scheduler.disarm(task_id).await;
        Ok(task)
    }

    async fn notify_assignment(&self, task: &Task) {
        match self.messages.assignment(task) {
            Ok(text) => {
                if let Err(error) = self.notifier.send(task.owner_id(), &text).await {
                    warn!(task_id = %task.id(), %error, "assignment notification failed");
                }
            }
            Err(error) => {
                warn!(task_id = %task.id(), %error, "assignment message rendering failed");
            }
        }
    }

    async fn notify_resolution(&self, task: &Task, resolution: Resolution) {
        let owner_name = self.owner_display_name(task).await;
        let rendered = match resolution {
            Resolution::Completed => self.messages.completion(task, &owner_name),
            Resolution::Rejected { reason } => {
                self.messages.rejection(task, &owner_name, &reason)
            }
        };
        match rendered {
            Ok(text) => {
                if let Err(error) = self.notifier.send(task.assigned_by_id(), &text).await {
                    warn!(task_id = %task.id(), %error, "resolution notification failed");
                }
            }
            Err(error) => {
                warn!(task_id = %task.id(), %error, "resolution message rendering failed");
            }
        }
    }

    /// Resolves the owner's display name, falling back to a numeric label
    /// when the user record is missing or unreadable.
    async fn owner_display_name(&self, task: &Task) -> String {
        match self.store.find_user(task.owner_id()).await {
            Ok(Some(user)) => user.display_name().to_owned(),
            Ok(None) => format!("user {}", task.owner_id()),
            Err(error) => {
                warn!(task_id = %task.id(), %error, "owner lookup failed");
                format!("user {}", task.owner_id())
            }
        }
    }
}
