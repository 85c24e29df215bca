//! Task aggregate root and related lifecycle types.

use super::{Priority, TaskDomainError, TaskId, TaskState, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated draft of a task prior to persistence.
///
/// The task store assigns the identifier, so a draft carries every durable
/// field except the id and lifecycle bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    owner_id: UserId,
    text: String,
    priority: Priority,
    assigned_by_name: String,
    assigned_by_id: UserId,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a validated task draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskText`] when `text` is empty after
    /// trimming.
    pub fn new(
        owner_id: UserId,
        text: impl Into<String>,
        priority: Priority,
        assigned_by_name: impl Into<String>,
        assigned_by_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TaskDomainError::EmptyTaskText);
        }
        Ok(Self {
            owner_id,
            text,
            priority,
            assigned_by_name: assigned_by_name.into(),
            assigned_by_id,
            created_at: clock.utc(),
        })
    }

    /// Returns the owner the task is assigned to.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the task text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the display label of the assigning user.
    #[must_use]
    pub fn assigned_by_name(&self) -> &str {
        &self.assigned_by_name
    }

    /// Returns the identifier of the assigning user.
    #[must_use]
    pub const fn assigned_by_id(&self) -> UserId {
        self.assigned_by_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identifier.
    pub owner_id: UserId,
    /// Persisted task text.
    pub text: String,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted display label of the assigning user.
    pub assigned_by_name: String,
    /// Persisted identifier of the assigning user.
    pub assigned_by_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted timestamp of the latest reminder delivery, if any.
    pub last_reminder_sent_at: Option<DateTime<Utc>>,
    /// Persisted lifecycle state.
    pub state: TaskState,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: UserId,
    text: String,
    priority: Priority,
    assigned_by_name: String,
    assigned_by_id: UserId,
    created_at: DateTime<Utc>,
    last_reminder_sent_at: Option<DateTime<Utc>>,
    state: TaskState,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            text: data.text,
            priority: data.priority,
            assigned_by_name: data.assigned_by_name,
            assigned_by_id: data.assigned_by_id,
            created_at: data.created_at,
            last_reminder_sent_at: data.last_reminder_sent_at,
            state: data.state,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owner the task is assigned to.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the task text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the display label of the assigning user.
    #[must_use]
    pub fn assigned_by_name(&self) -> &str {
        &self.assigned_by_name
    }

    /// Returns the identifier of the assigning user.
    #[must_use]
    pub const fn assigned_by_id(&self) -> UserId {
        self.assigned_by_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the latest reminder delivery, if any.
    #[must_use]
    pub const fn last_reminder_sent_at(&self) -> Option<DateTime<Utc>> {
        self.last_reminder_sent_at
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Marks the task as completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is not
    /// open.
    pub fn complete(&mut self) -> Result<(), TaskDomainError> {
        self.transition_to(TaskState::Completed)
    }

    /// Marks the task as rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is not
    /// open.
    pub fn reject(&mut self) -> Result<(), TaskDomainError> {
        self.transition_to(TaskState::Rejected)
    }

    /// Records a reminder delivery timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReminderTimestampRegression`] when
    /// `sent_at` is older than the recorded delivery timestamp.
    pub fn record_reminder_sent(&mut self, sent_at: DateTime<Utc>) -> Result<(), TaskDomainError> {
        if self.last_reminder_sent_at.is_some_and(|last| sent_at < last) {
            return Err(TaskDomainError::ReminderTimestampRegression(self.id));
        }
        self.last_reminder_sent_at = Some(sent_at);
        Ok(())
    }

    fn transition_to(&mut self, target: TaskState) -> Result<(), TaskDomainError> {
        if !self.state.can_transition_to(target) {
            return Err(TaskDomainError::InvalidTransition {
                task: self.id,
                from: self.state,
                to: target,
            });
        }
        self.state = target;
        Ok(())
    }
}
