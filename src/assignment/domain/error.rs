//! Error types for assignment domain validation and parsing.

use super::{TaskId, TaskState};
use thiserror::Error;

/// Errors returned while constructing or mutating assignment domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task text is empty after trimming.
    #[error("task text must not be empty")]
    EmptyTaskText,

    /// The requested lifecycle transition is not admitted.
    #[error("task {task} cannot transition from {from} to {to}")]
    InvalidTransition {
        /// Task whose transition was rejected.
        task: TaskId,
        /// Current lifecycle state.
        from: TaskState,
        /// Requested lifecycle state.
        to: TaskState,
    },

    /// A reminder timestamp older than the recorded one was supplied.
    #[error("task {0} reminder timestamp must be monotonically non-decreasing")]
    ReminderTimestampRegression(TaskId),
}

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing a task state from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);
