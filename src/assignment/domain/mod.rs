//! Domain model for task assignment.
//!
//! The assignment domain models users, the tasks handed between them, task
//! priorities, and the closed lifecycle state machine. All infrastructure
//! concerns are kept outside the domain boundary.

mod error;
mod ids;
mod priority;
mod state;
mod task;
mod user;

pub use error::{ParsePriorityError, ParseTaskStateError, TaskDomainError};
pub use ids::{TaskId, UserId};
pub use priority::Priority;
pub use state::TaskState;
pub use task::{NewTask, PersistedTaskData, Task};
pub use user::User;
