//! Service layer for task assignment.

mod messages;
mod registry;

pub use messages::{MessageCatalog, MessageTemplateError};
pub use registry::{CreateTaskRequest, TaskRegistry, TaskRegistryError, TaskRegistryResult};
