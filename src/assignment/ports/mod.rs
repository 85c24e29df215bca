//! Port contracts for task persistence and outbound notification.

mod notifier;
mod store;

pub use notifier::{Notifier, NotifierError, NotifierResult};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
