//! Users participating in task assignment.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A user known to the system.
///
/// Users are created on first interaction and never deleted; only the
/// display name is refreshed on repeat contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    display_name: String,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
