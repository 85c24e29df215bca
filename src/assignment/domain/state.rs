//! Task lifecycle state.

use super::ParseTaskStateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an assigned task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// The task awaits action by its owner.
    Open,
    /// The owner finished the task.
    Completed,
    /// The owner declined the task.
    Rejected,
}

impl TaskState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether the lifecycle may move from this state to `target`.
    ///
    /// The only admitted edges are `Open -> Completed` and
    /// `Open -> Rejected`; both targets are terminal.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Completed) | (Self::Open, Self::Rejected)
        )
    }

    /// Returns whether this state admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}
