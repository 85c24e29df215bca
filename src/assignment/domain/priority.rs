//! Task priority levels.

use super::ParsePriorityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority assigned to a task at creation.
///
/// The priority is set exactly once and is immutable thereafter; the
/// reminder cadence is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Needs attention within the hour.
    Urgent,
    /// Needs attention within the working day.
    Medium,
    /// Low urgency, picked up once a day.
    Low,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Returns the human-readable label used in notifications.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "urgent" => Ok(Self::Urgent),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
