//! Diesel row models for task assignment persistence.

use super::schema::{tasks, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// User the task is assigned to.
    pub owner_id: i64,
    /// Task text.
    pub text: String,
    /// Task priority.
    pub priority: String,
    /// Display label of the assigning user.
    pub assigned_by_name: String,
    /// Identifier of the assigning user.
    pub assigned_by_id: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest reminder delivery timestamp.
    pub last_reminder_sent_at: Option<DateTime<Utc>>,
    /// Task lifecycle state.
    pub state: String,
}

/// Insert model for task records; the identifier comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// User the task is assigned to.
    pub owner_id: i64,
    /// Task text.
    pub text: String,
    /// Task priority.
    pub priority: String,
    /// Display label of the assigning user.
    pub assigned_by_name: String,
    /// Identifier of the assigning user.
    pub assigned_by_id: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest reminder delivery timestamp.
    pub last_reminder_sent_at: Option<DateTime<Utc>>,
    /// Task lifecycle state.
    pub state: String,
}

/// Row model for user records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Stable numeric user identity.
    pub id: i64,
    /// Display name refreshed on each interaction.
    pub display_name: String,
}
