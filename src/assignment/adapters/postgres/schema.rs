//! Diesel schema for task assignment persistence.

diesel::table! {
    /// Users known to the system.
    users (id) {
        /// Stable numeric user identity.
        id -> Int8,
        /// Display name refreshed on each interaction.
        #[max_length = 255]
        display_name -> Varchar,
    }
}

diesel::table! {
    /// Assigned tasks with reminder bookkeeping.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// User the task is assigned to.
        owner_id -> Int8,
        /// Task text.
        text -> Text,
        /// Task priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Display label of the assigning user.
        #[max_length = 255]
        assigned_by_name -> Varchar,
        /// Identifier of the assigning user.
        assigned_by_id -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest reminder delivery timestamp.
        last_reminder_sent_at -> Nullable<Timestamptz>,
        /// Task lifecycle state.
        #[max_length = 20]
        state -> Varchar,
    }
}
