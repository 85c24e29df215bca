//! Outbound notification texts rendered from named templates.

use crate::assignment::domain::Task;
use minijinja::{Environment, context};
use thiserror::Error;

const ASSIGNMENT_TEMPLATE: &str = "\
🎯 You have been assigned a new task:

📝 Task: {{ text }}
🚦 Priority: {{ priority }}
👤 Assigned by: {{ assigned_by }}

Reminders will arrive until the task is resolved.";

const REMINDER_TEMPLATE: &str = "\
⏰ Reminder:

📝 Task: {{ text }}
🚦 Priority: {{ priority }}
👤 Assigned by: {{ assigned_by }}";

const COMPLETION_TEMPLATE: &str = "\
✅ {{ owner }} completed the task you assigned:

📝 Task: {{ text }}
🚦 Priority: {{ priority }}";

const REJECTION_TEMPLATE: &str = "\
🚫 {{ owner }} cannot complete the task you assigned:

📝 Task: {{ text }}
🚦 Priority: {{ priority }}
📌 Reason: {{ reason }}";

/// Fallback wording for an empty rejection reason.
const NO_REASON_GIVEN: &str = "no reason given";

/// Error returned when a notification template fails to parse or render.
#[derive(Debug, Error)]
#[error("notification template error: {0}")]
pub struct MessageTemplateError(#[from] minijinja::Error);

/// Catalogue of outbound notification messages.
#[derive(Debug)]
pub struct MessageCatalog {
    env: Environment<'static>,
}

impl MessageCatalog {
    /// Creates the catalogue with all notification templates loaded.
    ///
    /// # Errors
    ///
    /// Returns [`MessageTemplateError`] when a template fails to parse.
    pub fn new() -> Result<Self, MessageTemplateError> {
        let mut env = Environment::new();
        env.add_template("assignment", ASSIGNMENT_TEMPLATE)?;
        env.add_template("reminder", REMINDER_TEMPLATE)?;
        env.add_template("completion", COMPLETION_TEMPLATE)?;
        env.add_template("rejection", REJECTION_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders the "task assigned" message sent to the task owner.
    ///
    /// # Errors
    ///
    /// Returns [`MessageTemplateError`] when rendering fails.
    pub fn assignment(&self, task: &Task) -> Result<String, MessageTemplateError> {
        let rendered = self.env.get_template("assignment")?.render(context! {
            text => task.text(),
            priority => task.priority().label(),
            assigned_by => task.assigned_by_name(),
        })?;
        Ok(rendered)
    }

    /// Renders the recurring reminder message sent to the task owner.
    ///
    /// # Errors
    ///
    /// Returns [`MessageTemplateError`] when rendering fails.
    pub fn reminder(&self, task: &Task) -> Result<String, MessageTemplateError> {
        let rendered = self.env.get_template("reminder")?.render(context! {
            text => task.text(),
            priority => task.priority().label(),
            assigned_by => task.assigned_by_name(),
        })?;
        Ok(rendered)
    }

    /// Renders the completion message sent to the assigning user.
    ///
    /// # Errors
    ///
    /// Returns [`MessageTemplateError`] when rendering fails.
    pub fn completion(&self, task: &Task, owner_name: &str) -> Result<String, MessageTemplateError> {
        let rendered = self.env.get_template("completion")?.render(context! {
            owner => owner_name,
            text => task.text(),
            priority => task.priority().label(),
        })?;
        Ok(rendered)
    }

    /// Renders the rejection message sent to the assigning user.
    ///
    /// An empty `reason` is rendered as "no reason given" rather than
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MessageTemplateError`] when rendering fails.
    pub fn rejection(
        &self,
        task: &Task,
        owner_name: &str,
        reason: &str,
    ) -> Result<String, MessageTemplateError> {
        let reported_reason = if reason.trim().is_empty() {
            NO_REASON_GIVEN
        } else {
            reason
        };
        let rendered = self.env.get_template("rejection")?.render(context! {
            owner => owner_name,
            text => task.text(),
            priority => task.priority().label(),
            reason => reported_reason,
        })?;
        Ok(rendered)
    }
}
