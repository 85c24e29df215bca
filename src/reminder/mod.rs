//! Recurring reminders for open tasks.
//!
//! This module derives reminder cadences from task priority, keeps one
//! armed timer per open task, delivers reminder notifications inside the
//! daily delivery window, and rebuilds all timer state from the task store
//! after a restart:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
