//! Nudger: task assignment and reminder scheduling core.
//!
//! This crate provides the lifecycle engine behind a task-handoff service:
//! users assign short tasks to each other, the core tracks each task from
//! creation to completion or rejection, and a scheduler reminds the task
//! owner on a per-priority cadence until the task is resolved.
//!
//! # Architecture
//!
//! Nudger follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! The conversational front-end and the outbound chat transport are external
//! collaborators: the front-end drives the [`assignment`] registry
//! operations, and deliveries go through the abstract notifier port.
//!
//! # Modules
//!
//! - [`assignment`]: Task and user model, persistence/notification ports,
//!   and the task registry service
//! - [`reminder`]: Reminder cadences, the scheduler, and restart recovery
//! - [`testing`]: Deterministic test doubles for the clock and notifier

pub mod assignment;
pub mod reminder;
pub mod testing;
