//! Task assignment between users.
//!
//! This module models tasks handed from one user to another, enforces the
//! task lifecycle (open until completed or rejected), and exposes the
//! registry operations consumed by the conversational front-end. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
