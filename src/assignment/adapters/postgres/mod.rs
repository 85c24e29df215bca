//! `PostgreSQL` adapter for durable task and user storage.

mod models;
mod schema;
mod store;

pub use store::{PostgresTaskStore, TaskPgPool};
