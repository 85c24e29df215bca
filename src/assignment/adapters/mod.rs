//! Adapter implementations of the assignment ports.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::InMemoryTaskStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresTaskStore;
