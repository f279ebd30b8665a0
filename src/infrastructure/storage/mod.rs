//! Storage infrastructure - in-memory and Postgres backends

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StorageBackend, StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use postgres::{PostgresConfig, PostgresStorage};
