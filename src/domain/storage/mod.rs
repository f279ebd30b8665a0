//! Storage domain - append-only persistence abstraction shared by the
//! question cache and chat history

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::Storage;
