//! Storage entity traits

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Key as a string, for backends that index by text
    fn as_str(&self) -> &str;
}

/// Trait for records a `Storage` backend can hold
///
/// `created_at` orders `Storage::list` on backends without an intrinsic
/// insertion order.
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    type Key: StorageKey;

    fn key(&self) -> &Self::Key;

    fn created_at(&self) -> DateTime<Utc>;
}
