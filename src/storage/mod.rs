//! Local storage medium for record collections
//!
//! This module provides the key-value interface the record stores persist
//! through, plus its implementations:
//! - [`MemoryStorage`] - process-local map with an optional byte quota
//! - [`FileStorage`] - one JSON file per key under a data directory
//!
//! Values are whole serialized collections wrapped in an [`envelope`] and
//! accessed through a [`LocalCollection`].

pub mod collection;
pub mod envelope;
pub mod file;
pub mod memory;

pub use collection::{LocalCollection, Record};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StoreResult;

/// Synchronous string key-value store.
///
/// Instances are owned by the caller and shared between stores through
/// `Arc<dyn KeyValueStore>`; there is no process-wide default.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// Fails with `StorageFailure` when the medium rejects the write.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
