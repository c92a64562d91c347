//! Durable storage for player progress.
//!
//! Storage is split in two layers: a [`KeyValueStore`] moves strings in and
//! out of some backend, and [`ProgressStore`] encodes a single progress
//! record under a fixed key on top of it.

mod file;
mod memory;
mod progress;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use progress::ProgressStore;

use crate::error::StoreResult;

/// A string key-value backend.
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;

    /// Whether a value exists under `key`.
    fn contains(&self, key: &str) -> bool;
}
