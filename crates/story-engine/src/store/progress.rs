use story_core::Progress;

use super::{KeyValueStore, MemoryStore};
use crate::config::DEFAULT_STORAGE_KEY;
use crate::error::StoreResult;

/// Saves and loads one progress record under a fixed key.
///
/// Loading never fails: a missing, unreadable, or malformed record reads
/// as `None`, which callers treat as "no save".
pub struct ProgressStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore")
            .field("key", &self.key)
            .field("has_save", &self.has())
            .finish()
    }
}

impl ProgressStore {
    /// Wrap a backend, storing under `key`.
    pub fn new<S: KeyValueStore + 'static>(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend: Box::new(backend),
            key: key.into(),
        }
    }

    /// A store backed by memory under the default key.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), DEFAULT_STORAGE_KEY)
    }

    /// The key progress is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize and write `progress`.
    pub fn save(&mut self, progress: &Progress) -> StoreResult<()> {
        let json = serde_json::to_string(progress)?;
        self.backend.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, scene = %progress.position.scene_id, "saved progress");
        Ok(())
    }

    /// Read the saved progress, if there is a usable one.
    pub fn load(&self) -> Option<Progress> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read saved progress");
                return None;
            }
        };

        let progress: Progress = match serde_json::from_str(&raw) {
            Ok(progress) => progress,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding malformed saved progress");
                return None;
            }
        };

        if progress.position.scene_id.is_empty() {
            tracing::warn!(key = %self.key, "discarding saved progress without a scene");
            return None;
        }

        Some(progress)
    }

    /// Remove the saved progress. Failures are logged, not raised.
    pub fn clear(&mut self) {
        if let Err(e) = self.backend.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to clear saved progress");
        }
    }

    /// Whether a record exists under the key. Does not check that it parses.
    pub fn has(&self) -> bool {
        self.backend.contains(&self.key)
    }

    /// Write a raw string under the progress key.
    ///
    /// Exists so tests and tools can plant arbitrary records.
    pub fn write_raw(&mut self, raw: &str) -> StoreResult<()> {
        self.backend.set(&self.key, raw)
    }
}
