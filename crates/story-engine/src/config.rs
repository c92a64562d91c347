//! Configuration for a story engine.

/// Default key under which progress is saved.
pub const DEFAULT_STORAGE_KEY: &str = "story-progress";

/// Configuration for a [`StoryEngine`](crate::StoryEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Key the progress record is stored under.
    pub storage_key: String,
    /// Whether every mutation is written to the store.
    pub autosave: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            autosave: true,
        }
    }
}

impl EngineConfig {
    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Enable or disable writing progress after each mutation.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }
}
