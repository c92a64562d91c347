//! Story Mode progression engine.
//!
//! [`StoryEngine`] tracks where a player is in a [`story_core::StoryContent`]
//! tree, keeps a navigation history for backward movement, switches the
//! embodied persona and era mindset when the player crosses into a new act,
//! saves progress after every change, and notifies observers.

/// Engine configuration.
pub mod config;
/// The progression engine.
pub mod engine;
/// Error types.
pub mod error;
/// Change notifications.
pub mod event;
/// The current era mindset.
pub mod mindset;
/// Progress persistence.
pub mod store;

/// Re-export configuration.
pub use config::{DEFAULT_STORAGE_KEY, EngineConfig};
/// Re-export the engine.
pub use engine::{EngineState, StoryEngine};
/// Re-export error types.
pub use error::{EngineError, EngineResult, StoreError, StoreResult};
/// Re-export event types.
pub use event::{Observers, StoryEvent, SubscriptionId};
/// Re-export the mindset registry.
pub use mindset::MindsetRegistry;
/// Re-export store types.
pub use store::{FileStore, KeyValueStore, MemoryStore, ProgressStore};
