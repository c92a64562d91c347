//! Error types for the progression engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type for key-value store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised when the engine is driven in a way its state does not allow.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A navigation method ran before `initialize`.
    #[error("story engine is not initialized")]
    EngineNotInitialized,

    /// The target scene is not in the loaded content.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// There is no current scene to advance from.
    #[error("no current scene")]
    NoCurrentScene,

    /// The current scene has no linear successor.
    #[error("scene '{0}' has no next scene")]
    NoNextScene(String),

    /// Backward navigation with an empty history.
    #[error("no previous scene in history")]
    NoHistory,

    /// A progress mutation ran with no game in progress.
    #[error("no active progress")]
    NoActiveProgress,

    /// A new game was requested before any content was loaded.
    #[error("no story content loaded")]
    NoContentLoaded,

    /// The loaded content has no act, chapter, or scene to start from.
    #[error("story content is empty")]
    EmptyContent,

    /// The current scene does not offer the requested choice.
    #[error("scene '{scene_id}' has no choice '{choice_id}'")]
    ChoiceNotFound {
        /// Scene that was searched.
        scene_id: String,
        /// Choice that was requested.
        choice_id: String,
    },
}

/// Errors from the underlying key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure.
    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The key cannot be stored by this backend.
    #[error("invalid storage key '{0}': use letters, digits, '-' or '_'")]
    InvalidKey(String),
}
