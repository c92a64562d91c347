//! Content and progress model for Story Mode.
//!
//! Story content is an immutable tree of acts, chapters, and scenes. A
//! player's save state is a [`Progress`] snapshot pointing into that tree.
//! The [`SceneIndex`] resolves scene ids to their position in one lookup.

/// Acts, chapters, and scenes.
pub mod content;
/// Error types for content loading.
pub mod error;
/// Scene lookup by identifier.
pub mod index;
/// Loading content from JSON.
pub mod loader;
/// Personas and era mindsets.
pub mod persona;
/// Player save state.
pub mod progress;
/// Structural checks for authored content.
pub mod validate;

/// Re-export content types.
pub use content::{Act, Chapter, ChoiceOption, DialogueLine, Scene, SceneBody, SceneKind, StoryContent};
/// Re-export error types.
pub use error::{ContentError, ContentResult};
/// Re-export index types.
pub use index::{SceneIndex, SceneLocation, SceneRef, first_scene};
/// Re-export persona types.
pub use persona::{Constraint, ConstraintKind, HistoricalPerspective, MindsetContext, Persona};
/// Re-export progress types.
pub use progress::{ChoiceRecord, Position, Progress};
/// Re-export validation types.
pub use validate::{ContentIssue, Severity, validate};
