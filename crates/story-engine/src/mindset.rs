//! The current era mindset.
//!
//! One mindset is in force at a time. The engine owns the registry and
//! replaces its value on act transitions; everyone else reads it through
//! [`StoryEngine::mindset`](crate::StoryEngine::mindset).

use std::sync::Arc;

use story_core::MindsetContext;

/// Holds at most one current mindset.
#[derive(Debug, Clone, Default)]
pub struct MindsetRegistry {
    current: Option<Arc<MindsetContext>>,
}

impl MindsetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current mindset, returning the previous one.
    pub fn set(&mut self, mindset: Option<Arc<MindsetContext>>) -> Option<Arc<MindsetContext>> {
        std::mem::replace(&mut self.current, mindset)
    }

    /// The current mindset, if any.
    pub fn current(&self) -> Option<Arc<MindsetContext>> {
        self.current.clone()
    }

    /// Drop the current mindset.
    pub fn reset(&mut self) {
        self.current = None;
    }
}
