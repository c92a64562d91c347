//! Change notifications.
//!
//! Observers register a callback and receive every [`StoryEvent`] in the
//! order the engine emits them. Within one engine call the order is always
//! persona-changed, then mindset-changed, then state-changed.

use std::sync::Arc;

use story_core::{MindsetContext, Persona, Progress};

/// Something observers may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryEvent {
    /// Progress was replaced, cleared, or restored.
    StateChanged {
        /// The new progress, or `None` after a clear.
        progress: Option<Arc<Progress>>,
        /// Scene the player was on before the change.
        previous_scene_id: Option<String>,
    },
    /// The embodied persona changed.
    PersonaChanged {
        /// The new persona.
        persona: Option<Persona>,
        /// The persona before the change.
        previous: Option<Persona>,
    },
    /// The era mindset changed.
    MindsetChanged {
        /// The new mindset.
        mindset: Option<Arc<MindsetContext>>,
        /// The mindset before the change.
        previous: Option<Arc<MindsetContext>>,
        /// Act that brought the change.
        act_number: u32,
    },
}

impl StoryEvent {
    /// Stable event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StateChanged { .. } => "story-state-changed",
            Self::PersonaChanged { .. } => "persona-changed",
            Self::MindsetChanged { .. } => "mindset-changed",
        }
    }
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&StoryEvent)>;

/// Registered observers, notified synchronously in subscription order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

impl Observers {
    /// Create an empty observer list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoryEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() < before
    }

    /// Deliver an event to every observer.
    pub fn emit(&mut self, event: &StoryEvent) {
        tracing::trace!(event = event.name(), observers = self.callbacks.len(), "emit");
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
