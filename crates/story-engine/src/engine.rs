//! The story progression engine.
//!
//! `StoryEngine` owns the loaded content, the player's current progress, a
//! session-scoped history of visited scenes, and the current era mindset.
//! Every mutation produces a fresh progress snapshot, writes it to the
//! store, and notifies observers.

use std::sync::Arc;

use chrono::Utc;

use story_core::{
    Act, Chapter, MindsetContext, Persona, Progress, Scene, SceneIndex, StoryContent, first_scene,
};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::event::{Observers, StoryEvent, SubscriptionId};
use crate::mindset::MindsetRegistry;
use crate::store::{KeyValueStore, MemoryStore, ProgressStore};

/// Coarse lifecycle state of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No content has been loaded.
    Uninitialized,
    /// Content is loaded but no game is in progress.
    Ready,
    /// A game is in progress.
    Playing,
}

/// Drives navigation through a story and keeps progress saved.
pub struct StoryEngine {
    config: EngineConfig,
    content: Option<StoryContent>,
    index: SceneIndex,
    progress: Option<Arc<Progress>>,
    history: Vec<String>,
    mindset: MindsetRegistry,
    store: ProgressStore,
    observers: Observers,
}

impl std::fmt::Debug for StoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryEngine")
            .field("state", &self.state())
            .field("scene", &self.current_scene_id())
            .field("history", &self.history.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl StoryEngine {
    /// Create an engine that saves into `backend`.
    pub fn new<S: KeyValueStore + 'static>(backend: S, config: EngineConfig) -> Self {
        let store = ProgressStore::new(backend, config.storage_key.clone());
        Self {
            config,
            content: None,
            index: SceneIndex::default(),
            progress: None,
            history: Vec::new(),
            mindset: MindsetRegistry::new(),
            store,
            observers: Observers::new(),
        }
    }

    /// Create an engine with an in-memory store and default configuration.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), EngineConfig::default())
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// Load content and build the scene index.
    ///
    /// Calling this again replaces the content and clears the history. Current
    /// progress is re-anchored to where its scene now lives, or dropped if the
    /// scene is gone.
    pub fn initialize(&mut self, content: StoryContent) {
        self.index = SceneIndex::build(&content);
        tracing::info!(
            title = %content.title,
            acts = content.acts.len(),
            scenes = self.index.len(),
            "story engine initialized"
        );
        self.content = Some(content);
        self.history.clear();
        self.reconcile_progress();
    }

    fn reconcile_progress(&mut self) {
        let (Some(content), Some(current)) = (self.content.as_ref(), self.progress.clone()) else {
            return;
        };
        let Some(target) = self.index.resolve(content, &current.position.scene_id) else {
            tracing::warn!(
                scene = %current.position.scene_id,
                "current scene missing from new content, dropping progress"
            );
            self.progress = None;
            self.observers.emit(&StoryEvent::StateChanged {
                progress: None,
                previous_scene_id: Some(current.position.scene_id.clone()),
            });
            return;
        };
        let position = target.position();
        if position == current.position {
            return;
        }
        let act_number = position.act_number;
        let mindset = target.act.mindset.clone().map(Arc::new);

        tracing::debug!(from = %current.position, to = %position, "relocated current position");
        let next = current.with_position(position, Utc::now());
        let previous_mindset = self.mindset.set(mindset.clone());
        if previous_mindset != mindset {
            self.observers.emit(&StoryEvent::MindsetChanged {
                mindset,
                previous: previous_mindset,
                act_number,
            });
        }
        self.commit(next);
    }

    /// Register an observer for [`StoryEvent`]s.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoryEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Remove an observer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Move to `scene_id`, remembering the current scene in history.
    pub fn go_to_scene(&mut self, scene_id: &str) -> EngineResult<Arc<Progress>> {
        self.navigate(scene_id, true)
    }

    /// Follow the current scene's `nextScene` link.
    pub fn next_scene(&mut self) -> EngineResult<Arc<Progress>> {
        let scene = self.require_current_scene()?;
        let next = scene
            .next_scene
            .clone()
            .ok_or_else(|| EngineError::NoNextScene(scene.id.clone()))?;
        self.go_to_scene(&next)
    }

    /// Return to the most recently visited scene.
    ///
    /// The scene being left is not pushed, so alternating forward and back
    /// does not grow the history.
    pub fn previous_scene(&mut self) -> EngineResult<Arc<Progress>> {
        if self.content.is_none() {
            return Err(EngineError::EngineNotInitialized);
        }
        let target = self.history.pop().ok_or(EngineError::NoHistory)?;
        match self.navigate(&target, false) {
            Ok(progress) => Ok(progress),
            Err(e) => {
                self.history.push(target);
                Err(e)
            }
        }
    }

    /// Record a choice on the current scene and follow it.
    ///
    /// The option's own `nextScene` wins over the scene's. With neither,
    /// the choice is recorded and the player stays put. A target missing
    /// from the content fails before anything is recorded.
    pub fn choose(&mut self, choice_id: &str) -> EngineResult<Arc<Progress>> {
        let scene = self.require_current_scene()?;
        let option = scene
            .choice(choice_id)
            .ok_or_else(|| EngineError::ChoiceNotFound {
                scene_id: scene.id.clone(),
                choice_id: choice_id.to_string(),
            })?;
        let target = option
            .next_scene
            .clone()
            .or_else(|| scene.next_scene.clone());
        if let Some(next) = &target
            && !self.index.contains(next)
        {
            return Err(EngineError::SceneNotFound(next.clone()));
        }

        let recorded = self.record_choice(choice_id)?;
        match target {
            Some(next) => self.go_to_scene(&next),
            None => Ok(recorded),
        }
    }

    fn navigate(&mut self, scene_id: &str, push_history: bool) -> EngineResult<Arc<Progress>> {
        let content = self
            .content
            .as_ref()
            .ok_or(EngineError::EngineNotInitialized)?;
        let target = self
            .index
            .resolve(content, scene_id)
            .ok_or_else(|| EngineError::SceneNotFound(scene_id.to_string()))?;
        let position = target.position();
        let act_persona = target.act.persona.clone();
        let act_mindset = target.act.mindset.clone();

        let previous = self.progress.clone();
        let previous_scene_id = previous.as_ref().map(|p| p.position.scene_id.clone());
        if push_history && let Some(id) = &previous_scene_id {
            self.history.push(id.clone());
        }

        let now = Utc::now();
        let act_number = position.act_number;
        let act_changed = previous
            .as_ref()
            .is_none_or(|p| p.position.act_number != act_number);

        let mut next = match &previous {
            Some(p) => p.with_position(position, now),
            None => Progress::new(position, None, now),
        };

        let mut persona_event = None;
        let mut mindset_event = None;
        if act_changed {
            if let Some(persona) = act_persona {
                let before = next.current_persona.clone();
                if !before.as_ref().is_some_and(|p| p.same_identity(&persona)) {
                    tracing::debug!(act = act_number, persona = %persona.id, "persona changed");
                    next.current_persona = Some(persona.clone());
                    persona_event = Some(StoryEvent::PersonaChanged {
                        persona: Some(persona),
                        previous: before,
                    });
                }
            }
            if let Some(mindset) = act_mindset {
                let mindset = Arc::new(mindset);
                let before = self.mindset.set(Some(Arc::clone(&mindset)));
                mindset_event = Some(StoryEvent::MindsetChanged {
                    mindset: Some(mindset),
                    previous: before,
                    act_number,
                });
            }
        }

        let next = Arc::new(next);
        self.progress = Some(Arc::clone(&next));
        tracing::debug!(
            from = previous_scene_id.as_deref().unwrap_or("-"),
            to = %scene_id,
            history = self.history.len(),
            "navigated"
        );
        self.persist();

        if let Some(event) = persona_event {
            self.observers.emit(&event);
        }
        if let Some(event) = mindset_event {
            self.observers.emit(&event);
        }
        self.observers.emit(&StoryEvent::StateChanged {
            progress: Some(Arc::clone(&next)),
            previous_scene_id,
        });
        Ok(next)
    }

    // -----------------------------------------------------------------------
    // Game lifecycle
    // -----------------------------------------------------------------------

    /// Start over at the first scene of the first act.
    pub fn start_new_game(&mut self) -> EngineResult<Arc<Progress>> {
        let content = self.content.as_ref().ok_or(EngineError::NoContentLoaded)?;
        let first = first_scene(content).map_err(|_| EngineError::EmptyContent)?;
        let position = first.position();
        let act_number = position.act_number;
        let persona = first.act.persona.clone();
        let mindset = first.act.mindset.clone().map(Arc::new);

        let taken = self.progress.take();
        let previous_scene_id = taken.as_ref().map(|p| p.position.scene_id.clone());
        let previous_persona = taken.and_then(|p| p.current_persona.clone());

        self.history.clear();
        let progress = Arc::new(Progress::new(position, persona.clone(), Utc::now()));
        self.progress = Some(Arc::clone(&progress));
        let previous_mindset = self.mindset.set(mindset.clone());
        tracing::info!(scene = %progress.position.scene_id, "started new game");
        self.persist();

        // The first act's values are announced without a previous value. A
        // value the first act does not replace is reported as cleared.
        match (persona, previous_persona) {
            (Some(persona), _) => self.observers.emit(&StoryEvent::PersonaChanged {
                persona: Some(persona),
                previous: None,
            }),
            (None, Some(old)) => self.observers.emit(&StoryEvent::PersonaChanged {
                persona: None,
                previous: Some(old),
            }),
            (None, None) => {}
        }
        match (mindset, previous_mindset) {
            (Some(mindset), _) => self.observers.emit(&StoryEvent::MindsetChanged {
                mindset: Some(mindset),
                previous: None,
                act_number,
            }),
            (None, Some(old)) => self.observers.emit(&StoryEvent::MindsetChanged {
                mindset: None,
                previous: Some(old),
                act_number,
            }),
            (None, None) => {}
        }
        self.observers.emit(&StoryEvent::StateChanged {
            progress: Some(Arc::clone(&progress)),
            previous_scene_id,
        });
        Ok(progress)
    }

    /// Restore saved progress, or start a new game if there is none.
    ///
    /// A save whose scene no longer exists in the loaded content is treated
    /// as absent. Returns `true` if a save was restored.
    pub fn resume(&mut self) -> EngineResult<bool> {
        let content = self
            .content
            .as_ref()
            .ok_or(EngineError::EngineNotInitialized)?;

        let Some(mut saved) = self.store.load() else {
            tracing::debug!("no saved progress, starting new game");
            self.start_new_game()?;
            return Ok(false);
        };

        let Some(target) = self.index.resolve(content, &saved.position.scene_id) else {
            tracing::warn!(
                scene = %saved.position.scene_id,
                "saved scene no longer exists, starting new game"
            );
            self.start_new_game()?;
            return Ok(false);
        };

        let position = target.position();
        let act_number = position.act_number;
        let mindset = target.act.mindset.clone().map(Arc::new);
        if saved.position != position {
            tracing::debug!(from = %saved.position, to = %position, "relocated saved position");
            saved.position = position;
        }

        let previous_scene_id = self
            .progress
            .as_ref()
            .map(|p| p.position.scene_id.clone());
        let previous_persona = self
            .progress
            .as_ref()
            .and_then(|p| p.current_persona.clone());
        self.history.clear();
        let restored = Arc::new(saved);
        self.progress = Some(Arc::clone(&restored));
        let previous_mindset = self.mindset.set(mindset.clone());
        tracing::info!(scene = %restored.position.scene_id, "resumed saved progress");

        if !same_persona(&previous_persona, &restored.current_persona) {
            self.observers.emit(&StoryEvent::PersonaChanged {
                persona: restored.current_persona.clone(),
                previous: previous_persona,
            });
        }
        if previous_mindset != mindset {
            self.observers.emit(&StoryEvent::MindsetChanged {
                mindset,
                previous: previous_mindset,
                act_number,
            });
        }
        self.observers.emit(&StoryEvent::StateChanged {
            progress: Some(restored),
            previous_scene_id,
        });
        Ok(true)
    }

    /// Forget all progress, saved and in memory.
    ///
    /// Does not start a new game.
    pub fn clear_progress(&mut self) {
        self.store.clear();
        let previous_scene_id = self
            .progress
            .take()
            .map(|p| p.position.scene_id.clone());
        self.history.clear();
        tracing::info!("cleared progress");
        self.observers.emit(&StoryEvent::StateChanged {
            progress: None,
            previous_scene_id,
        });
    }

    // -----------------------------------------------------------------------
    // Progress mutations
    // -----------------------------------------------------------------------

    /// Append a choice bound to the current scene. Does not navigate.
    pub fn record_choice(&mut self, choice_id: &str) -> EngineResult<Arc<Progress>> {
        let current = self.require_progress()?;
        let next = current.with_choice(choice_id, Utc::now());
        tracing::debug!(scene = %next.position.scene_id, choice = %choice_id, "recorded choice");
        Ok(self.commit(next))
    }

    /// Add an item to the discovered set.
    ///
    /// Returns `false` (and changes nothing) if it was already discovered.
    pub fn add_discovered_item(&mut self, item_id: &str) -> EngineResult<bool> {
        let current = self.require_progress()?;
        if current.has_discovered(item_id) {
            return Ok(false);
        }
        let next = current.with_discovery(item_id, Utc::now());
        tracing::debug!(item = %item_id, "discovered item");
        self.commit(next);
        Ok(true)
    }

    /// Replace the current persona.
    ///
    /// Setting a persona with the same identity as the current one is a
    /// no-op and returns `false`.
    pub fn set_current_persona(&mut self, persona: Option<Persona>) -> EngineResult<bool> {
        let current = self.require_progress()?;
        if same_persona(&current.current_persona, &persona) {
            return Ok(false);
        }

        let previous = current.current_persona.clone();
        let next = current.with_persona(persona.clone(), Utc::now());
        self.progress = Some(Arc::new(next));
        self.persist();
        self.observers
            .emit(&StoryEvent::PersonaChanged { persona, previous });
        self.emit_state();
        Ok(true)
    }

    /// Drop the current mindset without touching progress.
    pub fn reset_mindset(&mut self) {
        self.mindset.reset();
    }

    fn commit(&mut self, next: Progress) -> Arc<Progress> {
        let next = Arc::new(next);
        self.progress = Some(Arc::clone(&next));
        self.persist();
        self.emit_state();
        next
    }

    fn emit_state(&mut self) {
        let progress = self.progress.clone();
        let previous_scene_id = progress.as_ref().map(|p| p.position.scene_id.clone());
        self.observers.emit(&StoryEvent::StateChanged {
            progress,
            previous_scene_id,
        });
    }

    fn persist(&mut self) {
        if !self.config.autosave {
            return;
        }
        if let Some(progress) = &self.progress
            && let Err(e) = self.store.save(progress)
        {
            tracing::warn!(error = %e, "failed to save progress");
        }
    }

    fn require_progress(&self) -> EngineResult<Arc<Progress>> {
        self.progress.clone().ok_or(EngineError::NoActiveProgress)
    }

    fn require_current_scene(&self) -> EngineResult<&Scene> {
        let content = self
            .content
            .as_ref()
            .ok_or(EngineError::EngineNotInitialized)?;
        let progress = self.progress.as_ref().ok_or(EngineError::NoCurrentScene)?;
        self.index
            .resolve(content, &progress.position.scene_id)
            .map(|r| r.scene)
            .ok_or(EngineError::NoCurrentScene)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Coarse lifecycle state.
    pub fn state(&self) -> EngineState {
        match (&self.content, &self.progress) {
            (None, _) => EngineState::Uninitialized,
            (Some(_), None) => EngineState::Ready,
            (Some(_), Some(_)) => EngineState::Playing,
        }
    }

    /// Whether content has been loaded.
    pub fn is_initialized(&self) -> bool {
        self.content.is_some()
    }

    /// The loaded content.
    pub fn content(&self) -> Option<&StoryContent> {
        self.content.as_ref()
    }

    /// The scene index built from the loaded content.
    pub fn scene_index(&self) -> &SceneIndex {
        &self.index
    }

    /// The current progress snapshot.
    pub fn progress(&self) -> Option<Arc<Progress>> {
        self.progress.clone()
    }

    /// Id of the current scene.
    pub fn current_scene_id(&self) -> Option<&str> {
        self.progress.as_ref().map(|p| p.position.scene_id.as_str())
    }

    /// The current scene.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.require_current_scene().ok()
    }

    /// The act containing the current scene.
    pub fn current_act(&self) -> Option<&Act> {
        let content = self.content.as_ref()?;
        let progress = self.progress.as_ref()?;
        self.index
            .resolve(content, &progress.position.scene_id)
            .map(|r| r.act)
    }

    /// The chapter containing the current scene.
    pub fn current_chapter(&self) -> Option<&Chapter> {
        let content = self.content.as_ref()?;
        let progress = self.progress.as_ref()?;
        self.index
            .resolve(content, &progress.position.scene_id)
            .map(|r| r.chapter)
    }

    /// The persona currently embodied.
    pub fn current_persona(&self) -> Option<&Persona> {
        self.progress.as_ref()?.current_persona.as_ref()
    }

    /// The current era mindset.
    pub fn mindset(&self) -> Option<Arc<MindsetContext>> {
        self.mindset.current()
    }

    /// Scenes visited this session, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Number of scenes in the history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whether `previous_scene` would succeed.
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Whether the current scene has a `nextScene` link.
    pub fn has_next_scene(&self) -> bool {
        self.current_scene()
            .is_some_and(|s| s.next_scene.is_some())
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The progress store.
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Mutable access to the progress store.
    pub fn store_mut(&mut self) -> &mut ProgressStore {
        &mut self.store
    }
}

fn same_persona(a: &Option<Persona>, b: &Option<Persona>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_identity(b),
        (None, None) => true,
        _ => false,
    }
}
