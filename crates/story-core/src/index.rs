//! Scene lookup by identifier.
//!
//! The index is built once per content load and maps each scene id to the
//! act and chapter that contain it, so navigation never walks the tree.

use std::collections::HashMap;

use crate::content::{Act, Chapter, Scene, StoryContent};
use crate::error::{ContentError, ContentResult};
use crate::progress::Position;

/// Coordinates of a scene inside its content tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLocation {
    /// Number of the containing act.
    pub act_number: u32,
    /// Number of the containing chapter.
    pub chapter_number: u32,
    act_idx: usize,
    chapter_idx: usize,
    scene_idx: usize,
}

/// A resolved scene together with its act and chapter.
#[derive(Debug, Clone, Copy)]
pub struct SceneRef<'a> {
    /// The act containing the scene.
    pub act: &'a Act,
    /// The chapter containing the scene.
    pub chapter: &'a Chapter,
    /// The scene itself.
    pub scene: &'a Scene,
}

impl SceneRef<'_> {
    /// The position this scene occupies.
    pub fn position(&self) -> Position {
        Position::new(self.act.number, self.chapter.number, self.scene.id.clone())
    }
}

/// O(1) lookup from scene id to its location.
#[derive(Debug, Clone, Default)]
pub struct SceneIndex {
    by_id: HashMap<String, SceneLocation>,
    duplicates: Vec<String>,
}

impl SceneIndex {
    /// Build the index in one pass over the content.
    ///
    /// If two scenes share an id the later one wins. The collision is
    /// logged and reported by [`SceneIndex::duplicates`].
    pub fn build(content: &StoryContent) -> Self {
        let mut index = Self::default();
        for (act_idx, act) in content.acts.iter().enumerate() {
            for (chapter_idx, chapter) in act.chapters.iter().enumerate() {
                for (scene_idx, scene) in chapter.scenes.iter().enumerate() {
                    let location = SceneLocation {
                        act_number: act.number,
                        chapter_number: chapter.number,
                        act_idx,
                        chapter_idx,
                        scene_idx,
                    };
                    if index.by_id.insert(scene.id.clone(), location).is_some() {
                        tracing::warn!(scene = %scene.id, "duplicate scene id, later scene wins");
                        index.duplicates.push(scene.id.clone());
                    }
                }
            }
        }
        tracing::debug!(scenes = index.by_id.len(), "built scene index");
        index
    }

    /// Look up a scene's location.
    pub fn get(&self, scene_id: &str) -> Option<&SceneLocation> {
        self.by_id.get(scene_id)
    }

    /// Whether a scene id is indexed.
    pub fn contains(&self, scene_id: &str) -> bool {
        self.by_id.contains_key(scene_id)
    }

    /// Resolve a scene id against the content this index was built from.
    pub fn resolve<'a>(&self, content: &'a StoryContent, scene_id: &str) -> Option<SceneRef<'a>> {
        let loc = self.by_id.get(scene_id)?;
        let act = content.acts.get(loc.act_idx)?;
        let chapter = act.chapters.get(loc.chapter_idx)?;
        let scene = chapter.scenes.get(loc.scene_idx)?;
        Some(SceneRef {
            act,
            chapter,
            scene,
        })
    }

    /// Number of indexed scenes.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Scene ids that appeared more than once during the build.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

/// The first scene of the first chapter of the first act.
pub fn first_scene(content: &StoryContent) -> ContentResult<SceneRef<'_>> {
    let act = content.first_act().ok_or(ContentError::EmptyContent)?;
    let chapter = act.chapters.first().ok_or(ContentError::EmptyContent)?;
    let scene = chapter.scenes.first().ok_or(ContentError::EmptyContent)?;
    Ok(SceneRef {
        act,
        chapter,
        scene,
    })
}
