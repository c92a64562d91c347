//! Player progress: the save state.
//!
//! `Progress` values are snapshots. Every update method takes `&self` and
//! returns a new value, so whoever holds an older snapshot keeps seeing
//! exactly what they were given.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::persona::Persona;

/// Where the player is in the story.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Act containing the scene.
    pub act_number: u32,
    /// Chapter containing the scene.
    pub chapter_number: u32,
    /// The current scene.
    pub scene_id: String,
}

impl Position {
    /// Create a position.
    pub fn new(act_number: u32, chapter_number: u32, scene_id: impl Into<String>) -> Self {
        Self {
            act_number,
            chapter_number,
            scene_id: scene_id.into(),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Act {}, Chapter {}, scene '{}'",
            self.act_number, self.chapter_number, self.scene_id
        )
    }
}

/// A choice the player made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceRecord {
    /// Scene the choice was made in.
    pub scene_id: String,
    /// The option picked.
    pub choice_id: String,
    /// When it was picked.
    pub timestamp: DateTime<Utc>,
}

/// One player's complete save state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Current position.
    pub position: Position,
    /// Every choice made, oldest first. Append-only.
    pub choices: Vec<ChoiceRecord>,
    /// Items the player has discovered.
    pub discovered_items: BTreeSet<String>,
    /// The persona currently embodied.
    #[serde(default)]
    pub current_persona: Option<Persona>,
    /// When this save was created.
    pub started_at: DateTime<Utc>,
    /// When this save was last changed.
    pub last_played_at: DateTime<Utc>,
}

impl Progress {
    /// Start a fresh save at `position`.
    pub fn new(position: Position, persona: Option<Persona>, now: DateTime<Utc>) -> Self {
        Self {
            position,
            choices: Vec::new(),
            discovered_items: BTreeSet::new(),
            current_persona: persona,
            started_at: now,
            last_played_at: now,
        }
    }

    /// A copy moved to `position`.
    pub fn with_position(&self, position: Position, now: DateTime<Utc>) -> Self {
        Self {
            position,
            last_played_at: now,
            ..self.clone()
        }
    }

    /// A copy with a choice appended for the current scene.
    pub fn with_choice(&self, choice_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.choices.push(ChoiceRecord {
            scene_id: self.position.scene_id.clone(),
            choice_id: choice_id.into(),
            timestamp: now,
        });
        next.last_played_at = now;
        next
    }

    /// A copy with `item` added to the discovered set.
    pub fn with_discovery(&self, item: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.discovered_items.insert(item.into());
        next.last_played_at = now;
        next
    }

    /// A copy embodying `persona`.
    pub fn with_persona(&self, persona: Option<Persona>, now: DateTime<Utc>) -> Self {
        Self {
            current_persona: persona,
            last_played_at: now,
            ..self.clone()
        }
    }

    /// Whether `item` has been discovered.
    pub fn has_discovered(&self, item: &str) -> bool {
        self.discovered_items.contains(item)
    }

    /// Choices recorded in `scene_id`, oldest first.
    pub fn choices_in(&self, scene_id: &str) -> impl Iterator<Item = &ChoiceRecord> {
        self.choices.iter().filter(move |c| c.scene_id == scene_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn start() -> Progress {
        Progress::new(Position::new(1, 1, "s1"), None, Utc::now())
    }

    #[test]
    fn new_progress_is_empty() {
        let p = start();
        assert!(p.choices.is_empty());
        assert!(p.discovered_items.is_empty());
        assert_eq!(p.started_at, p.last_played_at);
    }

    #[test]
    fn updates_leave_original_untouched() {
        let p = start();
        let later = p.started_at + Duration::seconds(5);
        let moved = p.with_position(Position::new(1, 2, "s4"), later);
        assert_eq!(p.position.scene_id, "s1");
        assert_eq!(moved.position.scene_id, "s4");
        assert_eq!(moved.started_at, p.started_at);
        assert_eq!(moved.last_played_at, later);
    }

    #[test]
    fn choice_bound_to_current_scene() {
        let p = start().with_choice("opt-a", Utc::now());
        assert_eq!(p.choices.len(), 1);
        assert_eq!(p.choices[0].scene_id, "s1");
        assert_eq!(p.choices_in("s1").count(), 1);
        assert_eq!(p.choices_in("s2").count(), 0);
    }

    #[test]
    fn discovery_is_a_set() {
        let now = Utc::now();
        let p = start()
            .with_discovery("gate-and", now)
            .with_discovery("gate-and", now);
        assert_eq!(p.discovered_items.len(), 1);
        assert!(p.has_discovered("gate-and"));
    }

    #[test]
    fn persona_replaced() {
        let p = start().with_persona(Some(Persona::new("p1", "One")), Utc::now());
        assert_eq!(p.current_persona.as_ref().map(|p| p.id.as_str()), Some("p1"));
        let cleared = p.with_persona(None, Utc::now());
        assert!(cleared.current_persona.is_none());
    }

    #[test]
    fn json_field_names() {
        let json = serde_json::to_value(start()).unwrap();
        assert!(json["position"]["sceneId"].is_string());
        assert!(json["discoveredItems"].is_array());
        assert!(json["lastPlayedAt"].is_string());
    }

    #[test]
    fn position_display() {
        assert_eq!(
            Position::new(2, 3, "relay").to_string(),
            "Act 2, Chapter 3, scene 'relay'"
        );
    }
}
