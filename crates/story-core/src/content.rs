//! Narrative content: acts, chapters, and scenes.
//!
//! Content is authored offline, loaded once, and never mutated by the
//! engine. The tree is ordered: acts hold chapters, chapters hold scenes,
//! and a scene may point at the next scene for linear progression.

use serde::{Deserialize, Serialize};

use crate::persona::{MindsetContext, Persona};

/// The complete story: an ordered list of acts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryContent {
    /// Display title of the story.
    #[serde(default)]
    pub title: String,
    /// Acts in authored order.
    pub acts: Vec<Act>,
}

impl StoryContent {
    /// Create content from a list of acts.
    pub fn new(title: impl Into<String>, acts: Vec<Act>) -> Self {
        Self {
            title: title.into(),
            acts,
        }
    }

    /// Find an act by number.
    pub fn act(&self, number: u32) -> Option<&Act> {
        self.acts.iter().find(|a| a.number == number)
    }

    /// The act with the lowest number.
    pub fn first_act(&self) -> Option<&Act> {
        self.acts.iter().min_by_key(|a| a.number)
    }

    /// Total number of scenes across all acts.
    pub fn scene_count(&self) -> usize {
        self.acts
            .iter()
            .flat_map(|a| &a.chapters)
            .map(|c| c.scenes.len())
            .sum()
    }

    /// Total number of chapters across all acts.
    pub fn chapter_count(&self) -> usize {
        self.acts.iter().map(|a| a.chapters.len()).sum()
    }
}

/// A top-level story division, roughly one technology era.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Act {
    /// Act number; unique within the story and totally ordered.
    pub number: u32,
    /// Act title.
    pub title: String,
    /// Era label, e.g. "1940s".
    #[serde(default)]
    pub era: String,
    /// Technology stage this act covers, e.g. "relays" or "transistors".
    #[serde(default)]
    pub stage: String,
    /// Chapters in authored order.
    pub chapters: Vec<Chapter>,
    /// The persona the player embodies for this act.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
    /// The era mindset that applies for this act.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mindset: Option<MindsetContext>,
}

impl Act {
    /// Find a chapter by number.
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number == number)
    }
}

/// An ordered group of scenes within an act.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Chapter number within its act.
    pub number: u32,
    /// Chapter title.
    pub title: String,
    /// Chapter subtitle.
    #[serde(default)]
    pub subtitle: String,
    /// Year label shown with the chapter.
    #[serde(default)]
    pub year: String,
    /// Scenes in authored order.
    pub scenes: Vec<Scene>,
}

/// The kind of a scene, derived from its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    /// Prose paragraphs.
    Narrative,
    /// Lines spoken by characters.
    Dialogue,
    /// A branching decision.
    Choice,
    /// A hands-on task with objectives.
    Challenge,
}

impl std::fmt::Display for SceneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Narrative => "narrative",
            Self::Dialogue => "dialogue",
            Self::Choice => "choice",
            Self::Challenge => "challenge",
        };
        write!(f, "{s}")
    }
}

/// The atomic unit of narrative and of navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Unique scene identifier.
    pub id: String,
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Scene reached by linear progression; `None` ends the branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_scene: Option<String>,
    /// Type-specific content, tagged by `type`.
    #[serde(flatten)]
    pub body: SceneBody,
}

impl Scene {
    /// Create a narrative scene with a single paragraph.
    pub fn narrative(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            next_scene: None,
            body: SceneBody::Narrative {
                text: vec![text.into()],
            },
        }
    }

    /// Set the next scene for linear progression.
    pub fn then(mut self, next: impl Into<String>) -> Self {
        self.next_scene = Some(next.into());
        self
    }

    /// The kind of this scene.
    pub fn kind(&self) -> SceneKind {
        match self.body {
            SceneBody::Narrative { .. } => SceneKind::Narrative,
            SceneBody::Dialogue { .. } => SceneKind::Dialogue,
            SceneBody::Choice { .. } => SceneKind::Choice,
            SceneBody::Challenge { .. } => SceneKind::Challenge,
        }
    }

    /// Options offered by a choice scene. Empty for other kinds.
    pub fn choices(&self) -> &[ChoiceOption] {
        match &self.body {
            SceneBody::Choice { choices, .. } => choices,
            _ => &[],
        }
    }

    /// Find a choice option by id.
    pub fn choice(&self, id: &str) -> Option<&ChoiceOption> {
        self.choices().iter().find(|c| c.id == id)
    }
}

/// Type-specific scene content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SceneBody {
    /// Prose paragraphs.
    Narrative {
        /// Paragraphs in reading order.
        text: Vec<String>,
    },
    /// A conversation.
    Dialogue {
        /// Lines in speaking order.
        lines: Vec<DialogueLine>,
    },
    /// A branching decision.
    Choice {
        /// Question put to the player.
        #[serde(default)]
        prompt: String,
        /// Options to pick from.
        choices: Vec<ChoiceOption>,
    },
    /// A task with objectives.
    Challenge {
        /// Short statement of the task.
        task: String,
        /// What the player must do.
        #[serde(default)]
        description: String,
        /// Objectives to complete.
        #[serde(default)]
        objectives: Vec<String>,
    },
}

/// One spoken line in a dialogue scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Who speaks.
    pub speaker: String,
    /// What they say.
    pub text: String,
}

/// An option in a choice scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    /// Option identifier, recorded in progress when chosen.
    pub id: String,
    /// Label shown to the player.
    pub text: String,
    /// Where this option leads; falls back to the scene's own `nextScene`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_scene: Option<String>,
}
