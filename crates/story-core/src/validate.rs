//! Structural checks for authored content.
//!
//! Validation collects every issue instead of stopping at the first one, so
//! authors can fix a content file in a single pass.

use std::collections::{HashMap, HashSet};

use crate::content::StoryContent;

/// How serious a content issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Content cannot be played reliably.
    Error,
    /// Suspicious but playable.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single problem found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentIssue {
    /// Error or warning.
    pub severity: Severity,
    /// What is wrong.
    pub message: String,
}

impl ContentIssue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Check content for structural problems.
pub fn validate(content: &StoryContent) -> Vec<ContentIssue> {
    let mut issues = Vec::new();

    if content.acts.is_empty() {
        issues.push(ContentIssue::error("story has no acts"));
    }

    let mut act_numbers = HashSet::new();
    let mut scene_ids: HashMap<&str, u32> = HashMap::new();

    for act in &content.acts {
        if !act_numbers.insert(act.number) {
            issues.push(ContentIssue::error(format!(
                "act number {} is used more than once",
                act.number
            )));
        }
        if act.chapters.is_empty() {
            issues.push(ContentIssue::error(format!(
                "act {} has no chapters",
                act.number
            )));
        }
        for chapter in &act.chapters {
            if chapter.scenes.is_empty() {
                issues.push(ContentIssue::error(format!(
                    "act {} chapter {} has no scenes",
                    act.number, chapter.number
                )));
            }
            for scene in &chapter.scenes {
                if let Some(first_act) = scene_ids.insert(&scene.id, act.number) {
                    issues.push(ContentIssue::error(format!(
                        "scene id '{}' is used in act {} and act {}",
                        scene.id, first_act, act.number
                    )));
                }
            }
        }

        if let (Some(persona), Some(mindset)) = (&act.persona, &act.mindset)
            && !mindset.persona_id.is_empty()
            && mindset.persona_id != persona.id
        {
            issues.push(ContentIssue::warning(format!(
                "act {} mindset belongs to '{}' but the act persona is '{}'",
                act.number, mindset.persona_id, persona.id
            )));
        }
    }

    for act in &content.acts {
        for scene in act.chapters.iter().flat_map(|c| &c.scenes) {
            if let Some(next) = &scene.next_scene
                && !scene_ids.contains_key(next.as_str())
            {
                issues.push(ContentIssue::error(format!(
                    "scene '{}' points to missing next scene '{next}'",
                    scene.id
                )));
            }
            for option in scene.choices() {
                if let Some(next) = &option.next_scene
                    && !scene_ids.contains_key(next.as_str())
                {
                    issues.push(ContentIssue::error(format!(
                        "choice '{}' in scene '{}' points to missing scene '{next}'",
                        option.id, scene.id
                    )));
                }
            }
        }
    }

    issues
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[ContentIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}
