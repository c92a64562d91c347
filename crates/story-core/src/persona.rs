//! Personas and era mindsets.
//!
//! A [`Persona`] is the historical character the player embodies during an
//! act. A [`MindsetContext`] describes what that character could know at
//! the time: which technology exists, which does not, and which problems
//! were open.

use serde::{Deserialize, Serialize};

/// Category of a constraint on a persona or mindset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    /// Limits of the available hardware or technique.
    Technical,
    /// Cost and funding limits.
    Economic,
    /// Institutional or political pressure.
    Political,
    /// Things nobody knew yet.
    Knowledge,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Technical => write!(f, "technical"),
            Self::Economic => write!(f, "economic"),
            Self::Political => write!(f, "political"),
            Self::Knowledge => write!(f, "knowledge"),
        }
    }
}

/// A typed limitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Category.
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    /// Human-readable description.
    pub description: String,
}

impl Constraint {
    /// Create a constraint.
    pub fn new(kind: ConstraintKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

/// A historical character the player role-plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    /// Stable identity used for change detection.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Life span label, e.g. "1906-1992".
    #[serde(default)]
    pub years: String,
    /// Era label.
    #[serde(default)]
    pub era: String,
    /// Avatar image reference.
    #[serde(default)]
    pub avatar: String,
    /// Background narrative.
    #[serde(default)]
    pub background: String,
    /// What drives the persona.
    #[serde(default)]
    pub motivation: String,
    /// A representative quote.
    #[serde(default)]
    pub quote: String,
    /// The persona's key contribution to computing.
    #[serde(default)]
    pub key_contribution: String,
    /// Constraints the persona works under.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl Persona {
    /// Create a persona with only identity fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            years: String::new(),
            era: String::new(),
            avatar: String::new(),
            background: String::new(),
            motivation: String::new(),
            quote: String::new(),
            key_contribution: String::new(),
            constraints: Vec::new(),
        }
    }

    /// Whether two personas share an identity.
    pub fn same_identity(&self, other: &Persona) -> bool {
        self.id == other.id
    }
}

/// The "then versus now" framing for a mindset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalPerspective {
    /// What the persona cannot yet see.
    pub limitation: String,
    /// What the persona is reaching for.
    pub aspiration: String,
}

/// The knowledge envelope for the current era.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindsetContext {
    /// Persona this mindset belongs to.
    #[serde(default)]
    pub persona_id: String,
    /// Year the mindset is anchored to.
    #[serde(default)]
    pub year: i32,
    /// Technology the persona knows about.
    #[serde(default)]
    pub known_technology: Vec<String>,
    /// Technology that does not exist yet.
    #[serde(default)]
    pub unknown_technology: Vec<String>,
    /// Open problems of the era.
    #[serde(default)]
    pub active_problems: Vec<String>,
    /// Constraints in force.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// Things believed impossible at the time.
    #[serde(default)]
    pub impossibilities: Vec<String>,
    /// Narrative framing.
    #[serde(default)]
    pub perspective: HistoricalPerspective,
}

impl MindsetContext {
    /// Whether a technology is known in this era (case-insensitive).
    pub fn knows(&self, technology: &str) -> bool {
        self.known_technology
            .iter()
            .any(|t| t.eq_ignore_ascii_case(technology))
    }

    /// Whether a technology is explicitly unknown in this era (case-insensitive).
    pub fn is_unknown(&self, technology: &str) -> bool {
        self.unknown_technology
            .iter()
            .any(|t| t.eq_ignore_ascii_case(technology))
    }
}
