//! Core type definitions used throughout the codebase

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for pets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(pub u64);

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of the hero a pet is adopted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub u64);

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique action identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Adopt,
    Feed,
    Bathe,
    Walk,
    Dress,
    Cure,
    HealthPotion,
    Revive,
}

impl ActionKind {
    /// Everything except adoption itself needs an owner
    pub fn requires_adoption(&self) -> bool {
        !matches!(self, ActionKind::Adopt)
    }

    /// Care actions are refused for a dead pet
    pub fn requires_alive(&self) -> bool {
        !matches!(self, ActionKind::Adopt | ActionKind::Revive)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Adopt => "adopt",
            ActionKind::Feed => "feed",
            ActionKind::Bathe => "bathe",
            ActionKind::Walk => "walk",
            ActionKind::Dress => "dress",
            ActionKind::Cure => "cure",
            ActionKind::HealthPotion => "health-potion",
            ActionKind::Revive => "revive",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wall-clock timestamp; UTC to avoid timezone ambiguity
pub type Timestamp = DateTime<Utc>;

/// Returns the current wall-clock time
pub fn now() -> Timestamp {
    Utc::now()
}
