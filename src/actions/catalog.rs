//! Action definitions and catalog

use serde::{Deserialize, Serialize};

pub use crate::core::types::ActionKind;
use crate::core::types::HeroId;
use crate::entity::outfit::OutfitRequest;

/// Hunger removed by a feed when the caller gives no amount
pub const DEFAULT_FEED_AMOUNT: u32 = 20;

pub const FEED_HAPPINESS: u64 = 10;
/// Health bonus for a feed that leaves the pet nearly full
pub const FEED_HEALTH: u64 = 5;
/// Hunger strictly below this after feeding earns the health bonus
pub const WELL_FED_BELOW: u8 = 30;

pub const BATHE_CLEANLINESS: u64 = 40;
pub const BATHE_HAPPINESS: u64 = 5;

pub const WALK_HAPPINESS: u64 = 10;
pub const WALK_HUNGER: u64 = 10;
pub const WALK_HEALTH: u64 = 5;

pub const DRESS_HAPPINESS: u64 = 2;

pub const CURE_HEALTH: u64 = 20;
pub const CURE_HAPPINESS: u64 = 10;

/// A player request against one pet, with its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum PetAction {
    Adopt { hero: HeroId },
    Feed { amount: u32 },
    Bathe,
    Walk,
    Dress { outfit: OutfitRequest },
    Cure,
    HealthPotion,
    Revive,
}

impl PetAction {
    /// Feed with the default amount
    pub fn feed() -> Self {
        PetAction::Feed {
            amount: DEFAULT_FEED_AMOUNT,
        }
    }

    pub fn dress(name: impl Into<String>, kind: impl Into<String>) -> Self {
        PetAction::Dress {
            outfit: OutfitRequest::new(name, kind),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            PetAction::Adopt { .. } => ActionKind::Adopt,
            PetAction::Feed { .. } => ActionKind::Feed,
            PetAction::Bathe => ActionKind::Bathe,
            PetAction::Walk => ActionKind::Walk,
            PetAction::Dress { .. } => ActionKind::Dress,
            PetAction::Cure => ActionKind::Cure,
            PetAction::HealthPotion => ActionKind::HealthPotion,
            PetAction::Revive => ActionKind::Revive,
        }
    }
}
