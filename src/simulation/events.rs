//! Structured records of what the clock and actions did to a pet
//!
//! The clock and the action engine never log. They return these events
//! alongside the updated pet and leave reporting to the caller.

use serde::{Deserialize, Serialize};

use crate::core::types::{ActionKind, HeroId, Timestamp};
use crate::entity::outfit::Outfit;
use crate::entity::vitals::Stat;

/// Why a vital changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeCause {
    /// Ordinary per-step drift (hunger rises, happiness and cleanliness fall)
    Decay,
    /// Health lost to high hunger
    Starvation,
    /// Health lost to low cleanliness
    Filth,
    /// Health regained while fed and clean
    Recovery,
    /// A player action
    Action(ActionKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetEvent {
    /// Whole decay steps were folded into the vitals
    ClockAdvanced {
        steps: u64,
        from: Timestamp,
        to: Timestamp,
    },
    StatChanged {
        stat: Stat,
        before: u8,
        after: u8,
        cause: ChangeCause,
    },
    BecameSick,
    /// Sickness cleared, by health climbing back or by treatment
    Recovered,
    Died,
    Revived,
    OutfitEquipped {
        outfit: Outfit,
    },
    Adopted {
        hero: HeroId,
    },
    /// The owner gave the pet up
    Released {
        hero: HeroId,
    },
}

impl PetEvent {
    pub(crate) fn stat_change(
        stat: Stat,
        (before, after): (u8, u8),
        cause: ChangeCause,
    ) -> Option<Self> {
        (before != after).then_some(PetEvent::StatChanged {
            stat,
            before,
            after,
            cause,
        })
    }
}
