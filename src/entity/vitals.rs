//! The four bounded vitals that describe a pet's wellbeing

use serde::{Deserialize, Serialize};

/// Upper bound shared by every vital
pub const MAX_VITAL: u8 = 100;

/// Vitals of a freshly created or revived pet
pub const DEFAULT_HEALTH: u8 = 100;
pub const DEFAULT_HAPPINESS: u8 = 100;
pub const DEFAULT_HUNGER: u8 = 50;
pub const DEFAULT_CLEANLINESS: u8 = 100;

/// Vitals, each kept within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    /// 0 = dying, 100 = perfectly healthy
    pub health: u8,
    /// 0 = miserable, 100 = delighted
    pub happiness: u8,
    /// 0 = full, 100 = starving
    pub hunger: u8,
    /// 0 = filthy, 100 = spotless
    pub cleanliness: u8,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            health: DEFAULT_HEALTH,
            happiness: DEFAULT_HAPPINESS,
            hunger: DEFAULT_HUNGER,
            cleanliness: DEFAULT_CLEANLINESS,
        }
    }
}

impl Vitals {
    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Health => self.health,
            Stat::Happiness => self.happiness,
            Stat::Hunger => self.hunger,
            Stat::Cleanliness => self.cleanliness,
        }
    }

    /// Set a vital, clamping to the valid range
    pub fn set(&mut self, stat: Stat, value: u8) {
        let value = value.min(MAX_VITAL);
        match stat {
            Stat::Health => self.health = value,
            Stat::Happiness => self.happiness = value,
            Stat::Hunger => self.hunger = value,
            Stat::Cleanliness => self.cleanliness = value,
        }
    }

    /// Increase a vital, capped at 100. Returns the (before, after) pair.
    pub fn raise(&mut self, stat: Stat, amount: u64) -> (u8, u8) {
        let before = self.get(stat);
        let after = (before as u64)
            .saturating_add(amount)
            .min(MAX_VITAL as u64) as u8;
        self.set(stat, after);
        (before, after)
    }

    /// Decrease a vital, floored at 0. Returns the (before, after) pair.
    pub fn lower(&mut self, stat: Stat, amount: u64) -> (u8, u8) {
        let before = self.get(stat);
        let after = (before as u64).saturating_sub(amount) as u8;
        self.set(stat, after);
        (before, after)
    }

    /// Pull any out-of-range value (e.g. from a hand-edited snapshot) back to 100
    pub fn clamped(self) -> Self {
        Self {
            health: self.health.min(MAX_VITAL),
            happiness: self.happiness.min(MAX_VITAL),
            hunger: self.hunger.min(MAX_VITAL),
            cleanliness: self.cleanliness.min(MAX_VITAL),
        }
    }

    /// True only for the exact death quadruple (0, 0, 0, starving)
    pub fn is_death_quadruple(&self) -> bool {
        self.health == 0
            && self.happiness == 0
            && self.cleanliness == 0
            && self.hunger == MAX_VITAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Health,
    Happiness,
    Hunger,
    Cleanliness,
}
