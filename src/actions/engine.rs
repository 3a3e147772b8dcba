//! Action engine - validated, bounded mutations of a single pet
//!
//! Every action runs the same sequence: ownership check, payload check,
//! clock advance, state check, delta, re-timestamp, flag refresh. The engine
//! works on a copy, so a failed action leaves the caller's record as it was.

use crate::actions::catalog::*;
use crate::core::config::VitalsConfig;
use crate::core::error::{PetError, Result};
use crate::core::types::Timestamp;
use crate::entity::outfit::Outfit;
use crate::entity::pet::Pet;
use crate::entity::vitals::{
    Stat, DEFAULT_CLEANLINESS, DEFAULT_HAPPINESS, DEFAULT_HEALTH, DEFAULT_HUNGER, MAX_VITAL,
};
use crate::simulation::clock::VitalsClock;
use crate::simulation::events::{ChangeCause, PetEvent};

/// Result of a successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub pet: Pet,
    /// Clock decay folded in before the action, then the action's own changes
    pub events: Vec<PetEvent>,
}

#[derive(Debug, Clone, Default)]
pub struct ActionEngine {
    clock: VitalsClock,
}

impl ActionEngine {
    pub fn new(config: VitalsConfig) -> Self {
        Self {
            clock: VitalsClock::new(config),
        }
    }

    pub fn clock(&self) -> &VitalsClock {
        &self.clock
    }

    /// Apply `action` to `pet` as of `now`
    pub fn perform(&self, pet: &Pet, action: &PetAction, now: Timestamp) -> Result<ActionOutcome> {
        let kind = action.kind();
        check_ownership(pet, kind)?;
        let outfit = match action {
            PetAction::Dress { outfit } => Some(outfit.validate()?),
            _ => None,
        };

        let mut next = pet.clone();
        let mut events = self.clock.advance(&mut next, now).events;
        check_state(&next, kind)?;

        let mut effect = Effect {
            pet: &mut next,
            cause: ChangeCause::Action(kind),
            events: &mut events,
        };
        match action {
            PetAction::Adopt { hero } => {
                effect.pet.adopted_by = Some(*hero);
                effect.events.push(PetEvent::Adopted { hero: *hero });
            }
            PetAction::Feed { amount } => {
                effect.lower(Stat::Hunger, *amount as u64);
                effect.raise(Stat::Happiness, FEED_HAPPINESS);
                if effect.pet.vitals.hunger < WELL_FED_BELOW {
                    effect.raise(Stat::Health, FEED_HEALTH);
                }
            }
            PetAction::Bathe => {
                effect.raise(Stat::Cleanliness, BATHE_CLEANLINESS);
                effect.raise(Stat::Happiness, BATHE_HAPPINESS);
            }
            PetAction::Walk => {
                effect.raise(Stat::Happiness, WALK_HAPPINESS);
                effect.raise(Stat::Hunger, WALK_HUNGER);
                effect.raise(Stat::Health, WALK_HEALTH);
            }
            PetAction::Dress { .. } => {
                if let Some(outfit) = outfit {
                    effect.equip(outfit);
                }
                effect.raise(Stat::Happiness, DRESS_HAPPINESS);
            }
            PetAction::Cure => {
                effect.clear_sickness();
                effect.raise(Stat::Health, CURE_HEALTH);
                effect.raise(Stat::Happiness, CURE_HAPPINESS);
            }
            PetAction::HealthPotion => {
                effect.set(Stat::Health, MAX_VITAL);
                effect.clear_sickness();
            }
            PetAction::Revive => {
                effect.set(Stat::Health, DEFAULT_HEALTH);
                effect.set(Stat::Happiness, DEFAULT_HAPPINESS);
                effect.set(Stat::Cleanliness, DEFAULT_CLEANLINESS);
                effect.set(Stat::Hunger, DEFAULT_HUNGER);
                effect.clear_sickness();
                effect.pet.dead = false;
                effect.events.push(PetEvent::Revived);
            }
        }

        next.last_state_time = now;
        // Zero elapsed steps; only re-derives the flags
        events.extend(self.clock.advance(&mut next, now).events);

        Ok(ActionOutcome {
            kind,
            pet: next,
            events,
        })
    }
}

fn check_ownership(pet: &Pet, kind: ActionKind) -> Result<()> {
    match (kind, pet.adopted_by) {
        (ActionKind::Adopt, Some(hero)) => Err(PetError::AlreadyAdopted { pet: pet.id, hero }),
        (kind, None) if kind.requires_adoption() => Err(PetError::NotAdopted(pet.id)),
        _ => Ok(()),
    }
}

fn check_state(pet: &Pet, kind: ActionKind) -> Result<()> {
    if pet.dead && kind.requires_alive() {
        return Err(PetError::PetIsDead(pet.id));
    }
    match kind {
        ActionKind::Revive if !pet.dead => Err(PetError::NotDead(pet.id)),
        ActionKind::Cure if !pet.sick => Err(PetError::NotSick(pet.id)),
        _ => Ok(()),
    }
}

/// Applies one action's deltas while recording them
struct Effect<'a> {
    pet: &'a mut Pet,
    cause: ChangeCause,
    events: &'a mut Vec<PetEvent>,
}

impl Effect<'_> {
    fn raise(&mut self, stat: Stat, amount: u64) {
        let change = self.pet.vitals.raise(stat, amount);
        self.record(stat, change);
    }

    fn lower(&mut self, stat: Stat, amount: u64) {
        let change = self.pet.vitals.lower(stat, amount);
        self.record(stat, change);
    }

    fn set(&mut self, stat: Stat, value: u8) {
        let before = self.pet.vitals.get(stat);
        self.pet.vitals.set(stat, value);
        self.record(stat, (before, self.pet.vitals.get(stat)));
    }

    fn equip(&mut self, outfit: Outfit) {
        self.pet.outfits.push(outfit.clone());
        self.events.push(PetEvent::OutfitEquipped { outfit });
    }

    fn clear_sickness(&mut self) {
        if self.pet.sick {
            self.events.push(PetEvent::Recovered);
        }
        self.pet.sick = false;
    }

    fn record(&mut self, stat: Stat, change: (u8, u8)) {
        self.events
            .extend(PetEvent::stat_change(stat, change, self.cause));
    }
}
