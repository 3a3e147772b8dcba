//! Vitals clock - brings a pet's vitals up to date
//!
//! Decay is lazy and discrete: nothing ticks in the background. Whenever a
//! pet is read or acted upon, the time since `last_state_time` is cut into
//! whole steps and every step's worth of decay is applied at once (scaled,
//! not iterated). The partial step left over stays on the clock because
//! `last_state_time` only moves forward by whole steps.
//!
//! Damage and recovery thresholds are checked after hunger and cleanliness
//! have taken this batch of decay, so one long gap costs as much health as
//! the same time read in small slices would. `thresholds_before_decay`
//! switches to judging them on the vitals at `last_state_time` instead.

use chrono::Duration;

use crate::core::config::VitalsConfig;
use crate::core::types::Timestamp;
use crate::entity::pet::Pet;
use crate::entity::vitals::{Stat, Vitals};
use crate::simulation::events::{ChangeCause, PetEvent};

/// What one clock call did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockReport {
    pub steps: u64,
    pub events: Vec<PetEvent>,
}

#[derive(Debug, Clone, Default)]
pub struct VitalsClock {
    config: VitalsConfig,
}

impl VitalsClock {
    pub fn new(config: VitalsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VitalsConfig {
        &self.config
    }

    /// Number of whole steps between two instants (0 if `now` is earlier)
    pub fn steps_between(&self, last: Timestamp, now: Timestamp) -> u64 {
        let elapsed_ms = (now - last).num_milliseconds();
        if elapsed_ms <= 0 {
            return 0;
        }
        elapsed_ms as u64 / self.step_millis()
    }

    /// Advance `pet` to `now`, recomputing `sick` and `dead`
    ///
    /// A dead pet is left untouched: time stops accruing against it.
    pub fn advance(&self, pet: &mut Pet, now: Timestamp) -> ClockReport {
        let mut report = ClockReport::default();
        if pet.dead {
            return report;
        }

        let steps = self.steps_between(pet.last_state_time, now);
        if steps > 0 {
            let from = pet.last_state_time;
            // steps * step_millis <= elapsed millis, so this fits in i64
            let to = from + Duration::milliseconds((steps * self.step_millis()) as i64);
            report
                .events
                .push(PetEvent::ClockAdvanced { steps, from, to });
            self.decay(&mut pet.vitals, steps, &mut report.events);
            pet.last_state_time = to;
        }
        report.steps = steps;

        self.refresh_flags(pet, &mut report.events);
        report
    }

    fn decay(&self, vitals: &mut Vitals, steps: u64, events: &mut Vec<PetEvent>) {
        let cfg = &self.config;
        let before = *vitals;
        let scaled = |per_step: u32| steps.saturating_mul(per_step as u64);

        let mut changes = vec![
            (
                Stat::Hunger,
                vitals.raise(Stat::Hunger, scaled(cfg.hunger_per_step)),
                ChangeCause::Decay,
            ),
            (
                Stat::Happiness,
                vitals.lower(Stat::Happiness, scaled(cfg.happiness_decay_per_step)),
                ChangeCause::Decay,
            ),
            (
                Stat::Cleanliness,
                vitals.lower(Stat::Cleanliness, scaled(cfg.cleanliness_decay_per_step)),
                ChangeCause::Decay,
            ),
        ];

        let judged = if cfg.thresholds_before_decay {
            before
        } else {
            *vitals
        };
        if judged.hunger > cfg.starving_above {
            let change = vitals.lower(Stat::Health, scaled(cfg.health_loss_per_step));
            changes.push((Stat::Health, change, ChangeCause::Starvation));
        }
        if judged.cleanliness < cfg.filthy_below {
            let change = vitals.lower(Stat::Health, scaled(cfg.health_loss_per_step));
            changes.push((Stat::Health, change, ChangeCause::Filth));
        }
        if cfg.enable_auto_recovery
            && judged.hunger < cfg.recovery_hunger_below
            && judged.cleanliness > cfg.recovery_cleanliness_above
        {
            let change = vitals.raise(Stat::Health, scaled(cfg.health_recovery_per_step));
            changes.push((Stat::Health, change, ChangeCause::Recovery));
        }

        events.extend(
            changes
                .into_iter()
                .filter_map(|(stat, change, cause)| PetEvent::stat_change(stat, change, cause)),
        );
    }

    /// Re-derive `sick` and `dead` from the vitals
    pub(crate) fn refresh_flags(&self, pet: &mut Pet, events: &mut Vec<PetEvent>) {
        let sick = pet.vitals.health < self.config.sick_below;
        match (pet.sick, sick) {
            (false, true) => events.push(PetEvent::BecameSick),
            (true, false) => events.push(PetEvent::Recovered),
            _ => {}
        }
        pet.sick = sick;

        let dead = pet.vitals.is_death_quadruple();
        if dead && !pet.dead {
            events.push(PetEvent::Died);
        }
        pet.dead = dead;
    }

    fn step_millis(&self) -> u64 {
        self.config.step_seconds.max(1).saturating_mul(1000)
    }
}
