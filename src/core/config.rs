//! Vitals configuration with documented constants
//!
//! All decay quanta and thresholds are collected here with explanations of
//! what they drive. The defaults reproduce the classic pet behaviour: one
//! decay step every 30 seconds.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{PetError, Result};

/// Configuration for the vitals clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    // === TIME ===
    /// Length of one decay step in seconds
    ///
    /// Decay is discrete: elapsed time is floored to whole steps and the
    /// remainder carries over to the next clock call.
    pub step_seconds: u64,

    // === DECAY ===
    /// Hunger gained per step (100 = starving)
    pub hunger_per_step: u32,

    /// Happiness lost per step
    pub happiness_decay_per_step: u32,

    /// Cleanliness lost per step
    pub cleanliness_decay_per_step: u32,

    // === HEALTH DAMAGE ===
    /// Hunger strictly above this value costs health every step
    pub starving_above: u8,

    /// Cleanliness strictly below this value costs health every step
    pub filthy_below: u8,

    /// Health lost per step for each damaging condition
    ///
    /// Starvation and filth stack: a starving, filthy pet loses twice this.
    pub health_loss_per_step: u32,

    /// Judge starvation, filth and recovery on the vitals before this batch
    /// of decay instead of after it
    ///
    /// Off by default. When on, a long unobserved gap costs no health until
    /// the following clock call.
    pub thresholds_before_decay: bool,

    // === RECOVERY ===
    /// Whether a well-fed, clean pet slowly regains health
    ///
    /// Some deployments ran without this rule, so it is an explicit toggle.
    pub enable_auto_recovery: bool,

    /// Hunger must be strictly below this for recovery
    pub recovery_hunger_below: u8,

    /// Cleanliness must be strictly above this for recovery
    pub recovery_cleanliness_above: u8,

    /// Health regained per step while recovering
    pub health_recovery_per_step: u32,

    // === SICKNESS ===
    /// A pet whose health is strictly below this is sick
    pub sick_below: u8,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            step_seconds: 30,

            hunger_per_step: 10,
            happiness_decay_per_step: 6,
            cleanliness_decay_per_step: 6,

            starving_above: 70,
            filthy_below: 30,
            health_loss_per_step: 10,
            thresholds_before_decay: false,

            enable_auto_recovery: true,
            recovery_hunger_below: 30,
            recovery_cleanliness_above: 70,
            health_recovery_per_step: 4,

            sick_below: 30,
        }
    }
}

impl VitalsConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same config with auto-recovery switched on or off
    pub fn with_auto_recovery(mut self, enabled: bool) -> Self {
        self.enable_auto_recovery = enabled;
        self
    }

    /// Same config with damage and recovery judged on pre-decay vitals
    pub fn with_thresholds_before_decay(mut self, enabled: bool) -> Self {
        self.thresholds_before_decay = enabled;
        self
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: VitalsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.step_seconds == 0 {
            return Err(PetError::InvalidConfig(
                "step_seconds must be positive".into(),
            ));
        }

        let thresholds = [
            ("starving_above", self.starving_above),
            ("filthy_below", self.filthy_below),
            ("recovery_hunger_below", self.recovery_hunger_below),
            ("recovery_cleanliness_above", self.recovery_cleanliness_above),
            ("sick_below", self.sick_below),
        ];
        for (name, value) in thresholds {
            if value > 100 {
                return Err(PetError::InvalidConfig(format!(
                    "{} ({}) must lie in 0..=100",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
