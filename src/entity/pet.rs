//! The pet record and the requests that create or edit it

use serde::{Deserialize, Serialize};

use crate::core::error::{PetError, Result};
use crate::core::types::{HeroId, PetId, Timestamp};
use crate::entity::outfit::Outfit;
use crate::entity::vitals::Vitals;

/// A virtual pet
///
/// `sick` and `dead` are derived flags: the vitals clock recomputes them
/// from `vitals` every time it runs, so they are only authoritative on a
/// record that has just been advanced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub adopted_by: Option<HeroId>,
    #[serde(flatten)]
    pub vitals: Vitals,
    #[serde(default)]
    pub sick: bool,
    #[serde(default)]
    pub dead: bool,
    #[serde(default)]
    pub outfits: Vec<Outfit>,
    /// Last instant at which `vitals` were authoritative
    pub last_state_time: Timestamp,
}

impl Pet {
    /// A new, unadopted pet with full default vitals
    pub fn new(id: PetId, name: String, species: String, created_at: Timestamp) -> Self {
        Self {
            id,
            name,
            species,
            adopted_by: None,
            vitals: Vitals::default(),
            sick: false,
            dead: false,
            outfits: Vec::new(),
            last_state_time: created_at,
        }
    }

    pub fn is_adopted(&self) -> bool {
        self.adopted_by.is_some()
    }
}

/// Fields required to create a pet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPet {
    pub name: String,
    pub species: String,
}

impl NewPet {
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PetError::Validation("pet name is required".into()));
        }
        if self.species.trim().is_empty() {
            return Err(PetError::Validation("pet species is required".into()));
        }
        Ok(())
    }
}

/// Descriptive edits; vitals can only change through the clock and actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetUpdate {
    pub name: Option<String>,
    pub species: Option<String>,
}

impl PetUpdate {
    pub fn validate(&self) -> Result<()> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(PetError::Validation("pet name cannot be blank".into()));
        }
        if matches!(&self.species, Some(species) if species.trim().is_empty()) {
            return Err(PetError::Validation("pet species cannot be blank".into()));
        }
        Ok(())
    }

    pub fn apply_to(&self, pet: &mut Pet) {
        if let Some(name) = &self.name {
            pet.name = name.trim().to_string();
        }
        if let Some(species) = &self.species {
            pet.species = species.trim().to_string();
        }
    }
}
