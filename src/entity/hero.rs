//! Heroes: the owners pets get adopted by

use serde::{Deserialize, Serialize};

use crate::core::error::{PetError, Result};
use crate::core::types::HeroId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub alias: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

impl Hero {
    /// Case-insensitive, whole-name match on the hero's city
    pub fn is_in_city(&self, city: &str) -> bool {
        self.city
            .as_deref()
            .is_some_and(|own| own.trim().to_lowercase() == city.trim().to_lowercase())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHero {
    pub name: String,
    pub alias: String,
    pub city: Option<String>,
    pub team: Option<String>,
}

impl NewHero {
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.alias.trim().is_empty() {
            return Err(PetError::Validation(
                "a hero needs both a name and an alias".into(),
            ));
        }
        Ok(())
    }

    pub fn into_hero(self, id: HeroId) -> Hero {
        Hero {
            id,
            name: self.name,
            alias: self.alias,
            city: self.city,
            team: self.team,
        }
    }
}

/// Partial edit of a hero; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroUpdate {
    pub name: Option<String>,
    pub alias: Option<String>,
    pub city: Option<String>,
    pub team: Option<String>,
}

impl HeroUpdate {
    /// Name and alias stay required, so they may not be blanked
    pub fn validate(&self) -> Result<()> {
        let blank = |field: &Option<String>| matches!(field, Some(value) if value.trim().is_empty());
        if blank(&self.name) || blank(&self.alias) {
            return Err(PetError::Validation(
                "a hero's name and alias cannot be blank".into(),
            ));
        }
        Ok(())
    }

    pub fn apply_to(&self, hero: &mut Hero) {
        if let Some(name) = &self.name {
            hero.name = name.trim().to_string();
        }
        if let Some(alias) = &self.alias {
            hero.alias = alias.trim().to_string();
        }
        if let Some(city) = &self.city {
            hero.city = Some(city.trim().to_string());
        }
        if let Some(team) = &self.team {
            hero.team = Some(team.trim().to_string());
        }
    }
}
