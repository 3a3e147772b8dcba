//! Outfits a pet can be dressed in

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{PetError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutfitKind {
    Free,
    Paid,
}

impl FromStr for OutfitKind {
    type Err = PetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(OutfitKind::Free),
            "paid" => Ok(OutfitKind::Paid),
            other => Err(PetError::InvalidOutfit(format!(
                "unknown outfit kind '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OutfitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutfitKind::Free => write!(f, "free"),
            OutfitKind::Paid => write!(f, "paid"),
        }
    }
}

/// A piece of clothing worn by a pet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    pub name: String,
    pub kind: OutfitKind,
}

/// Outfit as submitted by a caller, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitRequest {
    pub name: Option<String>,
    pub kind: Option<String>,
}

impl OutfitRequest {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(kind.into()),
        }
    }

    /// Both a non-blank name and a known kind are required
    pub fn validate(&self) -> Result<Outfit> {
        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(PetError::InvalidOutfit("outfit needs a name".into())),
        };
        let kind = match self.kind.as_deref() {
            Some(kind) => kind.parse()?,
            None => return Err(PetError::InvalidOutfit("outfit needs a kind".into())),
        };
        Ok(Outfit { name, kind })
    }
}
