use thiserror::Error;

use crate::core::types::{HeroId, PetId};

#[derive(Error, Debug)]
pub enum PetError {
    #[error("Pet not found: {0}")]
    PetNotFound(PetId),

    #[error("Hero not found: {0}")]
    HeroNotFound(HeroId),

    #[error("Pet {0} has not been adopted")]
    NotAdopted(PetId),

    #[error("Pet {pet} was already adopted by hero {hero}")]
    AlreadyAdopted { pet: PetId, hero: HeroId },

    #[error("Pet {pet} does not belong to hero {hero}")]
    NotOwner { pet: PetId, hero: HeroId },

    #[error("Pet {0} is dead")]
    PetIsDead(PetId),

    #[error("Pet {0} is not sick")]
    NotSick(PetId),

    #[error("Pet {0} is not dead")]
    NotDead(PetId),

    #[error("Invalid outfit: {0}")]
    InvalidOutfit(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Coarse error taxonomy, for callers mapping failures onto transport statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NotAdopted,
    AlreadyAdopted,
    NotOwner,
    PetIsDead,
    NotSick,
    NotDead,
    InvalidOutfit,
    Validation,
    Internal,
}

impl PetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PetError::PetNotFound(_) | PetError::HeroNotFound(_) => ErrorKind::NotFound,
            PetError::NotAdopted(_) => ErrorKind::NotAdopted,
            PetError::AlreadyAdopted { .. } => ErrorKind::AlreadyAdopted,
            PetError::NotOwner { .. } => ErrorKind::NotOwner,
            PetError::PetIsDead(_) => ErrorKind::PetIsDead,
            PetError::NotSick(_) => ErrorKind::NotSick,
            PetError::NotDead(_) => ErrorKind::NotDead,
            PetError::InvalidOutfit(_) => ErrorKind::InvalidOutfit,
            PetError::Validation(_) => ErrorKind::Validation,
            PetError::InvalidConfig(_)
            | PetError::Config(_)
            | PetError::IoError(_)
            | PetError::SerdeError(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, PetError>;
