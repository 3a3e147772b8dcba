pub mod hero;
pub mod outfit;
pub mod pet;
pub mod vitals;

pub use hero::{Hero, HeroUpdate, NewHero};
pub use outfit::{Outfit, OutfitKind, OutfitRequest};
pub use pet::{NewPet, Pet, PetUpdate};
pub use vitals::{Stat, Vitals};
