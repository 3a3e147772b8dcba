pub mod catalog;
pub mod engine;

pub use catalog::{ActionKind, PetAction, DEFAULT_FEED_AMOUNT};
pub use engine::{ActionEngine, ActionOutcome};
