pub mod config;
pub mod error;
pub mod time;
pub mod types;

pub use config::VitalsConfig;
pub use error::{ErrorKind, PetError, Result};
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use types::{ActionKind, HeroId, PetId, Timestamp};
