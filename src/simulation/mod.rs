pub mod clock;
pub mod events;

pub use clock::{ClockReport, VitalsClock};
pub use events::{ChangeCause, PetEvent};
