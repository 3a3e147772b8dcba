pub mod persistence;
pub mod registry;

pub use persistence::StoreSnapshot;
pub use registry::PetStore;
