//! Petkeeper - Virtual Pet Lifecycle Engine

pub mod actions;
pub mod core;
pub mod entity;
pub mod simulation;
pub mod store;
