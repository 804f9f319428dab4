//! Orbis - turn-based territorial civilization simulation

pub mod core;
pub mod simulation;
pub mod world;
