//! Turn-based territorial simulation
//!
//! Civilizations live in an append-only roster inside a [`Scene`]. Each tick
//! every living civilization decides, then acts, then grows.

pub mod action;
pub mod civilization;
pub mod decision;
pub mod events;
pub mod output;
pub mod population;
pub mod scene;
pub mod territory;
pub mod war;

pub use action::{CivDecision, SimulationAction};
pub use civilization::Civilization;
pub use events::{Event, EventType, HistoryLog};
pub use output::SimulationOutput;
pub use scene::{CivSummary, Scene, TickSummary};
pub use territory::{claim_cell, lose_cell, place_civilization};
pub use war::War;
