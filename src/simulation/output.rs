//! Simulation output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Tick;
use crate::simulation::events::{EventType, HistoryLog};
use crate::simulation::scene::{CivSummary, Scene};

/// Complete simulation output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub civilizations: Vec<CivSummary>,
    pub history: HistoryLog,
    pub statistics: SimulationStats,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationStats {
    pub ticks_simulated: Tick,
    pub simulation_time_ms: u64,
    pub total_events: u32,
    pub expansions: u32,
    pub wars_fought: u32,
    pub civs_at_start: u32,
    pub civs_at_end: u32,
    pub civs_collapsed: u32,
    pub cells_owned: u32,
}

impl SimulationOutput {
    pub fn new(scene: &Scene, elapsed: Duration) -> Self {
        let history = scene.history().clone();
        let civs_at_start = scene.civilizations().len() as u32;
        let civs_alive = scene.living_count() as u32;

        let count = |pred: fn(&EventType) -> bool| {
            history.events.iter().filter(|e| pred(&e.event_type)).count() as u32
        };
        let wars_fought = count(|e| matches!(e, EventType::WarDeclared { .. }));
        let expansions = count(|e| matches!(e, EventType::Expansion { .. }));

        let cells_owned = scene.map().cells().iter().filter(|c| c.is_owned()).count() as u32;
        let total_events = history.len() as u32;

        Self {
            seed: scene.config().world.seed,
            width: scene.map().width(),
            height: scene.map().height(),
            civilizations: scene.civ_summaries(),
            history,
            statistics: SimulationStats {
                ticks_simulated: scene.tick(),
                simulation_time_ms: elapsed.as_millis() as u64,
                total_events,
                expansions,
                wars_fought,
                civs_at_start,
                civs_at_end: civs_alive,
                civs_collapsed: civs_at_start.saturating_sub(civs_alive),
                cells_owned,
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        format!(
            "Simulated {} ticks in {}ms\n{} events, {} expansions, {} wars, {} of {} civilizations remain, {} cells owned",
            self.statistics.ticks_simulated,
            self.statistics.simulation_time_ms,
            self.statistics.total_events,
            self.statistics.expansions,
            self.statistics.wars_fought,
            self.statistics.civs_at_end,
            self.statistics.civs_at_start,
            self.statistics.cells_owned,
        )
    }
}
