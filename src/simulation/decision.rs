//! Per-tick decision making
//!
//! Each living civilization weighs two scores every tick:
//!
//! - `expand = base_expand + population / total_housing`: pressure grows as
//!   housing fills up.
//! - `exterminate = base_exterminate - war_cooldown * war_cooldown_mod +
//!   hostility`, where hostility comes from the most hated rival below the
//!   hate threshold. With no such rival the score is 0.
//!
//! The higher score wins. Expansion goes to the most valuable border cell.

use tracing::debug;

use crate::core::types::{CellId, CivId};
use crate::simulation::action::SimulationAction;
use crate::simulation::events::EventType;
use crate::simulation::scene::Scene;
use crate::simulation::territory::lose_cell;

/// Bonus for an unowned cell and for each adjacent cell the evaluator owns
const CELL_BONUS: f64 = 2.5;

/// Base of the multiplier applied to cells owned by someone else
const OWNED_CELL_PENALTY: f64 = -10.0;

impl Scene {
    /// Decide what `civ` does this tick
    ///
    /// Prunes dead rivals from the opinion map and decays the war cooldown
    /// before scoring. A civilization with no border left gives up its first
    /// territory cell instead of acting. `None` means do nothing.
    pub fn determine_action(&mut self, civ: CivId) -> Option<SimulationAction> {
        if !self.is_alive(civ) {
            return None;
        }

        let alive: Vec<bool> = self.civs.iter().map(|c| c.is_alive()).collect();
        let behavior = &self.config.behavior;
        let actor = &mut self.civs[civ.index()];

        let pruned = actor.prune_opinions(|id| alive.get(id.index()).copied().unwrap_or(false));
        if pruned > 0 {
            debug!("{} forgot {} dead rivals", actor.name, pruned);
        }
        actor.decay_war_cooldown(behavior.war_cooldown_decay);

        if actor.at_war() {
            return None;
        }

        let housing = actor.total_housing.max(1);
        let expand = actor.base_expand + actor.population() as f64 / housing as f64;

        let mut target: Option<(CivId, i32)> = None;
        for (&rival, &opinion) in actor.opinions() {
            if rival == civ || opinion >= behavior.hate_threshold {
                continue;
            }
            if target.map_or(true, |(_, lowest)| opinion < lowest) {
                target = Some((rival, opinion));
            }
        }

        // Without a target there is no one to fight
        let exterminate = match target {
            Some((_, opinion)) => {
                let hostility = (opinion.unsigned_abs() as f64 * behavior.hate_mod)
                    .clamp(0.0, behavior.hostility_cap);
                actor.base_exterminate - actor.war_cooldown() as f64 * behavior.war_cooldown_mod
                    + hostility
            }
            None => 0.0,
        };

        if expand > exterminate {
            let border: Vec<CellId> = actor.neighbors().iter().copied().collect();
            let first_owned = actor.territory().iter().next().copied();

            let mut best: Option<(CellId, f64)> = None;
            for cell in border {
                let value = self.calculate_cell_value(civ, cell);
                if best.map_or(true, |(_, v)| value > v) {
                    best = Some((cell, value));
                }
            }

            return match best {
                Some((cell, value)) => {
                    debug!("{:?} expands toward {:?} (value {:.3})", civ, cell, value);
                    Some(SimulationAction::expand(civ, cell))
                }
                None => {
                    // Nowhere to grow: contract
                    if let Some(cell) = first_owned {
                        if lose_cell(&mut self.map, &mut self.civs, civ, cell) {
                            let tick = self.tick();
                            self.history
                                .add_event(EventType::CellLost { civ, cell }, tick, vec![civ]);
                        }
                    }
                    None
                }
            };
        }

        target.map(|(rival, _)| SimulationAction::exterminate(civ, rival))
    }

    /// How attractive `cell` is to `civ`
    ///
    /// Unknown ids score negative infinity so they are never chosen.
    pub fn calculate_cell_value(&self, civ: CivId, cell: CellId) -> f64 {
        let (Some(evaluator), Some(target)) = (self.civilization(civ), self.map.cell(cell)) else {
            return f64::NEG_INFINITY;
        };

        let mut value = target.base_value();
        if target.is_owned() {
            value *= OWNED_CELL_PENALTY + evaluator.base_exterminate;
        } else {
            value += CELL_BONUS;
        }

        let adjacent_owned = target
            .neighbors()
            .iter()
            .filter(|&&n| self.map.owner_of(n) == Some(civ))
            .count();

        value + CELL_BONUS * adjacent_owned as f64
    }
}
