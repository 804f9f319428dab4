//! Territory mutation: claiming and losing cells
//!
//! These functions keep three things in step: the cell's owner, the owning
//! civilization's territory set, and its border (`neighbors`) set. All
//! validation happens before the first write, so a failed call leaves the
//! world untouched.

use std::collections::BTreeSet;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{CellId, CivId};
use crate::simulation::civilization::Civilization;
use crate::world::map::WorldMap;

/// Give `cell` to `civ`, taking it from its previous owner if any
pub fn claim_cell(
    map: &mut WorldMap,
    civs: &mut [Civilization],
    civ: CivId,
    cell: CellId,
    config: &SimulationConfig,
) -> Result<()> {
    if civ.index() >= civs.len() {
        return Err(SimError::UnknownCivilization(civ));
    }
    let Some(target) = map.cell(cell) else {
        return Err(SimError::CellOutOfRange(cell));
    };
    let prior = target.owner();

    if prior == Some(civ) {
        // Already ours; only the border around it is refreshed
        let neighbors: Vec<CellId> = target.neighbors().to_vec();
        let claimer = &mut civs[civ.index()];
        for n in neighbors {
            if map.owner_of(n) != Some(civ) {
                claimer.neighbors.insert(n);
            }
        }
        claimer.neighbors.remove(&cell);
        return Ok(());
    }

    if let Some(previous) = prior {
        lose_cell(map, civs, previous, cell);
    }

    map.set_owner(cell, Some(civ));

    let behavior = &config.behavior;
    let claimer = &mut civs[civ.index()];
    claimer.territory.insert(cell);

    for &n in map.neighbors_of(cell) {
        match map.owner_of(n) {
            Some(owner) if owner == civ => {}
            Some(owner) => {
                claimer.neighbors.insert(n);
                claimer.record_contact(owner, behavior.first_contact_opinion, behavior.contact_penalty);
            }
            None => {
                claimer.neighbors.insert(n);
            }
        }
    }
    claimer.neighbors.remove(&cell);

    if let Some(target) = map.cell_mut(cell) {
        claimer.total_housing += target.max_housing;
        target.population = if target.is_water {
            0
        } else {
            config.placement.initial_cell_population
        };
    }

    Ok(())
}

/// Remove `cell` from `civ`'s territory
///
/// Returns false, without touching anything, when the ids are unknown or the
/// cell is not owned by `civ`.
pub fn lose_cell(map: &mut WorldMap, civs: &mut [Civilization], civ: CivId, cell: CellId) -> bool {
    let Some(loser) = civs.get_mut(civ.index()) else {
        return false;
    };
    if map.owner_of(cell) != Some(civ) {
        return false;
    }

    map.set_owner(cell, None);
    loser.territory.remove(&cell);
    if let Some(lost) = map.cell(cell) {
        loser.total_housing -= lost.max_housing;
    }

    let mut candidates: Vec<CellId> = map.neighbors_of(cell).to_vec();
    candidates.push(cell);

    for candidate in candidates {
        if map.owner_of(candidate) == Some(civ) {
            continue;
        }
        let borders = map
            .neighbors_of(candidate)
            .iter()
            .any(|&n| map.owner_of(n) == Some(civ));
        if borders {
            loser.neighbors.insert(candidate);
        } else {
            loser.neighbors.remove(&candidate);
        }
    }

    true
}

/// Bootstrap a civilization on an unowned cell at generation time
///
/// No prior owner loses anything and no opinions change, but territory,
/// border, housing and population are set so that every invariant holds
/// before the first tick.
pub fn place_civilization(
    map: &mut WorldMap,
    civ: &mut Civilization,
    cell: CellId,
    initial_cell_population: i64,
) -> Result<()> {
    let Some(target) = map.cell(cell) else {
        return Err(SimError::CellOutOfRange(cell));
    };
    if let Some(owner) = target.owner() {
        return Err(SimError::InvalidArgument(format!(
            "cannot place {:?} on {:?}, already owned by {:?}",
            civ.id, cell, owner
        )));
    }

    map.set_owner(cell, Some(civ.id));
    civ.territory.insert(cell);
    for &n in map.neighbors_of(cell) {
        if map.owner_of(n) != Some(civ.id) {
            civ.neighbors.insert(n);
        }
    }
    civ.neighbors.remove(&cell);

    if let Some(target) = map.cell_mut(cell) {
        civ.total_housing += target.max_housing;
        target.population = if target.is_water { 0 } else { initial_cell_population };
    }

    let population: i64 = civ
        .territory
        .iter()
        .filter_map(|id| map.cell(*id))
        .map(|c| c.population)
        .sum();
    civ.set_population(population);

    Ok(())
}

/// Unown every cell of a collapsed civilization
///
/// Returns the released cell ids.
pub fn release_territory(map: &mut WorldMap, civ: &mut Civilization) -> Vec<CellId> {
    let released = civ.clear_territory();
    for &cell in &released {
        if map.owner_of(cell) == Some(civ.id) {
            map.set_owner(cell, None);
        }
    }
    released
}

/// Border set recomputed from scratch
///
/// The union of neighbor cells over the territory, minus the territory itself.
pub fn expected_neighbors(map: &WorldMap, civ: &Civilization) -> BTreeSet<CellId> {
    civ.territory()
        .iter()
        .flat_map(|&id| map.neighbors_of(id).iter().copied())
        .filter(|&n| map.owner_of(n) != Some(civ.id))
        .collect()
}
