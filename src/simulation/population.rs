//! Population and economy system

use tracing::debug;

use crate::core::config::GrowthConfig;
use crate::core::types::CivId;
use crate::simulation::civilization::Civilization;
use crate::world::map::WorldMap;

/// Grow cell populations toward capacity and roll them up per civilization
///
/// Returns the civilizations that died during this update.
pub fn update_populations(map: &mut WorldMap, civs: &mut [Civilization], growth: &GrowthConfig) -> Vec<CivId> {
    let mut died = Vec::new();

    for civ in civs.iter_mut().filter(|c| c.is_alive()) {
        let mut population = 0i64;
        let mut wealth = 0.0;
        let mut resource = 0.0;

        for &id in civ.territory() {
            let Some(cell) = map.cell_mut(id) else {
                continue;
            };

            if cell.is_water {
                cell.population = 0;
                cell.food = 0.0;
                continue;
            }

            // Logistic step toward capacity; overcrowded cells shrink
            let gap = (cell.capacity() - cell.population) as f64;
            cell.population += (gap * growth.growth_rate).round() as i64;
            cell.food = cell.food_mod * cell.population as f64;

            population += cell.population;
            wealth += cell.wealth_mod * cell.population as f64 / 100.0;
            resource += cell.resource_mod * cell.population as f64 / 100.0;
        }

        civ.total_wealth += wealth;
        civ.total_resource += resource;

        if civ.set_population(population) {
            debug!("{} ({:?}) population reached zero", civ.name, civ.id);
            died.push(civ.id);
        }
    }

    died
}
