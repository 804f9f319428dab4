//! Cell - one tile of the world grid and the atomic unit of territory

use serde::{Deserialize, Serialize};

use crate::core::types::{CellId, CivId};

/// A single grid tile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub x: u32,
    pub y: u32,

    // Geography
    pub elevation: f64,
    pub is_water: bool,
    pub temperature: f64,
    pub biome: Biome,

    // Economy modifiers, each in [0, 1)
    pub food_mod: f64,
    pub resource_mod: f64,
    pub wealth_mod: f64,

    // Population capacity
    pub max_housing: i64,
    pub population: i64,
    /// Food produced during the last tick
    pub food: f64,

    // Ownership is mirrored in the owner's territory set
    pub(crate) owner: Option<CivId>,
    pub(crate) neighbors: Vec<CellId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Ocean,
    Tundra,
    Taiga,
    Forest,
    Grassland,
    Desert,
    Mountain,
}

impl Cell {
    /// Blank land cell at the given coordinates
    pub fn new(id: CellId, x: u32, y: u32) -> Self {
        Self {
            id,
            x,
            y,
            elevation: 0.0,
            is_water: false,
            temperature: 0.0,
            biome: Biome::Grassland,
            food_mod: 0.0,
            resource_mod: 0.0,
            wealth_mod: 0.0,
            max_housing: 0,
            population: 0,
            food: 0.0,
            owner: None,
            neighbors: Vec::new(),
        }
    }

    pub fn owner(&self) -> Option<CivId> {
        self.owner
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// Adjacent cell ids, fixed at generation time
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }

    /// Carrying capacity once food is accounted for
    pub fn capacity(&self) -> i64 {
        (self.max_housing as f64 * (1.0 + self.food_mod)).round() as i64
    }

    /// Base worth of the cell before ownership adjustments
    pub fn base_value(&self) -> f64 {
        self.max_housing as f64 / 1000.0 + self.food_mod + self.resource_mod + self.wealth_mod
    }
}

impl Biome {
    /// Classify a cell from its geography
    ///
    /// `temperature` is already adjusted for altitude.
    pub fn classify(is_water: bool, elevation: f64, temperature: f64, mountain_level: f64) -> Self {
        if is_water {
            return Biome::Ocean;
        }
        if elevation >= mountain_level {
            return Biome::Mountain;
        }
        if temperature < -5.0 {
            Biome::Tundra
        } else if temperature < 5.0 {
            Biome::Taiga
        } else if temperature < 16.0 {
            Biome::Forest
        } else if temperature < 25.0 {
            Biome::Grassland
        } else {
            Biome::Desert
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_unowned() {
        let cell = Cell::new(CellId(4), 1, 2);
        assert_eq!(cell.owner(), None);
        assert!(cell.neighbors().is_empty());
        assert_eq!((cell.x, cell.y), (1, 2));
    }

    #[test]
    fn test_base_value() {
        let mut cell = Cell::new(CellId(0), 0, 0);
        cell.max_housing = 50;
        cell.food_mod = 0.25;
        cell.resource_mod = 0.5;
        cell.wealth_mod = 0.125;
        assert!((cell.base_value() - 0.925).abs() < 1e-12);
    }

    #[test]
    fn test_capacity_includes_food() {
        let mut cell = Cell::new(CellId(0), 0, 0);
        cell.max_housing = 40;
        cell.food_mod = 0.5;
        assert_eq!(cell.capacity(), 60);
    }

    #[test]
    fn test_biome_classification() {
        assert_eq!(Biome::classify(true, 0.9, 20.0, 0.62), Biome::Ocean);
        assert_eq!(Biome::classify(false, 0.7, 20.0, 0.62), Biome::Mountain);
        assert_eq!(Biome::classify(false, 0.5, -10.0, 0.62), Biome::Tundra);
        assert_eq!(Biome::classify(false, 0.5, 0.0, 0.62), Biome::Taiga);
        assert_eq!(Biome::classify(false, 0.5, 10.0, 0.62), Biome::Forest);
        assert_eq!(Biome::classify(false, 0.5, 20.0, 0.62), Biome::Grassland);
        assert_eq!(Biome::classify(false, 0.5, 30.0, 0.62), Biome::Desert);
    }
}
