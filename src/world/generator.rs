//! World and civilization generation
//!
//! Everything random during generation is drawn from one ChaCha8 stream
//! seeded by the generator seed, so the same seed and config always produce
//! the same map and the same starting civilizations.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{CivId, Color};
use crate::simulation::civilization::Civilization;
use crate::simulation::territory::place_civilization;
use crate::world::cell::Biome;
use crate::world::map::WorldMap;
use crate::world::noise::NoiseField;

/// Names drawn (with replacement) for new civilizations
pub const CIV_NAMES: &[&str] = &[
    "Andorra", "Afghanistan", "Albania", "Armenia", "Angola", "Argentina", "Austria",
    "Australia", "Azerbaijan", "Barbados", "Bangladesh", "Belgium", "Bulgaria", "Bahrain",
    "Burundi", "Benin", "Bolivia", "Brazil", "Bhutan", "Botswana", "Belarus", "Belize",
    "Canada", "Congo", "Switzerland", "Chile", "Cameroon", "China", "Colombia", "Costa Rica",
    "Cuba", "Cape Verde", "Cyprus", "Germany", "Djibouti", "Denmark", "Dominica", "Algeria",
    "Ecuador", "Estonia", "Egypt", "Eritrea", "Spain", "Ethiopia", "Finland", "Fiji",
    "Micronesia", "France", "Gabon", "Grenada", "Georgia", "Ghana", "Gambia", "Guinea",
    "Greece", "Guatemala", "Guyana", "Honduras", "Croatia", "Haiti", "Hungary", "Indonesia",
    "Ireland", "Israel", "India", "Iraq", "Iran", "Iceland", "Italy", "Jamaica", "Jordan",
    "Japan", "Kenya", "Kyrgyzstan", "Cambodia", "Kiribati", "Comoros", "Kuwait", "Kazakhstan",
    "Lebanon", "Liechtenstein", "Sri Lanka", "Liberia", "Lesotho", "Lithuania", "Luxembourg",
    "Latvia", "Morocco", "Monaco", "Moldova", "Montenegro", "Madagascar", "Mali", "Myanmar",
    "Mongolia", "Mauritania", "Malta", "Mauritius", "Maldives", "Malawi", "Mexico", "Malaysia",
    "Mozambique", "Namibia", "Niger", "Nigeria", "Nicaragua", "Netherlands", "Norway", "Nepal",
    "Nauru", "New Zealand", "Oman", "Panama", "Peru", "Philippines", "Pakistan", "Poland",
    "Portugal", "Palau", "Paraguay", "Qatar", "Romania", "Serbia", "Rwanda", "Saudi Arabia",
    "Seychelles", "Sudan", "Sweden", "Singapore", "Slovenia", "Slovakia", "Sierra Leone",
    "San Marino", "Senegal", "Somalia", "Suriname", "El Salvador", "Chad", "Togo", "Thailand",
    "Tajikistan", "Timor-Leste", "Turkmenistan", "Tunisia", "Tonga", "Turkey", "Tuvalu",
    "Tanzania", "Ukraine", "Uganda", "Uruguay", "Uzbekistan", "Venezuela", "Viet Nam",
    "Vanuatu", "Samoa", "Yemen", "South Africa", "Zambia", "Zimbabwe",
];

/// Seeded builder for maps and starting civilizations
pub struct WorldGenerator {
    rng: ChaCha8Rng,
    noise: NoiseField,
    config: SimulationConfig,
}

impl WorldGenerator {
    pub fn new(seed: u64, config: SimulationConfig) -> Self {
        let noise = NoiseField::new(config.noise.permutation_seed);
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            noise,
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Build the grid: elevation, climate, biome, neighbors and modifiers
    pub fn generate_world(&mut self, width: u32, height: u32) -> Result<WorldMap> {
        let world_cfg = &self.config.world;
        let noise_cfg = &self.config.noise;
        let mut map = WorldMap::new(width, height, world_cfg.topology)?;

        let offset: f64 = self.rng.gen_range(0.0..1000.0);
        debug!("Noise offset {:.4}", offset);

        for cell in map.cells_mut() {
            let elevation = self.noise.sample(
                (cell.x as f64 + 0.5) * noise_cfg.scale,
                (cell.y as f64 + 0.5) * noise_cfg.scale,
                offset,
                noise_cfg.octaves,
                noise_cfg.persistence,
            )?;

            // 0 at the equator row, 1 at either pole row
            let latitude = (((cell.y as f64 + 0.5) / height as f64) - 0.5).abs() * 2.0;
            let sea_temperature = world_cfg.equator_temperature
                + (world_cfg.pole_temperature - world_cfg.equator_temperature) * latitude;
            let altitude = (elevation - world_cfg.sea_level).max(0.0);

            cell.elevation = elevation;
            cell.is_water = elevation < world_cfg.sea_level;
            cell.temperature = sea_temperature - world_cfg.lapse_rate * altitude;
            cell.biome = Biome::classify(
                cell.is_water,
                elevation,
                cell.temperature,
                world_cfg.mountain_level,
            );
        }

        // Modifiers are drawn for every cell so land values never depend on the water mask
        for cell in map.cells_mut() {
            cell.food_mod = self.rng.gen::<f64>();
            cell.resource_mod = self.rng.gen::<f64>();
            cell.wealth_mod = self.rng.gen::<f64>();
            let housing = self.rng.gen_range(1..100);
            cell.max_housing = if cell.is_water { 0 } else { housing };
        }

        let water = map.cells().iter().filter(|c| c.is_water).count();
        info!(
            "Generated {}x{} world: {} land cells, {} water cells",
            width,
            height,
            map.len() - water,
            water
        );

        Ok(map)
    }

    /// Create `count` civilizations and place each on a free starting cell
    pub fn generate_civs(&mut self, map: &mut WorldMap, count: usize) -> Result<Vec<Civilization>> {
        if map.is_empty() {
            return Err(SimError::WorldNotGenerated);
        }

        let placement = &self.config.placement;
        let max_attempts = placement.attempt_factor.saturating_mul(map.len());
        let mut civs = Vec::with_capacity(count);

        for i in 0..count {
            let name = CIV_NAMES[self.rng.gen_range(0..CIV_NAMES.len())];
            let color = Color::new(self.rng.gen(), self.rng.gen(), self.rng.gen());
            let mut civ = Civilization::with_behavior(CivId(i as u32), name, color, &self.config.behavior);

            let mut placed = false;
            for _ in 0..max_attempts {
                let x = self.rng.gen_range(0..map.width());
                let y = self.rng.gen_range(0..map.height());
                let Some(candidate) = map.cell_at(x, y) else {
                    continue;
                };

                let in_band = (placement.band_min..=placement.band_max).contains(&candidate.elevation);
                if candidate.is_owned() || candidate.is_water || !in_band {
                    continue;
                }

                let cell = candidate.id;
                place_civilization(map, &mut civ, cell, placement.initial_cell_population)?;
                debug!("Placed {} ({:?}) at ({}, {})", civ.name, civ.id, x, y);
                placed = true;
                break;
            }

            if !placed {
                return Err(SimError::PlacementExhausted {
                    placed: i,
                    requested: count,
                });
            }

            civs.push(civ);
        }

        info!("Placed {} civilizations", civs.len());
        Ok(civs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::map::Topology;

    fn wide_band_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.sea_level = 0.0;
        config.placement.band_min = 0.0;
        config.placement.band_max = 1.0;
        config
    }

    #[test]
    fn test_generate_world_dimensions() {
        let mut generator = WorldGenerator::new(42, SimulationConfig::default());
        let map = generator.generate_world(12, 9).unwrap();
        assert_eq!(map.len(), 108);
        assert_eq!(map.width(), 12);
        assert_eq!(map.topology(), Topology::Hex);
    }

    #[test]
    fn test_generate_world_rejects_zero_size() {
        let mut generator = WorldGenerator::new(1, SimulationConfig::default());
        assert!(matches!(
            generator.generate_world(0, 4),
            Err(SimError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_cell_fields_in_range() {
        let mut generator = WorldGenerator::new(7, SimulationConfig::default());
        let map = generator.generate_world(16, 16).unwrap();
        for cell in map.cells() {
            assert!((0.0..=1.0).contains(&cell.elevation));
            assert!((0.0..1.0).contains(&cell.food_mod));
            assert!((0.0..1.0).contains(&cell.resource_mod));
            assert!((0.0..1.0).contains(&cell.wealth_mod));
            if cell.is_water {
                assert_eq!(cell.max_housing, 0);
                assert_eq!(cell.biome, Biome::Ocean);
            } else {
                assert!((1..100).contains(&cell.max_housing));
            }
            assert_eq!(cell.owner(), None);
        }
    }

    #[test]
    fn test_generate_civs_requires_map() {
        let mut generator = WorldGenerator::new(1, SimulationConfig::default());
        let mut map = WorldMap::default();
        assert!(matches!(
            generator.generate_civs(&mut map, 2),
            Err(SimError::WorldNotGenerated)
        ));
    }

    #[test]
    fn test_generate_civs_places_each_civ() {
        let mut generator = WorldGenerator::new(3, wide_band_config());
        let mut map = generator.generate_world(10, 10).unwrap();
        let civs = generator.generate_civs(&mut map, 4).unwrap();

        assert_eq!(civs.len(), 4);
        for (i, civ) in civs.iter().enumerate() {
            assert_eq!(civ.id, CivId(i as u32));
            assert_eq!(civ.territory_size(), 1);
            assert!(CIV_NAMES.contains(&civ.name.as_str()));
            let cell = *civ.territory().iter().next().unwrap();
            assert_eq!(map.owner_of(cell), Some(civ.id));
            assert_eq!(civ.population(), 100);
            assert!(civ.opinions().is_empty());
        }
    }

    #[test]
    fn test_placement_exhausted_when_map_full() {
        let mut generator = WorldGenerator::new(3, wide_band_config());
        let mut map = generator.generate_world(2, 2).unwrap();
        let result = generator.generate_civs(&mut map, 5);
        assert!(matches!(
            result,
            Err(SimError::PlacementExhausted { placed: 4, requested: 5 })
        ));
    }
}
