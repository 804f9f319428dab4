//! Simulation configuration with documented constants
//!
//! All tunable numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every section falls back to its
//! defaults when omitted from the TOML file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::world::map::Topology;

/// Top-level configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub noise: NoiseConfig,
    pub placement: PlacementConfig,
    pub behavior: BehaviorConfig,
    pub growth: GrowthConfig,
    /// Number of ticks the CLI runner simulates when not overridden
    pub ticks: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            noise: NoiseConfig::default(),
            placement: PlacementConfig::default(),
            behavior: BehaviorConfig::default(),
            growth: GrowthConfig::default(),
            ticks: 120,
        }
    }
}

// === WORLD ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Map width in cells
    pub width: u32,

    /// Map height in cells
    pub height: u32,

    /// Master seed; every random draw during generation derives from it
    pub seed: u64,

    /// Adjacency pattern used to wire cell neighbors
    pub topology: Topology,

    /// Cells with elevation below this are water
    ///
    /// Noise samples cluster around 0.5, so 0.42 yields roughly a third
    /// of the map as water.
    pub sea_level: f64,

    /// Land above this elevation is classified as mountain
    pub mountain_level: f64,

    /// Temperature (°C) at the equator row, at sea level
    pub equator_temperature: f64,

    /// Temperature (°C) at the pole rows, at sea level
    pub pole_temperature: f64,

    /// Degrees lost per unit of elevation above sea level
    pub lapse_rate: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            seed: 42,
            topology: Topology::Hex,
            sea_level: 0.42,
            mountain_level: 0.62,
            equator_temperature: 30.0,
            pole_temperature: -15.0,
            lapse_rate: 60.0,
        }
    }
}

// === NOISE ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Number of octaves layered per sample
    pub octaves: u32,

    /// Amplitude multiplier between successive octaves
    ///
    /// Below 1.0 each octave contributes less than the previous one.
    pub persistence: f64,

    /// Grid coordinate to noise space conversion factor
    ///
    /// Smaller = larger continents.
    pub scale: f64,

    /// Seed of the fixed gradient permutation table
    pub permutation_seed: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 6,
            persistence: 0.5,
            scale: 0.05,
            permutation_seed: 5,
        }
    }
}

// === PLACEMENT ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Number of civilizations placed at generation time
    pub civ_count: usize,

    /// Lower bound of the elevation band accepted for a starting cell
    pub band_min: f64,

    /// Upper bound of the elevation band accepted for a starting cell
    ///
    /// The band [0.45, 0.52] keeps capitals on lowland just above the coast.
    pub band_max: f64,

    /// Random draws allowed per civilization, as a multiple of the cell count
    ///
    /// Placement fails with `PlacementExhausted` once exceeded.
    pub attempt_factor: usize,

    /// Population assigned to a freshly claimed land cell
    pub initial_cell_population: i64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            civ_count: 12,
            band_min: 0.45,
            band_max: 0.52,
            attempt_factor: 8,
            initial_cell_population: 100,
        }
    }
}

// === BEHAVIOR ===

/// Decision weights shared by every civilization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Starting `base_expand` of a new civilization
    pub default_base_expand: f64,

    /// Starting `base_exterminate` of a new civilization
    pub default_base_exterminate: f64,

    /// Opinion a rival must fall strictly below to become a war target
    pub hate_threshold: i32,

    /// Weight of |opinion| in the exterminate score
    pub hate_mod: f64,

    /// Upper clamp of the hostility bonus
    ///
    /// At hate_mod 0.1 the cap is reached at opinion -100.
    pub hostility_cap: f64,

    /// Weight of the war cooldown in the exterminate score
    pub war_cooldown_mod: f64,

    /// Cooldown added when a war ends
    pub war_cooldown_value: i32,

    /// Cooldown removed on every decision
    pub war_cooldown_decay: i32,

    /// Opinion recorded the first time a border with a rival appears
    pub first_contact_opinion: i32,

    /// Opinion lost on every further border contact
    pub contact_penalty: i32,

    /// Ticks a war lasts before the reference driver ends it
    pub war_duration_ticks: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            default_base_expand: 1.0,
            default_base_exterminate: 1.0,
            hate_threshold: -100,
            hate_mod: 0.1,
            hostility_cap: 10.0,
            war_cooldown_mod: 2.0,
            war_cooldown_value: 20,
            war_cooldown_decay: 1,
            first_contact_opinion: -20,
            contact_penalty: 20,
            war_duration_ticks: 12,
        }
    }
}

// === GROWTH ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Fraction of the gap to carrying capacity closed each tick
    pub growth_rate: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self { growth_rate: 0.05 }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.world.width == 0
            || self.world.height == 0
            || self.world.width.checked_mul(self.world.height).is_none()
        {
            return Err(SimError::InvalidDimensions {
                width: self.world.width,
                height: self.world.height,
            });
        }

        if self.noise.octaves == 0 {
            return Err(SimError::InvalidConfig("noise.octaves must be at least 1".into()));
        }

        if !(self.noise.persistence.is_finite() && self.noise.persistence > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "noise.persistence ({}) must be a positive number",
                self.noise.persistence
            )));
        }

        let band = &self.placement;
        if !(0.0..=1.0).contains(&band.band_min)
            || !(0.0..=1.0).contains(&band.band_max)
            || band.band_min > band.band_max
        {
            return Err(SimError::InvalidConfig(format!(
                "placement band [{}, {}] must be an ordered range inside [0, 1]",
                band.band_min, band.band_max
            )));
        }

        if band.attempt_factor == 0 {
            return Err(SimError::InvalidConfig(
                "placement.attempt_factor must be at least 1".into(),
            ));
        }

        let behavior = &self.behavior;
        if !(behavior.hostility_cap.is_finite() && behavior.hostility_cap >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "behavior.hostility_cap ({}) must be a non-negative number",
                behavior.hostility_cap
            )));
        }

        for (name, value) in [
            ("behavior.hate_mod", behavior.hate_mod),
            ("behavior.war_cooldown_mod", behavior.war_cooldown_mod),
            ("behavior.default_base_expand", behavior.default_base_expand),
            ("behavior.default_base_exterminate", behavior.default_base_exterminate),
        ] {
            if !value.is_finite() {
                return Err(SimError::InvalidConfig(format!("{name} ({value}) must be finite")));
            }
        }

        if !(0.0..=1.0).contains(&self.growth.growth_rate) {
            return Err(SimError::InvalidConfig(format!(
                "growth.growth_rate ({}) must lie in [0, 1]",
                self.growth.growth_rate
            )));
        }

        Ok(())
    }
}
