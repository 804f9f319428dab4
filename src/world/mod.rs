//! Procedural world: noise, cells, the grid and its generator

pub mod cell;
pub mod generator;
pub mod map;
pub mod noise;

pub use cell::{Biome, Cell};
pub use generator::WorldGenerator;
pub use map::{Topology, WorldMap};
pub use noise::NoiseField;
