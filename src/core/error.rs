use thiserror::Error;

use crate::core::types::{CellId, CivId, WarId};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid map dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("World map not generated")]
    WorldNotGenerated,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Placement exhausted: placed {placed} of {requested} civilizations")]
    PlacementExhausted { placed: usize, requested: usize },

    #[error("Cell out of range: {0:?}")]
    CellOutOfRange(CellId),

    #[error("Unknown civilization: {0:?}")]
    UnknownCivilization(CivId),

    #[error("Unknown war: {0:?}")]
    UnknownWar(WarId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
