//! Actions produced by the decision engine

use serde::{Deserialize, Serialize};

use crate::core::types::{CellId, CivId};

/// What a civilization chose to do this tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CivDecision {
    DoNothing,
    Expand(CellId),
    Exterminate(CivId),
}

/// A decision bound to the civilization that made it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationAction {
    pub actor: CivId,
    pub decision: CivDecision,
}

impl SimulationAction {
    pub fn new(actor: CivId, decision: CivDecision) -> Self {
        Self { actor, decision }
    }

    pub fn expand(actor: CivId, cell: CellId) -> Self {
        Self::new(actor, CivDecision::Expand(cell))
    }

    pub fn exterminate(actor: CivId, target: CivId) -> Self {
        Self::new(actor, CivDecision::Exterminate(target))
    }
}
