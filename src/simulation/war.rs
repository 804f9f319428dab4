//! War - a bounded conflict between two civilizations

use serde::{Deserialize, Serialize};

use crate::core::types::{CivId, Tick, WarId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct War {
    pub id: WarId,
    pub aggressor: CivId,
    pub defender: CivId,
    pub started_at: Tick,
    /// Ticks until the war expires
    pub duration: u64,
}

impl War {
    pub fn new(id: WarId, aggressor: CivId, defender: CivId, started_at: Tick, duration: u64) -> Self {
        Self {
            id,
            aggressor,
            defender,
            started_at,
            duration,
        }
    }

    pub fn participants(&self) -> [CivId; 2] {
        [self.aggressor, self.defender]
    }

    pub fn involves(&self, civ: CivId) -> bool {
        self.aggressor == civ || self.defender == civ
    }

    /// True once `tick` has reached the end of the war's duration
    pub fn has_expired(&self, tick: Tick) -> bool {
        tick >= self.started_at.saturating_add(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_war_expiry() {
        let war = War::new(WarId(1), CivId(0), CivId(1), 5, 12);
        assert!(!war.has_expired(5));
        assert!(!war.has_expired(16));
        assert!(war.has_expired(17));
    }

    #[test]
    fn test_participants() {
        let war = War::new(WarId(1), CivId(2), CivId(7), 0, 3);
        assert_eq!(war.participants(), [CivId(2), CivId(7)]);
        assert!(war.involves(CivId(7)));
        assert!(!war.involves(CivId(3)));
    }
}
