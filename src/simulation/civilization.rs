//! Civilization - an agent competing for territory

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::config::BehaviorConfig;
use crate::core::types::{CellId, CivId, Color, WarId};

/// Upper bound of the war cooldown counter
pub const MAX_WAR_COOLDOWN: i32 = 100;

/// An autonomous territorial agent
///
/// `territory` mirrors cell ownership on the map and `neighbors` is always the
/// set of unowned-by-self cells adjacent to the territory. Both are maintained
/// by the territory mutation functions, never edited directly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Civilization {
    pub id: CivId,
    pub name: String,
    pub color: Color,

    // Behavior weights
    pub base_expand: f64,
    pub base_exterminate: f64,

    // Economy
    pub total_housing: i64,
    pub total_wealth: f64,
    pub total_resource: f64,

    population: i64,
    alive: bool,
    war_cooldown: i32,

    pub(crate) territory: BTreeSet<CellId>,
    pub(crate) neighbors: BTreeSet<CellId>,
    opinions: BTreeMap<CivId, i32>,
    wars: Vec<WarId>,
}

impl Civilization {
    pub fn new(id: CivId, name: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            base_expand: 1.0,
            base_exterminate: 1.0,
            total_housing: 0,
            total_wealth: 0.0,
            total_resource: 0.0,
            population: 0,
            alive: true,
            war_cooldown: 0,
            territory: BTreeSet::new(),
            neighbors: BTreeSet::new(),
            opinions: BTreeMap::new(),
            wars: Vec::new(),
        }
    }

    /// New civilization with behavior weights taken from config
    pub fn with_behavior(id: CivId, name: impl Into<String>, color: Color, behavior: &BehaviorConfig) -> Self {
        let mut civ = Self::new(id, name, color);
        civ.base_expand = behavior.default_base_expand;
        civ.base_exterminate = behavior.default_base_exterminate;
        civ
    }

    pub fn population(&self) -> i64 {
        self.population
    }

    /// Set population; a value <= 0 kills the civilization
    ///
    /// Returns true only on the call that transitions it from alive to dead.
    pub fn set_population(&mut self, population: i64) -> bool {
        self.population = population;
        if population <= 0 && self.alive {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn territory(&self) -> &BTreeSet<CellId> {
        &self.territory
    }

    pub fn territory_size(&self) -> usize {
        self.territory.len()
    }

    pub fn owns(&self, cell: CellId) -> bool {
        self.territory.contains(&cell)
    }

    /// Border cells adjacent to the territory but not owned by it
    pub fn neighbors(&self) -> &BTreeSet<CellId> {
        &self.neighbors
    }

    // === OPINIONS ===

    pub fn opinions(&self) -> &BTreeMap<CivId, i32> {
        &self.opinions
    }

    pub fn opinion_of(&self, other: CivId) -> Option<i32> {
        self.opinions.get(&other).copied()
    }

    /// Record a border contact with `other`
    ///
    /// The first contact sets `first_contact`; later contacts subtract `penalty`.
    pub fn record_contact(&mut self, other: CivId, first_contact: i32, penalty: i32) {
        self.opinions
            .entry(other)
            .and_modify(|o| *o = o.saturating_sub(penalty))
            .or_insert(first_contact);
    }

    /// Drop opinions about civilizations for which `is_alive` is false
    ///
    /// Returns the number of entries removed.
    pub fn prune_opinions(&mut self, is_alive: impl Fn(CivId) -> bool) -> usize {
        let before = self.opinions.len();
        self.opinions.retain(|id, _| is_alive(*id));
        before - self.opinions.len()
    }

    // === WARS ===

    pub fn wars(&self) -> &[WarId] {
        &self.wars
    }

    pub fn at_war(&self) -> bool {
        !self.wars.is_empty()
    }

    pub fn war_count(&self) -> usize {
        self.wars.len()
    }

    pub fn start_war(&mut self, war: WarId) {
        self.wars.push(war);
    }

    /// Leave a war and raise the cooldown
    ///
    /// Returns false when the civilization was not part of `war`.
    pub fn end_war(&mut self, war: WarId, cooldown_value: i32) -> bool {
        let Some(pos) = self.wars.iter().position(|w| *w == war) else {
            return false;
        };
        self.wars.remove(pos);
        self.war_cooldown = clamp_cooldown(self.war_cooldown.saturating_add(cooldown_value));
        true
    }

    pub fn war_cooldown(&self) -> i32 {
        self.war_cooldown
    }

    pub fn decay_war_cooldown(&mut self, decay: i32) {
        self.war_cooldown = clamp_cooldown(self.war_cooldown.saturating_sub(decay));
    }

    /// Release all territory bookkeeping after collapse
    pub(crate) fn clear_territory(&mut self) -> Vec<CellId> {
        self.neighbors.clear();
        self.total_housing = 0;
        std::mem::take(&mut self.territory).into_iter().collect()
    }
}

fn clamp_cooldown(value: i32) -> i32 {
    value.clamp(0, MAX_WAR_COOLDOWN)
}
