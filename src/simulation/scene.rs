//! Scene - the world map, the civilization roster and the tick driver

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{CivId, Tick, WarId};
use crate::simulation::action::{CivDecision, SimulationAction};
use crate::simulation::civilization::Civilization;
use crate::simulation::events::{EventType, HistoryLog};
use crate::simulation::population::update_populations;
use crate::simulation::territory::{claim_cell, release_territory};
use crate::simulation::war::War;
use crate::world::generator::WorldGenerator;
use crate::world::map::WorldMap;

/// Complete simulation state
///
/// The roster is append-only: a `CivId` is the index of its civilization and
/// dead civilizations stay in place with `is_alive() == false`.
pub struct Scene {
    pub(crate) map: WorldMap,
    pub(crate) civs: Vec<Civilization>,
    pub(crate) wars: Vec<War>,
    pub(crate) history: HistoryLog,
    pub(crate) config: SimulationConfig,
    tick: Tick,
    next_war_id: u32,
}

/// What happened during one call to [`Scene::step`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSummary {
    pub tick: Tick,
    pub actions_applied: usize,
    pub actions_skipped: usize,
    pub expansions: usize,
    pub wars_declared: usize,
    pub wars_ended: usize,
    pub collapsed: Vec<CivId>,
}

/// Read-only view of one civilization for display and export
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CivSummary {
    pub id: CivId,
    pub name: String,
    pub color: String,
    pub alive: bool,
    pub population: i64,
    pub territory: usize,
    pub total_housing: i64,
    pub total_wealth: f64,
    pub total_resource: f64,
    pub at_war: bool,
    pub war_cooldown: i32,
}

impl Scene {
    /// Wrap an existing map and roster
    ///
    /// Every civilization's id must equal its roster index.
    pub fn new(map: WorldMap, civs: Vec<Civilization>, config: SimulationConfig) -> Result<Self> {
        if map.is_empty() {
            return Err(SimError::WorldNotGenerated);
        }
        if let Some((index, civ)) = civs.iter().enumerate().find(|(i, c)| c.id.index() != *i) {
            return Err(SimError::InvalidArgument(format!(
                "civilization {:?} stored at roster index {}",
                civ.id, index
            )));
        }

        Ok(Self {
            map,
            civs,
            wars: Vec::new(),
            history: HistoryLog::new(),
            config,
            tick: 0,
            next_war_id: 0,
        })
    }

    /// Generate a world and its civilizations from config alone
    pub fn generate(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut generator = WorldGenerator::new(config.world.seed, config.clone());
        let mut map = generator.generate_world(config.world.width, config.world.height)?;
        let civs = generator.generate_civs(&mut map, config.placement.civ_count)?;
        Self::new(map, civs, config)
    }

    // === ACCESSORS ===

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn civilizations(&self) -> &[Civilization] {
        &self.civs
    }

    pub fn civilization(&self, id: CivId) -> Option<&Civilization> {
        self.civs.get(id.index())
    }

    pub fn wars(&self) -> &[War] {
        &self.wars
    }

    pub fn war(&self, id: WarId) -> Option<&War> {
        self.wars.iter().find(|w| w.id == id)
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn living_count(&self) -> usize {
        self.civs.iter().filter(|c| c.is_alive()).count()
    }

    pub(crate) fn is_alive(&self, id: CivId) -> bool {
        self.civs.get(id.index()).is_some_and(|c| c.is_alive())
    }

    pub fn civ_summaries(&self) -> Vec<CivSummary> {
        self.civs
            .iter()
            .map(|c| CivSummary {
                id: c.id,
                name: c.name.clone(),
                color: c.color.to_hex(),
                alive: c.is_alive(),
                population: c.population(),
                territory: c.territory_size(),
                total_housing: c.total_housing,
                total_wealth: c.total_wealth,
                total_resource: c.total_resource,
                at_war: c.at_war(),
                war_cooldown: c.war_cooldown(),
            })
            .collect()
    }

    // === ACTIONS ===

    /// Apply a decision produced by [`Scene::determine_action`]
    pub fn apply_action(&mut self, action: &SimulationAction) -> Result<()> {
        let actor = action.actor;
        if !self.is_alive(actor) {
            return Err(match self.civs.get(actor.index()) {
                None => SimError::UnknownCivilization(actor),
                Some(_) => SimError::InvalidArgument(format!("{:?} is not alive", actor)),
            });
        }

        match action.decision {
            CivDecision::DoNothing => Ok(()),
            CivDecision::Expand(cell) => {
                let prior = self.map.owner_of(cell);
                claim_cell(&mut self.map, &mut self.civs, actor, cell, &self.config)?;

                let mut participants = vec![actor];
                participants.extend(prior);
                self.history.add_event(
                    EventType::Expansion {
                        civ: actor,
                        cell,
                        taken_from: prior,
                    },
                    self.tick,
                    participants,
                );
                if let Some(loser) = prior {
                    self.history
                        .add_event(EventType::CellLost { civ: loser, cell }, self.tick, vec![loser]);
                }
                debug!("{:?} expanded into {:?}", actor, cell);
                Ok(())
            }
            CivDecision::Exterminate(target) => self.declare_war(actor, target).map(|_| ()),
        }
    }

    /// Start a war between two living civilizations
    pub fn declare_war(&mut self, aggressor: CivId, defender: CivId) -> Result<WarId> {
        for id in [aggressor, defender] {
            match self.civs.get(id.index()) {
                None => return Err(SimError::UnknownCivilization(id)),
                Some(c) if !c.is_alive() => {
                    return Err(SimError::InvalidArgument(format!("{:?} is not alive", id)));
                }
                Some(_) => {}
            }
        }
        if aggressor == defender {
            return Err(SimError::InvalidArgument(format!(
                "{:?} cannot declare war on itself",
                aggressor
            )));
        }

        let id = WarId(self.next_war_id);
        self.next_war_id += 1;

        let duration = self.config.behavior.war_duration_ticks;
        self.wars.push(War::new(id, aggressor, defender, self.tick, duration));
        self.civs[aggressor.index()].start_war(id);
        self.civs[defender.index()].start_war(id);

        self.history.add_event(
            EventType::WarDeclared {
                war: id,
                aggressor,
                defender,
            },
            self.tick,
            vec![aggressor, defender],
        );
        info!(
            "{} declared war on {}",
            self.civs[aggressor.index()].name,
            self.civs[defender.index()].name
        );

        Ok(id)
    }

    /// End an active war; false if no such war is active
    pub fn end_war(&mut self, war: WarId) -> bool {
        let Some(pos) = self.wars.iter().position(|w| w.id == war) else {
            return false;
        };
        let ended = self.wars.remove(pos);

        let cooldown = self.config.behavior.war_cooldown_value;
        for civ in ended.participants() {
            if let Some(c) = self.civs.get_mut(civ.index()) {
                c.end_war(war, cooldown);
            }
        }

        self.history.add_event(
            EventType::WarEnded { war },
            self.tick,
            ended.participants().to_vec(),
        );
        debug!("War {:?} ended", war);
        true
    }

    // === DRIVER ===

    /// Run one tick
    ///
    /// Order: expire wars, let every living civilization decide and act,
    /// grow populations, retire the dead, advance the clock.
    pub fn step(&mut self) -> TickSummary {
        let mut summary = TickSummary {
            tick: self.tick,
            ..Default::default()
        };

        let expired: Vec<WarId> = self
            .wars
            .iter()
            .filter(|w| w.has_expired(self.tick) || w.participants().iter().any(|&c| !self.is_alive(c)))
            .map(|w| w.id)
            .collect();
        for war in expired {
            if self.end_war(war) {
                summary.wars_ended += 1;
            }
        }

        for index in 0..self.civs.len() {
            let id = CivId(index as u32);
            if !self.is_alive(id) {
                continue;
            }

            let Some(action) = self.determine_action(id) else {
                continue;
            };

            match self.apply_action(&action) {
                Ok(()) => {
                    summary.actions_applied += 1;
                    match action.decision {
                        CivDecision::Expand(_) => summary.expansions += 1,
                        CivDecision::Exterminate(_) => summary.wars_declared += 1,
                        CivDecision::DoNothing => {}
                    }
                }
                Err(e) => {
                    warn!("Skipping action {:?}: {}", action, e);
                    summary.actions_skipped += 1;
                }
            }
        }

        let died = update_populations(&mut self.map, &mut self.civs, &self.config.growth);
        for civ in died {
            summary.wars_ended += self.retire(civ);
            summary.collapsed.push(civ);
        }

        self.tick += 1;
        summary
    }

    /// Run `ticks` steps and return their summaries
    pub fn run(&mut self, ticks: u64) -> Vec<TickSummary> {
        let mut summaries = Vec::new();
        for _ in 0..ticks {
            let summary = self.step();
            if self.living_count() == 0 {
                summaries.push(summary);
                info!("All civilizations collapsed at tick {}", self.tick);
                break;
            }
            summaries.push(summary);
        }
        summaries
    }

    /// Release a dead civilization's cells and end its wars
    ///
    /// Returns the number of wars ended.
    fn retire(&mut self, id: CivId) -> usize {
        let Some(civ) = self.civs.get_mut(id.index()) else {
            return 0;
        };
        let released = release_territory(&mut self.map, civ);
        let wars: Vec<WarId> = civ.wars().to_vec();

        let name = civ.name.clone();
        self.history.add_event(
            EventType::CivilizationCollapsed {
                civ: id,
                cells_released: released.len(),
            },
            self.tick,
            vec![id],
        );
        info!("{} ({:?}) collapsed, releasing {} cells", name, id, released.len());

        wars.into_iter().filter(|&w| self.end_war(w)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CellId, Color};
    use crate::simulation::territory::place_civilization;
    use crate::world::map::Topology;

    fn scene_with(count: u32) -> Scene {
        let mut map = WorldMap::new(6, 1, Topology::Square).unwrap();
        for cell in map.cells_mut() {
            cell.max_housing = 50;
        }
        let mut civs = Vec::new();
        for i in 0..count {
            let mut civ = Civilization::new(CivId(i), format!("Civ {i}"), Color::default());
            place_civilization(&mut map, &mut civ, CellId(i * 5), 100).unwrap();
            civs.push(civ);
        }
        Scene::new(map, civs, SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_misnumbered_roster() {
        let map = WorldMap::new(2, 2, Topology::Hex).unwrap();
        let civs = vec![Civilization::new(CivId(3), "Avalon", Color::default())];
        assert!(Scene::new(map, civs, SimulationConfig::default()).is_err());
        assert!(matches!(
            Scene::new(WorldMap::default(), Vec::new(), SimulationConfig::default()),
            Err(SimError::WorldNotGenerated)
        ));
    }

    #[test]
    fn test_declare_and_end_war() {
        let mut scene = scene_with(2);
        let war = scene.declare_war(CivId(0), CivId(1)).unwrap();

        assert!(scene.civilization(CivId(0)).unwrap().at_war());
        assert!(scene.civilization(CivId(1)).unwrap().at_war());
        assert_eq!(scene.wars().len(), 1);

        assert!(scene.end_war(war));
        assert!(!scene.end_war(war));
        for civ in scene.civilizations() {
            assert!(!civ.at_war());
            assert_eq!(civ.war_cooldown(), 20);
        }
    }

    #[test]
    fn test_declare_war_validation() {
        let mut scene = scene_with(2);
        assert!(matches!(
            scene.declare_war(CivId(0), CivId(9)),
            Err(SimError::UnknownCivilization(CivId(9)))
        ));
        assert!(scene.declare_war(CivId(1), CivId(1)).is_err());
        assert!(scene.wars().is_empty());
    }

    #[test]
    fn test_apply_expand_logs_history() {
        let mut scene = scene_with(1);
        scene
            .apply_action(&SimulationAction::expand(CivId(0), CellId(1)))
            .unwrap();
        assert_eq!(scene.map().owner_of(CellId(1)), Some(CivId(0)));
        assert!(matches!(
            scene.history().events[0].event_type,
            EventType::Expansion { cell: CellId(1), taken_from: None, .. }
        ));
    }

    #[test]
    fn test_apply_rejects_bad_cell() {
        let mut scene = scene_with(1);
        let result = scene.apply_action(&SimulationAction::expand(CivId(0), CellId(99)));
        assert!(matches!(result, Err(SimError::CellOutOfRange(CellId(99)))));
        assert!(scene.history().is_empty());
    }

    #[test]
    fn test_war_expires_after_duration() {
        let mut scene = scene_with(2);
        scene.config.behavior.war_duration_ticks = 2;
        scene.declare_war(CivId(0), CivId(1)).unwrap();

        scene.step();
        scene.step();
        assert_eq!(scene.wars().len(), 1, "still running at tick 1");

        let summary = scene.step();
        assert_eq!(summary.wars_ended, 1);
        assert!(scene.wars().is_empty());
    }

    #[test]
    fn test_step_advances_tick() {
        let mut scene = scene_with(1);
        let summaries = scene.run(3);
        assert_eq!(summaries.len(), 3);
        assert_eq!(scene.tick(), 3);
        assert_eq!(summaries[2].tick, 2);
    }

    #[test]
    fn test_run_stops_when_everyone_collapses() {
        let mut scene = scene_with(1);
        scene.map.cell_mut(CellId(0)).unwrap().is_water = true;
        scene.civs[0].base_expand = -100.0;

        // The tick count is an upper bound, not a reservation
        let summaries = scene.run(u64::MAX);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].collapsed, vec![CivId(0)]);
        assert_eq!(scene.living_count(), 0);
    }

    #[test]
    fn test_civ_summaries() {
        let scene = scene_with(2);
        let summaries = scene.civ_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].territory, 1);
        assert_eq!(summaries[1].color, "#000000");
        assert!(summaries[0].alive);
    }
}
