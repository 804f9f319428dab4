//! Property tests for territory and war bookkeeping
//!
//! Arbitrary sequences of claims and losses must keep cell ownership and the
//! civilization territory sets mirrored, and each border set equal to a full
//! recomputation. War cooldowns must stay inside their bounds under any mix
//! of decay and war endings.

use orbis::core::config::SimulationConfig;
use orbis::core::types::{CellId, CivId, Color, WarId};
use orbis::simulation::civilization::MAX_WAR_COOLDOWN;
use orbis::simulation::territory::{claim_cell, expected_neighbors, lose_cell};
use orbis::simulation::Civilization;
use orbis::world::{Topology, WorldMap};
use proptest::prelude::*;

const WIDTH: u32 = 6;
const HEIGHT: u32 = 5;
const CIVS: u32 = 3;

#[derive(Clone, Debug)]
enum TerritoryOp {
    Claim { civ: u32, cell: u32 },
    Lose { civ: u32, cell: u32 },
}

fn territory_op() -> impl Strategy<Value = TerritoryOp> {
    let cells = WIDTH * HEIGHT;
    prop_oneof![
        3 => (0..CIVS, 0..cells).prop_map(|(civ, cell)| TerritoryOp::Claim { civ, cell }),
        1 => (0..CIVS, 0..cells).prop_map(|(civ, cell)| TerritoryOp::Lose { civ, cell }),
    ]
}

#[derive(Clone, Debug)]
enum CooldownOp {
    Decay(i32),
    WarEnded(i32),
}

fn cooldown_op() -> impl Strategy<Value = CooldownOp> {
    prop_oneof![
        (0..60i32).prop_map(CooldownOp::Decay),
        (0..60i32).prop_map(CooldownOp::WarEnded),
    ]
}

fn check_invariants(map: &WorldMap, civs: &[Civilization]) -> Result<(), TestCaseError> {
    for cell in map.cells() {
        if let Some(owner) = cell.owner() {
            prop_assert!(civs[owner.index()].owns(cell.id));
        }
    }
    for civ in civs {
        for &cell in civ.territory() {
            prop_assert_eq!(map.owner_of(cell), Some(civ.id));
        }
        prop_assert!(civ.territory().is_disjoint(civ.neighbors()));
        prop_assert_eq!(civ.neighbors(), &expected_neighbors(map, civ));

        let housing: i64 = civ
            .territory()
            .iter()
            .map(|&id| map.cell(id).map_or(0, |c| c.max_housing))
            .sum();
        prop_assert_eq!(civ.total_housing, housing);
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_claim_lose_keeps_invariants(
        topology in prop_oneof![Just(Topology::Hex), Just(Topology::Square)],
        housing in proptest::collection::vec(1i64..100, (WIDTH * HEIGHT) as usize),
        ops in proptest::collection::vec(territory_op(), 1..80),
    ) {
        let config = SimulationConfig::default();
        let mut map = WorldMap::new(WIDTH, HEIGHT, topology).unwrap();
        for (cell, h) in map.cells_mut().iter_mut().zip(&housing) {
            cell.max_housing = *h;
        }
        let mut civs: Vec<Civilization> = (0..CIVS)
            .map(|i| Civilization::new(CivId(i), format!("Civ {i}"), Color::default()))
            .collect();

        for op in ops {
            match op {
                TerritoryOp::Claim { civ, cell } => {
                    claim_cell(&mut map, &mut civs, CivId(civ), CellId(cell), &config).unwrap();
                    prop_assert_eq!(map.owner_of(CellId(cell)), Some(CivId(civ)));
                }
                TerritoryOp::Lose { civ, cell } => {
                    let owned_before = map.owner_of(CellId(cell)) == Some(CivId(civ));
                    prop_assert_eq!(lose_cell(&mut map, &mut civs, CivId(civ), CellId(cell)), owned_before);
                    if owned_before {
                        prop_assert_eq!(map.owner_of(CellId(cell)), None);
                    }
                }
            }
            check_invariants(&map, &civs)?;
        }
    }

    #[test]
    fn prop_opinions_only_worsen(
        ops in proptest::collection::vec((0..CIVS, 0..WIDTH * HEIGHT), 1..60),
    ) {
        let config = SimulationConfig::default();
        let mut map = WorldMap::new(WIDTH, HEIGHT, Topology::Hex).unwrap();
        let mut civs: Vec<Civilization> = (0..CIVS)
            .map(|i| Civilization::new(CivId(i), format!("Civ {i}"), Color::default()))
            .collect();

        for (civ, cell) in ops {
            let before: Vec<_> = civs.iter().map(|c| c.opinions().clone()).collect();
            claim_cell(&mut map, &mut civs, CivId(civ), CellId(cell), &config).unwrap();

            for (c, old) in civs.iter().zip(&before) {
                for (rival, opinion) in c.opinions() {
                    prop_assert_ne!(*rival, c.id);
                    prop_assert!(*opinion <= config.behavior.first_contact_opinion);
                    if let Some(prev) = old.get(rival) {
                        prop_assert!(opinion <= prev);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_cooldown_stays_bounded(ops in proptest::collection::vec(cooldown_op(), 0..100)) {
        let mut civ = Civilization::new(CivId(0), "Avalon", Color::default());
        for (i, op) in ops.into_iter().enumerate() {
            match op {
                CooldownOp::Decay(amount) => civ.decay_war_cooldown(amount),
                CooldownOp::WarEnded(value) => {
                    let war = WarId(i as u32);
                    civ.start_war(war);
                    prop_assert!(civ.end_war(war, value));
                }
            }
            prop_assert!((0..=MAX_WAR_COOLDOWN).contains(&civ.war_cooldown()));
            prop_assert!(!civ.at_war());
        }
    }
}
