//! Events and history logging

use serde::{Deserialize, Serialize};

use crate::core::types::{CellId, CivId, Tick, WarId};

/// A historical event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub tick: Tick,
    pub event_type: EventType,
    pub participants: Vec<CivId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventType {
    // Territory
    Expansion { civ: CivId, cell: CellId, taken_from: Option<CivId> },
    CellLost { civ: CivId, cell: CellId },

    // Wars
    WarDeclared { war: WarId, aggressor: CivId, defender: CivId },
    WarEnded { war: WarId },

    // Internal
    CivilizationCollapsed { civ: CivId, cells_released: usize },
}

/// The complete history log
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    pub events: Vec<Event>,
    next_event_id: u32,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event_type: EventType, tick: Tick, participants: Vec<CivId>) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;

        self.events.push(Event {
            id,
            tick,
            event_type,
            participants,
        });

        id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_for_tick(&self, tick: Tick) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.tick == tick)
    }

    pub fn events_for_civ(&self, civ: CivId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.participants.contains(&civ))
    }
}
