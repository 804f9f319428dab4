//! WorldMap - arena of cells addressed by CellId

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{CellId, CivId};
use crate::world::cell::Cell;

/// Adjacency pattern between cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Odd-r offset hexes: odd rows are shoved half a cell to the right
    #[default]
    Hex,
    /// Four orthogonal neighbors
    Square,
}

// Offsets for odd-r hex rows
const HEX_EVEN_ROW: [(i32, i32); 6] = [(-1, 0), (1, 0), (-1, -1), (0, -1), (-1, 1), (0, 1)];
const HEX_ODD_ROW: [(i32, i32); 6] = [(-1, 0), (1, 0), (0, -1), (1, -1), (0, 1), (1, 1)];
const SQUARE: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Topology {
    /// Neighbor offsets for a cell in row `y`
    pub fn offsets(self, y: u32) -> &'static [(i32, i32)] {
        match self {
            Topology::Hex if y % 2 == 0 => &HEX_EVEN_ROW,
            Topology::Hex => &HEX_ODD_ROW,
            Topology::Square => &SQUARE,
        }
    }
}

/// The world grid
///
/// Cells are stored row-major, so `CellId(y * width + x)` addresses `(x, y)`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorldMap {
    width: u32,
    height: u32,
    topology: Topology,
    cells: Vec<Cell>,
}

impl WorldMap {
    /// Create a blank map with neighbors wired for `topology`
    pub fn new(width: u32, height: u32, topology: Topology) -> Result<Self> {
        // Every cell id must fit in a u32
        let count = match width.checked_mul(height) {
            Some(count) if count > 0 => count,
            _ => return Err(SimError::InvalidDimensions { width, height }),
        };

        let mut cells = Vec::with_capacity(count as usize);
        for y in 0..height {
            for x in 0..width {
                let id = CellId(y * width + x);
                let mut cell = Cell::new(id, x, y);
                cell.neighbors = neighbor_ids(x, y, width, height, topology);
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            topology,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, id: CellId) -> bool {
        id.index() < self.cells.len()
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id.index())
    }

    /// Id of the cell at `(x, y)`, if inside the grid
    pub fn id_at(&self, x: u32, y: u32) -> Option<CellId> {
        (x < self.width && y < self.height).then(|| CellId(y * self.width + x))
    }

    pub fn cell_at(&self, x: u32, y: u32) -> Option<&Cell> {
        self.id_at(x, y).and_then(|id| self.cell(id))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Owner of a cell; `None` for unowned or out-of-range cells
    pub fn owner_of(&self, id: CellId) -> Option<CivId> {
        self.cell(id).and_then(|c| c.owner)
    }

    /// Neighbor ids of a cell; empty for out-of-range ids
    pub fn neighbors_of(&self, id: CellId) -> &[CellId] {
        self.cell(id).map(|c| c.neighbors()).unwrap_or(&[])
    }

    pub(crate) fn set_owner(&mut self, id: CellId, owner: Option<CivId>) {
        if let Some(cell) = self.cells.get_mut(id.index()) {
            cell.owner = owner;
        }
    }
}

fn neighbor_ids(x: u32, y: u32, width: u32, height: u32, topology: Topology) -> Vec<CellId> {
    let mut neighbors = Vec::with_capacity(6);

    for &(dx, dy) in topology.offsets(y) {
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;

        if nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64 {
            neighbors.push(CellId(ny as u32 * width + nx as u32));
        }
    }

    neighbors
}
