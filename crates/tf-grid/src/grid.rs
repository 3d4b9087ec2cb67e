//! Multi-occupancy lattice.
//!
//! # Data layout
//!
//! Occupancy is stored row-major: the occupants of `Cell { x, y }` are
//! `cells[y * width + x]`, a small `Vec<AgentId>` kept in insertion order.
//! A separate `AgentId → Cell` index answers "where is this car?" in O(1)
//! and is the single source of truth for a car's position: a car that is
//! not in the index is unplaced.
//!
//! The grid does not wrap.  Anything outside `[0, width) × [0, height)` is
//! rejected with [`GridError::OutOfBounds`].

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use tf_core::{AgentId, Cell};

use crate::{GridError, GridResult};

/// A `width × height` lattice where each cell holds zero or more cars.
pub struct MultiGrid {
    width:     u32,
    height:    u32,
    cells:     Vec<Vec<AgentId>>,
    locations: HashMap<AgentId, Cell>,
}

impl MultiGrid {
    /// Create an empty grid.  Both dimensions must be ≥ 1.
    pub fn new(width: u32, height: u32) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        let size = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            cells: vec![Vec::new(); size],
            locations: HashMap::default(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` if `cell` lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.within(self.width, self.height)
    }

    /// Number of cars currently on the grid.
    #[inline]
    pub fn agent_count(&self) -> usize {
        self.locations.len()
    }

    /// Where `agent` is, or `None` if it is not on the grid.
    #[inline]
    pub fn locate(&self, agent: AgentId) -> Option<Cell> {
        self.locations.get(&agent).copied()
    }

    /// All cars in `cell`, in the order they arrived.
    ///
    /// Out-of-bounds cells are simply empty.
    pub fn occupants(&self, cell: Cell) -> &[AgentId] {
        match self.index_of(cell) {
            Some(i) => &self.cells[i],
            None => &[],
        }
    }

    /// Put an unplaced car on `cell`.  The cell may already be occupied.
    pub fn place(&mut self, agent: AgentId, cell: Cell) -> GridResult<()> {
        let idx = self.checked_index(cell)?;
        if self.locations.contains_key(&agent) {
            return Err(GridError::AlreadyPlaced(agent));
        }
        self.cells[idx].push(agent);
        self.locations.insert(agent, cell);
        Ok(())
    }

    /// Move a placed car to `to`.  Moving onto the car's own cell is a no-op.
    pub fn move_agent(&mut self, agent: AgentId, to: Cell) -> GridResult<()> {
        let to_idx = self.checked_index(to)?;
        let from = self.locate(agent).ok_or(GridError::NotPlaced(agent))?;
        if from == to {
            return Ok(());
        }
        self.detach(agent, from);
        self.cells[to_idx].push(agent);
        self.locations.insert(agent, to);
        Ok(())
    }

    /// Take a car off the grid, returning the cell it was on.
    pub fn remove(&mut self, agent: AgentId) -> GridResult<Cell> {
        let from = self.locations.remove(&agent).ok_or(GridError::NotPlaced(agent))?;
        self.detach(agent, from);
        Ok(from)
    }

    /// Iterator over every non-empty cell and its occupants, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Cell, &[AgentId])> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occ)| !occ.is_empty())
            .map(move |(i, occ)| (self.cell_at(i), occ.as_slice()))
    }

    // ── Index helpers ─────────────────────────────────────────────────────

    fn index_of(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    fn checked_index(&self, cell: Cell) -> GridResult<usize> {
        self.index_of(cell).ok_or(GridError::OutOfBounds {
            cell,
            width: self.width,
            height: self.height,
        })
    }

    fn cell_at(&self, index: usize) -> Cell {
        let w = self.width as usize;
        Cell::new((index % w) as u32, (index / w) as u32)
    }

    /// Drop `agent` from the occupant list of `cell` (location index untouched).
    fn detach(&mut self, agent: AgentId, cell: Cell) {
        if let Some(i) = self.index_of(cell) {
            let occ = &mut self.cells[i];
            if let Some(pos) = occ.iter().position(|&a| a == agent) {
                occ.remove(pos);
            }
        }
    }
}
