//! The 3×3 board.
//!
//! Slots are numbered row-major:
//!
//! ```text
//!   0 1 2
//!   3 4 5
//!   6 7 8
//! ```
//!
//! One slot may be marked active (the hidden entity); reads of that slot
//! return empty while the stored occupant stays available through
//! [`Grid::occupant`]. Three off-grid coordinates hold the vehicles.
//!
//! Designed for reuse: a sweep keeps one grid and overwrites slots rather
//! than allocating a new board per configuration.

use super::entity::{Entity, Vehicle};

/// The width and height of the board.
pub const GRID_SIDE: i32 = 3;

/// The number of in-range slots.
pub const SLOT_COUNT: usize = 9;

/// Result of probing a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    /// Out of range, never assigned, or the active slot.
    Empty,
    /// An in-range slot with a visible occupant.
    Occupant { slot: usize, entity: &'a Entity },
    /// One of the fixed off-grid vehicles.
    Vehicle(Vehicle),
}

/// Returns the slot index for an in-range coordinate.
#[inline]
pub const fn slot_index(x: i32, y: i32) -> Option<usize> {
    if x >= 0 && x < GRID_SIDE && y >= 0 && y < GRID_SIDE {
        Some((GRID_SIDE * y + x) as usize)
    } else {
        None
    }
}

/// Returns the `(x, y)` coordinate of a slot.
#[inline]
pub const fn slot_coord(slot: usize) -> (i32, i32) {
    ((slot % 3) as i32, (slot / 3) as i32)
}

/// The board: nine slot references plus the active (hidden) slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grid<'a> {
    cells: [Option<&'a Entity>; SLOT_COUNT],
    active: Option<usize>,
}

impl<'a> Grid<'a> {
    /// Creates an empty grid with no active slot.
    pub fn new() -> Self {
        Grid {
            cells: [None; SLOT_COUNT],
            active: None,
        }
    }

    /// Probes a coordinate, applying active-slot masking and vehicle lookup.
    #[inline]
    pub fn probe(&self, x: i32, y: i32) -> Cell<'a> {
        match slot_index(x, y) {
            Some(slot) => {
                if self.active == Some(slot) {
                    return Cell::Empty;
                }
                match self.cells[slot] {
                    Some(entity) => Cell::Occupant { slot, entity },
                    None => Cell::Empty,
                }
            }
            None => match Vehicle::at(x, y) {
                Some(v) => Cell::Vehicle(v),
                None => Cell::Empty,
            },
        }
    }

    /// Returns the visible entity at a coordinate, or `None` if empty.
    pub fn get(&self, x: i32, y: i32) -> Option<&'a Entity> {
        match self.probe(x, y) {
            Cell::Empty => None,
            Cell::Occupant { entity, .. } => Some(entity),
            Cell::Vehicle(v) => Some(v.entity()),
        }
    }

    /// Places an entity at a coordinate. Returns false (and does nothing) if
    /// the coordinate is out of range.
    pub fn set(&mut self, x: i32, y: i32, entity: &'a Entity) -> bool {
        match slot_index(x, y) {
            Some(slot) => {
                self.cells[slot] = Some(entity);
                true
            }
            None => false,
        }
    }

    /// Places an entity in a slot. Returns false for slots outside 0..9.
    #[inline]
    pub fn set_slot(&mut self, slot: usize, entity: &'a Entity) -> bool {
        match self.cells.get_mut(slot) {
            Some(cell) => {
                *cell = Some(entity);
                true
            }
            None => false,
        }
    }

    /// Sets or clears the active slot. Out-of-range slots clear it.
    #[inline]
    pub fn pick(&mut self, slot: Option<usize>) {
        self.active = slot.filter(|&s| s < SLOT_COUNT);
    }

    /// The active slot, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The entity stored in a slot, ignoring active-slot masking.
    #[inline]
    pub fn occupant(&self, slot: usize) -> Option<&'a Entity> {
        self.cells.get(slot).copied().flatten()
    }

    /// The entity stored in the active slot.
    pub fn hidden(&self) -> Option<&'a Entity> {
        self.active.and_then(|s| self.occupant(s))
    }

    /// Removes every occupant and clears the active slot.
    pub fn clear(&mut self) {
        self.cells = [None; SLOT_COUNT];
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::entity::{Moves, Team};

    fn person(name: &str) -> Entity {
        Entity::new(name, Team::Good, Moves::NONE)
    }

    #[test]
    fn slot_coords_roundtrip() {
        for slot in 0..SLOT_COUNT {
            let (x, y) = slot_coord(slot);
            assert_eq!(slot_index(x, y), Some(slot));
        }
        assert_eq!(slot_index(-1, 0), None);
        assert_eq!(slot_index(3, 1), None);
    }

    #[test]
    fn set_and_get() {
        let a = person("a");
        let mut grid = Grid::new();
        assert!(grid.set(1, 2, &a));
        assert_eq!(grid.get(1, 2).map(|e| e.name.as_str()), Some("a"));
        assert_eq!(grid.occupant(7).map(|e| e.name.as_str()), Some("a"));
        assert!(grid.get(0, 0).is_none());
    }

    #[test]
    fn out_of_range_writes_fail_silently() {
        let a = person("a");
        let mut grid = Grid::new();
        assert!(!grid.set(3, 0, &a));
        assert!(!grid.set(0, -1, &a));
        assert!(!grid.set_slot(9, &a));
        assert!((0..SLOT_COUNT).all(|s| grid.occupant(s).is_none()));
    }

    #[test]
    fn active_slot_reads_empty() {
        let a = person("a");
        let mut grid = Grid::new();
        grid.set_slot(4, &a);
        grid.pick(Some(4));
        assert!(grid.get(1, 1).is_none());
        assert_eq!(grid.probe(1, 1), Cell::Empty);
        assert_eq!(grid.hidden().map(|e| e.name.as_str()), Some("a"));

        grid.pick(None);
        assert!(grid.get(1, 1).is_some());
    }

    #[test]
    fn out_of_range_pick_clears() {
        let mut grid = Grid::new();
        grid.pick(Some(3));
        assert_eq!(grid.active(), Some(3));
        grid.pick(Some(12));
        assert_eq!(grid.active(), None);
    }

    #[test]
    fn vehicles_off_grid() {
        let grid = Grid::new();
        assert_eq!(grid.get(3, 2).map(|e| e.name.as_str()), Some("boat"));
        assert_eq!(grid.get(-1, 0).map(|e| e.name.as_str()), Some("car"));
        assert_eq!(grid.get(2, -1).map(|e| e.name.as_str()), Some("plane"));
        assert_eq!(grid.probe(-1, 0), Cell::Vehicle(Vehicle::Car));
        assert!(grid.get(3, 1).is_none());
        assert!(grid.get(-1, 2).is_none());
        assert!(grid.get(0, -1).is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let a = person("a");
        let mut grid = Grid::new();
        grid.set_slot(0, &a);
        grid.pick(Some(0));
        grid.clear();
        assert!(grid.occupant(0).is_none());
        assert_eq!(grid.active(), None);
    }
}
