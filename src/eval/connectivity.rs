//! Connectivity scoring for a populated grid.
//!
//! Every visible occupant is scanned in each direction it supports. A hit on
//! another occupant is a link, a hit on a vehicle is a vehicle link, and a hit
//! on nothing (including the hidden slot) is a miss. Links also feed a
//! union-find over slot indices to count connected components.
//!
//! Design: the scorer works on fixed-size arrays only. No heap allocation
//! happens per call, since a full sweep scores over three million grids.

use serde::Serialize;

use crate::board::entity::{Direction, VEHICLE_COUNT};
use crate::board::grid::{slot_coord, Cell, Grid, SLOT_COUNT};

/// Link counts for one grid, before the configuration identity is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LinkStats {
    /// Links to occupants or vehicles.
    pub total: u32,
    /// Links counted once per reciprocal pair.
    pub unique: u32,
    /// Links ending on a vehicle.
    pub vehicle: u32,
    /// Supported directions that end on nothing.
    pub miss: u32,
    /// Connected components among the stored occupants.
    pub component_count: u8,
    /// Vehicles reached by at least one occupant.
    pub vehicle_component_count: u8,
}

impl LinkStats {
    /// Attaches the configuration identity.
    pub fn tag(self, assignment: [u8; SLOT_COUNT], picked_slot: u8) -> Metrics {
        Metrics {
            total: self.total,
            unique: self.unique,
            vehicle: self.vehicle,
            miss: self.miss,
            component_count: self.component_count,
            vehicle_component_count: self.vehicle_component_count,
            assignment,
            picked_slot,
        }
    }
}

/// The score of one configuration: link counts plus which pool entity sits
/// in each slot and which slot is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Metrics {
    pub total: u32,
    pub unique: u32,
    pub vehicle: u32,
    pub miss: u32,
    pub component_count: u8,
    pub vehicle_component_count: u8,
    /// `assignment[slot]` is the pool index placed in `slot`.
    pub assignment: [u8; SLOT_COUNT],
    pub picked_slot: u8,
}

impl Metrics {
    /// Strips the identity, leaving only the link counts.
    pub fn stats(&self) -> LinkStats {
        LinkStats {
            total: self.total,
            unique: self.unique,
            vehicle: self.vehicle,
            miss: self.miss,
            component_count: self.component_count,
            vehicle_component_count: self.vehicle_component_count,
        }
    }
}

/// Union-find over the nine slots with a live component count.
#[derive(Debug, Clone)]
pub struct Components {
    parent: [u8; SLOT_COUNT],
    present: [bool; SLOT_COUNT],
    count: u8,
}

impl Default for Components {
    fn default() -> Self {
        Self::new()
    }
}

impl Components {
    pub fn new() -> Self {
        Components {
            parent: [0, 1, 2, 3, 4, 5, 6, 7, 8],
            present: [false; SLOT_COUNT],
            count: 0,
        }
    }

    /// Registers a slot as its own component. Re-adding is a no-op.
    pub fn add(&mut self, slot: usize) {
        if !self.present[slot] {
            self.present[slot] = true;
            self.parent[slot] = slot as u8;
            self.count += 1;
        }
    }

    /// Returns the representative of a slot's component (path halving).
    pub fn find(&mut self, mut slot: usize) -> usize {
        while self.parent[slot] as usize != slot {
            let grandparent = self.parent[self.parent[slot] as usize];
            self.parent[slot] = grandparent;
            slot = grandparent as usize;
        }
        slot
    }

    /// Merges two registered slots. Returns true if they were separate.
    /// Slots never passed to [`Components::add`] are left untouched.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        if !self.present[a] || !self.present[b] {
            return false;
        }
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        // Keep the lower slot as root so labels are stable across calls.
        let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[child] = root as u8;
        self.count -= 1;
        true
    }

    /// Number of distinct components.
    pub fn count(&self) -> u8 {
        self.count
    }
}

/// Scores a grid. The active slot reads as empty; its stored occupant is
/// charged one miss per supported direction and remains an isolated node.
pub fn score_grid(grid: &Grid<'_>) -> LinkStats {
    let mut stats = LinkStats::default();

    if let Some(hidden) = grid.hidden() {
        stats.miss += hidden.moves.count();
    }

    let mut components = Components::new();
    for slot in 0..SLOT_COUNT {
        if grid.occupant(slot).is_some() {
            components.add(slot);
        }
    }

    let mut vehicles_reached = [false; VEHICLE_COUNT];

    for slot in 0..SLOT_COUNT {
        let (x, y) = slot_coord(slot);
        let entity = match grid.get(x, y) {
            Some(e) => e,
            None => continue,
        };

        for dir in Direction::ALL {
            if !entity.moves.supports(dir) {
                continue;
            }
            let (dx, dy) = dir.delta();
            match grid.probe(x + dx, y + dy) {
                Cell::Empty => stats.miss += 1,
                Cell::Vehicle(v) => {
                    // Vehicles never look back, so every vehicle link is unique.
                    stats.total += 1;
                    stats.unique += 1;
                    stats.vehicle += 1;
                    vehicles_reached[v as usize] = true;
                }
                Cell::Occupant {
                    slot: other,
                    entity: neighbor,
                } => {
                    stats.total += 1;
                    // A backward link the neighbour already returns was
                    // counted from the neighbour's forward scan.
                    if dir.is_forward() || !neighbor.moves.supports(dir.inverse()) {
                        stats.unique += 1;
                    }
                    components.union(slot, other);
                }
            }
        }
    }

    stats.component_count = components.count();
    stats.vehicle_component_count = vehicles_reached.iter().filter(|&&r| r).count() as u8;
    stats
}
