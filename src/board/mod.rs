//! Board representation.
//!
//! Contains the entity definitions, the fixed vehicles, and the 3×3 grid
//! that configurations are laid out on.

pub mod entity;
pub mod grid;

pub use entity::{Direction, Entity, MoveKind, Moves, Team, Vehicle, DIRECTION_COUNT, VEHICLE_COUNT};
pub use grid::{slot_coord, slot_index, Cell, Grid, GRID_SIDE, SLOT_COUNT};
