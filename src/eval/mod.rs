//! Board evaluation.
//!
//! Scores a populated grid by its link structure: how many links exist,
//! how many are one-sided, how many end on vehicles or nothing at all, and
//! how the occupants group into connected components.

pub mod connectivity;

pub use connectivity::{score_grid, Components, LinkStats, Metrics};
