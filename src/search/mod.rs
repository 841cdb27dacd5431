//! Exhaustive search.
//!
//! Walks every assignment of the pool to the grid and every choice of
//! hidden slot, scoring each configuration.

pub mod permute;
pub mod sweep;

pub use permute::{factorial, permutation_rank, Permutations, IDENTITY};
pub use sweep::{
    enumerate, enumerate_parallel, enumerate_with, score_configuration, validate_pool,
    SweepOptions, SweepProgress, SweepSummary, CONFIGURATION_COUNT,
};
