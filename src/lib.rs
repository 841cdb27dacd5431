//! Lineup placement engine library.
//!
//! Scores every way of laying nine entities out on a 3×3 board with one of
//! them hidden, and ranks the results. Exposes the board model, scorer,
//! exhaustive sweep, ranking, and reporting for the binary and for tests.

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod eval;
pub mod rank;
pub mod report;
pub mod search;

pub use board::{Direction, Entity, Grid, MoveKind, Moves, Team, Vehicle};
pub use catalog::Catalog;
pub use error::{CatalogError, ConfigError, RankPolicyError, SweepError};
pub use eval::{score_grid, LinkStats, Metrics};
pub use rank::{rank, RankPolicy, Ranking};
pub use search::{enumerate, enumerate_parallel, enumerate_with, score_configuration};
