//! Error types for catalog loading, sweeps, and ranking policies.
//!
//! Grid reads and writes never fail: off-grid probes are a normal part of
//! adjacency scanning and simply come back empty.

use std::path::PathBuf;

/// Errors raised at the sweep boundary, before any configuration is scored.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("pool must hold exactly 9 entities, got {0}")]
    InvalidPoolSize(usize),

    #[error("entity '{0}' appears more than once in the pool")]
    DuplicateEntity(String),

    #[error("vehicle '{0}' cannot be placed on the grid")]
    VehicleInPool(String),

    #[error("assignment is not a permutation of 0..9: {0:?}")]
    InvalidAssignment(Vec<usize>),

    #[error("picked slot {0} is outside 0..9")]
    PickedSlotOutOfRange(usize),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors that can occur while loading an entity catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("team '{team}' has {found} entities, a pool needs exactly 9")]
    WrongTeamSize { team: String, found: usize },
}

/// Errors that can occur while parsing a ranking policy string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RankPolicyError {
    #[error("empty ranking policy")]
    Empty,

    #[error("expected '<metric>:<high|low>', got '{0}'")]
    MalformedKey(String),

    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    #[error("unknown preference '{0}', expected 'high' or 'low'")]
    UnknownPreference(String),

    #[error("metric '{0}' listed more than once")]
    DuplicateMetric(String),
}

/// Errors from command-line configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value for {flag}: '{value}'")]
    InvalidValue { flag: String, value: String },

    #[error("invalid ranking policy: {0}")]
    Policy(#[from] RankPolicyError),

    #[error("--catalog is required")]
    MissingCatalog,
}
