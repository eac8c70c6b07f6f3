//! Error types for the water-jug solver.
//!
//! Search outcomes (solved, budget exhausted, unsolvable) are not errors; see
//! [`crate::strategy::SearchStatus`]. These variants cover malformed input to
//! the public API and configuration I/O.

use thiserror::Error;

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building states, moves or configurations.
#[derive(Debug, Error)]
pub enum Error {
    /// A fill level was larger than the container holding it.
    #[error("container {container} holds {level} units but its capacity is {capacity}")]
    LevelExceedsCapacity {
        container: usize,
        level: u64,
        capacity: u64,
    },

    /// Only containers 0 and 1 exist.
    #[error("invalid container index {0} (expected 0 or 1)")]
    InvalidContainer(usize),

    /// A move could not be parsed from text.
    #[error("invalid move '{0}' (expected fill0, fill1, empty0, empty1, pour0 or pour1)")]
    InvalidMove(String),

    /// A move would leave the state unchanged.
    #[error("move {mv} has no effect on {state}")]
    IllegalMove { mv: String, state: String },

    /// Search configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read a configuration file.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a configuration file.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
