//! Tuning parameters shared by all search strategies.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::heuristic::HeuristicKind;
use crate::state::Move;

/// Default cap on visited states for BFS, visited-set backtracking and A*.
pub const DEFAULT_MAX_VISITED_STATES: usize = 50_000;

/// Default move budget for depth-bounded backtracking.
pub const DEFAULT_MAX_MOVES: usize = 8;

/// Default number of restarts for the hill-climbing strategies.
pub const DEFAULT_ITERATIONS: usize = 1_000;

/// Default random-walk length before greedy hill-climbing starts improving.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Default number of improvement steps per hill-climbing iteration.
pub const DEFAULT_MAX_IMPROVEMENTS: usize = 20;

/// Configuration threaded into every strategy at construction.
///
/// Each strategy reads only the fields it needs; see the field docs.
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Visited-state cap (BFS, visited-set backtracking, best-first).
    pub max_visited_states: usize,
    /// Maximum path length (depth-bounded backtracking).
    pub max_moves: usize,
    /// Number of restarts (greedy and stochastic hill-climbing).
    pub iterations: usize,
    /// Random-walk length (greedy hill-climbing).
    pub max_depth: usize,
    /// Improvement steps per restart (greedy and stochastic hill-climbing).
    pub max_improvements: usize,
    /// Heuristic for the informed strategies.
    pub heuristic: HeuristicKind,
    /// Seed for the randomized strategies (None = seeded from entropy).
    pub seed: Option<u64>,
    /// Moves tried at every state, in order.
    pub moves: Vec<Move>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_visited_states: DEFAULT_MAX_VISITED_STATES,
            max_moves: DEFAULT_MAX_MOVES,
            iterations: DEFAULT_ITERATIONS,
            max_depth: DEFAULT_MAX_DEPTH,
            max_improvements: DEFAULT_MAX_IMPROVEMENTS,
            heuristic: HeuristicKind::default(),
            seed: None,
            moves: Move::ALL.to_vec(),
        }
    }
}

impl SearchConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every strategy can run with this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.moves.is_empty() {
            return Err(Error::InvalidConfig("move set is empty".into()));
        }
        if self.max_visited_states == 0 {
            return Err(Error::InvalidConfig(
                "max_visited_states must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn with_max_visited_states(mut self, cap: usize) -> Self {
        self.max_visited_states = cap;
        self
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_improvements(mut self, max_improvements: usize) -> Self {
        self.max_improvements = max_improvements;
        self
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_moves(mut self, moves: impl Into<Vec<Move>>) -> Self {
        self.moves = moves.into();
        self
    }
}
