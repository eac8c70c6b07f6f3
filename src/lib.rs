//! Water Jug Solver Library
//!
//! Searches for a sequence of fill, empty and pour moves that leaves exactly
//! `k` units in one of two containers with capacities `n` and `m`.
//!
//! Six interchangeable strategies share the [`Strategy`] interface: breadth-first
//! search, visited-set backtracking, depth-bounded backtracking, greedy and
//! stochastic hill-climbing, and heuristic best-first search. Unreachable
//! targets are detected up front with the gcd criterion and never searched.
//!
//! ```
//! use waterjug::{solve, SearchConfig, StrategyKind};
//!
//! let report = solve(StrategyKind::Bfs, 5, 3, 4, &SearchConfig::default())?;
//! assert!(report.is_solved());
//! print!("{}", waterjug::format_path(&report.path));
//! # Ok::<(), waterjug::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod heuristic;
pub mod path;
pub mod state;
pub mod strategy;

pub use config::SearchConfig;
pub use error::{Error, Result};
pub use heuristic::{Heuristic, HeuristicKind};
pub use path::{format_path, SearchPath, Step};
pub use state::{Container, Move, MoveKind, State};
pub use strategy::{Report, SearchStats, SearchStatus, Strategy, StrategyKind};

/// Runs one strategy on the instance `(n, m, k)` starting from empty
/// containers.
///
/// Fails only if `config` is invalid; search outcomes are in the report.
pub fn solve(kind: StrategyKind, n: u64, m: u64, k: u64, config: &SearchConfig) -> Result<Report> {
    config.validate()?;
    let mut strategy = kind.build(State::initial(n, m, k), config);
    strategy.start();
    Ok(strategy.report().clone())
}
