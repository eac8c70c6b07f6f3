//! Search strategies over the water-jug state graph.
//!
//! Every strategy follows the same lifecycle: it is built from an initial
//! state and a [`SearchConfig`], [`Strategy::start`] runs the search to
//! completion, and the [`Report`] describes the outcome. Calling `start`
//! again discards the previous bookkeeping and searches from scratch.

use std::fmt;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::path::SearchPath;
use crate::state::{Move, State};

pub mod backtracking;
pub mod best_first;
pub mod bfs;
pub mod bounded;
pub mod hill_climbing;
pub mod stochastic;

pub use backtracking::Backtracking;
pub use best_first::BestFirst;
pub use bfs::Bfs;
pub use bounded::BoundedBacktracking;
pub use hill_climbing::GreedyHillClimbing;
pub use stochastic::StochasticHillClimbing;

/// Outcome of a search.
///
/// `Exhausted` only means the budget ran out; it never claims the target is
/// unreachable. That verdict belongs to `Unsolvable`, which is decided by the
/// closed-form check before any search happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStatus {
    NotStarted,
    Solved,
    Exhausted,
    Unsolvable,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SearchStatus::NotStarted => "not started",
            SearchStatus::Solved => "solved",
            SearchStatus::Exhausted => "budget exhausted",
            SearchStatus::Unsolvable => "unsolvable",
        };
        f.write_str(text)
    }
}

/// Work counters collected during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States whose successors were generated.
    pub expanded: usize,
    /// Restarts performed by the hill-climbing strategies.
    pub iterations: usize,
}

/// Status, path and counters of one search.
///
/// The path always replays consistently from the initial state. When solved it
/// ends in a final state; when exhausted it leads to the last state the
/// strategy was working on; when unsolvable it holds only the sentinel step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub status: SearchStatus,
    pub path: SearchPath,
    pub stats: SearchStats,
}

impl Report {
    /// A report for a search that has not run yet.
    pub fn not_started(initial: State) -> Self {
        Self {
            status: SearchStatus::NotStarted,
            path: SearchPath::new(initial),
            stats: SearchStats::default(),
        }
    }

    pub fn unsolvable(initial: State) -> Self {
        Self {
            status: SearchStatus::Unsolvable,
            ..Self::not_started(initial)
        }
    }

    pub fn solved(path: SearchPath, stats: SearchStats) -> Self {
        debug_assert!(path.last_state().is_final());
        Self {
            status: SearchStatus::Solved,
            path,
            stats,
        }
    }

    pub fn exhausted(path: SearchPath, stats: SearchStats) -> Self {
        Self {
            status: SearchStatus::Exhausted,
            path,
            stats,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

/// Common interface of all search strategies.
///
/// Object safe, so callers can pick a strategy at runtime through
/// [`StrategyKind::build`].
pub trait Strategy {
    /// Human-readable strategy name.
    fn name(&self) -> &'static str;

    /// Runs the search, replacing any previous report.
    fn start(&mut self);

    /// The outcome of the most recent [`Strategy::start`].
    fn report(&self) -> &Report;

    fn status(&self) -> SearchStatus {
        self.report().status
    }

    /// The reported path, sentinel step included.
    fn solution_path(&self) -> &SearchPath {
        &self.report().path
    }

    fn stats(&self) -> SearchStats {
        self.report().stats
    }
}

/// Selects one of the built-in strategies at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Bfs,
    Backtracking,
    BoundedBacktracking,
    GreedyHillClimbing,
    StochasticHillClimbing,
    BestFirst,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Bfs,
        StrategyKind::Backtracking,
        StrategyKind::BoundedBacktracking,
        StrategyKind::GreedyHillClimbing,
        StrategyKind::StochasticHillClimbing,
        StrategyKind::BestFirst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Bfs => bfs::NAME,
            StrategyKind::Backtracking => backtracking::NAME,
            StrategyKind::BoundedBacktracking => bounded::NAME,
            StrategyKind::GreedyHillClimbing => hill_climbing::NAME,
            StrategyKind::StochasticHillClimbing => stochastic::NAME,
            StrategyKind::BestFirst => best_first::NAME,
        }
    }

    /// True for the strategies that draw random numbers.
    pub fn is_randomized(self) -> bool {
        matches!(
            self,
            StrategyKind::GreedyHillClimbing | StrategyKind::StochasticHillClimbing
        )
    }

    /// Builds the strategy for `initial`, reading its tuning from `config`.
    pub fn build(self, initial: State, config: &SearchConfig) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Bfs => Box::new(Bfs::new(initial, config)),
            StrategyKind::Backtracking => Box::new(Backtracking::new(initial, config)),
            StrategyKind::BoundedBacktracking => {
                Box::new(BoundedBacktracking::new(initial, config))
            }
            StrategyKind::GreedyHillClimbing => Box::new(GreedyHillClimbing::new(initial, config)),
            StrategyKind::StochasticHillClimbing => {
                Box::new(StochasticHillClimbing::new(initial, config))
            }
            StrategyKind::BestFirst => Box::new(BestFirst::new(initial, config)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settles instances that need no search: unsolvable targets and initial
/// states that are already final.
pub(crate) fn settle_without_search(name: &str, initial: State) -> Option<Report> {
    if !initial.has_solution() {
        log::debug!("{name}: {initial} has no solution, skipping search");
        return Some(Report::unsolvable(initial));
    }
    if initial.is_final() {
        log::debug!("{name}: {initial} is already final");
        return Some(Report::solved(
            SearchPath::new(initial),
            SearchStats::default(),
        ));
    }
    None
}

/// Random source for the randomized strategies: reproducible when a seed is
/// configured, seeded from entropy otherwise.
pub(crate) fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Predecessor links keyed by state: each reached state maps to the state it
/// was reached from and the move applied there.
pub(crate) type Predecessors = FxHashMap<State, (State, Move)>;

/// Walks predecessor links back from `target` to `initial` and returns the
/// forward path.
pub(crate) fn reconstruct(predecessors: &Predecessors, initial: State, target: State) -> SearchPath {
    let mut moves = Vec::new();
    let mut current = target;
    while current != initial {
        let Some(&(previous, mv)) = predecessors.get(&current) else {
            debug_assert!(false, "no predecessor recorded for {current}");
            break;
        };
        moves.push(mv);
        current = previous;
    }
    moves.reverse();
    SearchPath::from_moves(initial, moves)
}
