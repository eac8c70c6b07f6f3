//! Greedy hill-climbing with random restarts.
//!
//! Each iteration takes a short random walk away from the initial state and
//! then repeatedly applies the valid move with the lowest heuristic value, as
//! long as that value does not get worse. Iterations share no memory.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::config::SearchConfig;
use crate::heuristic::{Heuristic, HeuristicKind};
use crate::path::SearchPath;
use crate::state::{Move, State};

use super::{seeded_rng, settle_without_search, Report, SearchStats, Strategy};

pub(crate) const NAME: &str = "greedy hill-climbing";

pub struct GreedyHillClimbing<H = HeuristicKind> {
    initial: State,
    heuristic: H,
    moves: Vec<Move>,
    iterations: usize,
    max_depth: usize,
    max_improvements: usize,
    seed: Option<u64>,
    report: Report,
}

impl GreedyHillClimbing {
    /// Uses the heuristic selected in `config`.
    pub fn new(initial: State, config: &SearchConfig) -> Self {
        Self::with_heuristic(initial, config.heuristic, config)
    }
}

impl<H: Heuristic> GreedyHillClimbing<H> {
    pub fn with_heuristic(initial: State, heuristic: H, config: &SearchConfig) -> Self {
        Self {
            initial,
            heuristic,
            moves: config.moves.clone(),
            iterations: config.iterations,
            max_depth: config.max_depth,
            max_improvements: config.max_improvements,
            seed: config.seed,
            report: Report::not_started(initial),
        }
    }

    fn search(&self) -> Report {
        let mut rng = seeded_rng(self.seed);
        let mut stats = SearchStats::default();
        let mut last_attempt = SearchPath::new(self.initial);

        for iteration in 0..self.iterations {
            stats.iterations += 1;
            let mut path = SearchPath::new(self.initial);

            let solved = self.random_walk(&mut path, &mut rng) || {
                self.improve(&mut path, &mut stats);
                path.last_state().is_final()
            };
            if solved {
                log::info!(
                    "{NAME}: solved in {} moves on iteration {}",
                    path.move_count(),
                    iteration + 1
                );
                return Report::solved(path, stats);
            }

            log::debug!(
                "{NAME}: iteration {} ended at {}",
                iteration + 1,
                path.last_state()
            );
            last_attempt = path;
        }

        Report::exhausted(last_attempt, stats)
    }

    /// Appends up to `max_depth` uniformly chosen valid moves. Returns true as
    /// soon as a final state is reached.
    fn random_walk(&self, path: &mut SearchPath, rng: &mut SmallRng) -> bool {
        for _ in 0..self.max_depth {
            let state = path.last_state();
            let valid: Vec<Move> = self
                .moves
                .iter()
                .copied()
                .filter(|&mv| state.move_is_valid(mv))
                .collect();
            let Some(&mv) = valid.choose(rng) else {
                break;
            };
            path.push(mv);
            if path.last_state().is_final() {
                return true;
            }
        }
        false
    }

    /// Applies the best valid move while it does not worsen the score, for at
    /// most `max_improvements` steps. A best candidate scoring `max_value`
    /// counts as no candidate at all.
    fn improve(&self, path: &mut SearchPath, stats: &mut SearchStats) {
        let mut best_score = self.heuristic.evaluate(&path.last_state());
        let max_value = self.heuristic.max_value();

        for _ in 0..self.max_improvements {
            if best_score == self.heuristic.min_value() {
                break;
            }
            let state = path.last_state();
            stats.expanded += 1;

            // strict minimum, so the first of several equal candidates wins
            let mut best: Option<(Move, f64)> = None;
            for &mv in &self.moves {
                if !state.move_is_valid(mv) {
                    continue;
                }
                let score = self.heuristic.evaluate(&state.execute_move(mv));
                if best.map_or(true, |(_, lowest)| score < lowest) {
                    best = Some((mv, score));
                }
            }

            match best {
                Some((mv, score)) if score < max_value && score <= best_score => {
                    path.push(mv);
                    best_score = score;
                }
                _ => break,
            }
        }
    }
}

impl<H: Heuristic> Strategy for GreedyHillClimbing<H> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn start(&mut self) {
        log::debug!(
            "{NAME}: starting from {} using {}",
            self.initial,
            self.heuristic.name()
        );
        self.report = settle_without_search(NAME, self.initial).unwrap_or_else(|| self.search());
    }

    fn report(&self) -> &Report {
        &self.report
    }
}
