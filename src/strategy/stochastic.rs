//! Stochastic hill-climbing.
//!
//! Every iteration climbs from the initial state. At each step the candidate
//! moves are those that do not worsen the heuristic; one is drawn at random
//! with probability proportional to `max_value - h(next)`. A move that reaches
//! a final state is always taken.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;

use crate::config::SearchConfig;
use crate::heuristic::{Heuristic, HeuristicKind};
use crate::path::SearchPath;
use crate::state::{Move, State};

use super::{seeded_rng, settle_without_search, Report, SearchStats, Strategy};

pub(crate) const NAME: &str = "stochastic hill-climbing";

pub struct StochasticHillClimbing<H = HeuristicKind> {
    initial: State,
    heuristic: H,
    moves: Vec<Move>,
    iterations: usize,
    max_improvements: usize,
    seed: Option<u64>,
    report: Report,
}

impl StochasticHillClimbing {
    /// Uses the heuristic selected in `config`.
    pub fn new(initial: State, config: &SearchConfig) -> Self {
        Self::with_heuristic(initial, config.heuristic, config)
    }
}

impl<H: Heuristic> StochasticHillClimbing<H> {
    pub fn with_heuristic(initial: State, heuristic: H, config: &SearchConfig) -> Self {
        Self {
            initial,
            heuristic,
            moves: config.moves.clone(),
            iterations: config.iterations,
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

            for _ in 0..self.max_improvements {
                let state = path.last_state();
                stats.expanded += 1;
                let candidates = self.candidates(state);
                let Some(mv) = self.choose(&candidates, &mut rng) else {
                    break;
                };
                path.push(mv);
                if path.last_state().is_final() {
                    log::info!(
                        "{NAME}: solved in {} moves on iteration {}",
                        path.move_count(),
                        iteration + 1
                    );
                    return Report::solved(path, stats);
                }
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

    /// Valid moves whose result scores no worse than `state`, with their
    /// scores. Collapses to a single move if one reaches a final state.
    fn candidates(&self, state: State) -> Vec<(Move, f64)> {
        let current = self.heuristic.evaluate(&state);
        let mut good = Vec::new();
        for &mv in &self.moves {
            if !state.move_is_valid(mv) {
                continue;
            }
            let next = state.execute_move(mv);
            let score = self.heuristic.evaluate(&next);
            if next.is_final() {
                return vec![(mv, score)];
            }
            if score <= current {
                good.push((mv, score));
            }
        }
        good
    }

    /// Draws a candidate with weight `max_value - score`. If every weight is
    /// zero the first candidate is taken.
    fn choose(&self, candidates: &[(Move, f64)], rng: &mut SmallRng) -> Option<Move> {
        let &(first, _) = candidates.first()?;
        let max_value = self.heuristic.max_value();
        let weights = candidates.iter().map(|&(_, score)| max_value - score);
        match WeightedIndex::<f64>::new(weights) {
            Ok(distribution) => Some(candidates[distribution.sample(rng)].0),
            Err(_) => Some(first),
        }
    }
}

impl<H: Heuristic> Strategy for StochasticHillClimbing<H> {
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
