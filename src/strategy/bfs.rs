//! Breadth-first search.
//!
//! Explores states in order of move count, so the first final state
//! discovered is reached by a shortest path, unless the visited-state cap
//! stops the search first.

use std::collections::VecDeque;

use crate::config::SearchConfig;
use crate::state::{Move, State};

use super::{reconstruct, settle_without_search, Predecessors, Report, SearchStats, Strategy};

pub(crate) const NAME: &str = "breadth-first search";

pub struct Bfs {
    initial: State,
    moves: Vec<Move>,
    max_visited_states: usize,
    report: Report,
}

impl Bfs {
    pub fn new(initial: State, config: &SearchConfig) -> Self {
        Self {
            initial,
            moves: config.moves.clone(),
            max_visited_states: config.max_visited_states,
            report: Report::not_started(initial),
        }
    }

    fn search(&self) -> Report {
        let mut stats = SearchStats::default();
        // the initial state is discovered but has no entry of its own
        let mut predecessors = Predecessors::default();
        let mut queue = VecDeque::from([self.initial]);
        let mut last_expanded = self.initial;

        while let Some(state) = queue.pop_front() {
            if predecessors.len() + 1 > self.max_visited_states {
                log::debug!(
                    "{NAME}: discovered more than {} states, giving up",
                    self.max_visited_states
                );
                break;
            }
            stats.expanded += 1;
            last_expanded = state;

            for &mv in &self.moves {
                if !state.move_is_valid(mv) {
                    continue;
                }
                let next = state.execute_move(mv);
                if next == self.initial || predecessors.contains_key(&next) {
                    continue;
                }
                predecessors.insert(next, (state, mv));

                // stop the instant a final state is discovered
                if next.is_final() {
                    let path = reconstruct(&predecessors, self.initial, next);
                    log::info!("{NAME}: solved in {} moves", path.move_count());
                    return Report::solved(path, stats);
                }
                queue.push_back(next);
            }
        }

        let path = reconstruct(&predecessors, self.initial, last_expanded);
        Report::exhausted(path, stats)
    }
}

impl Strategy for Bfs {
    fn name(&self) -> &'static str {
        NAME
    }

    fn start(&mut self) {
        log::debug!("{NAME}: starting from {}", self.initial);
        self.report = settle_without_search(NAME, self.initial).unwrap_or_else(|| self.search());
    }

    fn report(&self) -> &Report {
        &self.report
    }
}
