//! Depth-first backtracking with a global visited set.
//!
//! Runs on an explicit stack instead of recursion, so the depth is bounded
//! only by the visited-state cap. The move list mirrors the stack: a move is
//! appended when its child is entered and removed when the search backs out
//! of that child. When the search stops, the moves still on the list are the
//! answer (or, on exhaustion, the branch being explored).

use rustc_hash::FxHashSet;

use crate::config::SearchConfig;
use crate::path::SearchPath;
use crate::state::{Move, State};

use super::{settle_without_search, Report, SearchStats, Strategy};

pub(crate) const NAME: &str = "backtracking";

/// A state on the current branch and the index of the next move to try.
struct Frame {
    state: State,
    next_move: usize,
}

pub struct Backtracking {
    initial: State,
    moves: Vec<Move>,
    max_visited_states: usize,
    report: Report,
}

impl Backtracking {
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
        let mut visited = FxHashSet::default();
        visited.insert(self.initial);

        let mut stack = vec![Frame {
            state: self.initial,
            next_move: 0,
        }];
        let mut branch: Vec<Move> = Vec::new();

        while let Some(frame) = stack.last_mut() {
            if frame.state.is_final() {
                let path = SearchPath::from_moves(self.initial, branch);
                log::info!("{NAME}: solved in {} moves", path.move_count());
                return Report::solved(path, stats);
            }
            if visited.len() > self.max_visited_states {
                log::debug!(
                    "{NAME}: visited more than {} states, giving up",
                    self.max_visited_states
                );
                return Report::exhausted(SearchPath::from_moves(self.initial, branch), stats);
            }
            if frame.next_move == 0 {
                stats.expanded += 1;
            }

            // advance to the next valid move leading to an unvisited state
            let state = frame.state;
            let mut child = None;
            while let Some(&mv) = self.moves.get(frame.next_move) {
                frame.next_move += 1;
                if !state.move_is_valid(mv) {
                    continue;
                }
                let next = state.execute_move(mv);
                if visited.insert(next) {
                    child = Some((mv, next));
                    break;
                }
            }

            match child {
                Some((mv, next)) => {
                    branch.push(mv);
                    stack.push(Frame {
                        state: next,
                        next_move: 0,
                    });
                }
                None => {
                    // every move tried: undo the move that led here
                    stack.pop();
                    branch.pop();
                }
            }
        }

        log::debug!("{NAME}: explored all {} reachable states", visited.len());
        Report::exhausted(SearchPath::new(self.initial), stats)
    }
}

impl Strategy for Backtracking {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Container;
    use crate::strategy::SearchStatus;

    fn run(initial: State, config: &SearchConfig) -> Backtracking {
        let mut strategy = Backtracking::new(initial, config);
        strategy.start();
        strategy
    }

    #[test]
    fn test_solves_5_3_4() {
        let strategy = run(State::initial(5, 3, 4), &SearchConfig::default());
        assert_eq!(strategy.status(), SearchStatus::Solved);
        let path = strategy.solution_path();
        assert!(path.last_state().is_final(), "ended at {}", path.last_state());
        assert!(path.is_consistent());
    }

    #[test]
    fn test_branch_never_revisits_a_state() {
        let strategy = run(State::initial(7, 5, 4), &SearchConfig::default());
        assert_eq!(strategy.status(), SearchStatus::Solved);
        let states: Vec<State> = strategy.solution_path().states().collect();
        let unique: FxHashSet<State> = states.iter().copied().collect();
        assert_eq!(unique.len(), states.len(), "path repeats a state");
    }

    #[test]
    fn test_follows_move_order() {
        // empties are invalid at the start, so the first move is fill 0
        let strategy = run(State::initial(4, 3, 1), &SearchConfig::default());
        assert_eq!(strategy.status(), SearchStatus::Solved);
        assert_eq!(
            strategy.solution_path().moves().next(),
            Some(Move::fill(Container::First))
        );
    }

    #[test]
    fn test_unsolvable_is_reported_without_search() {
        let strategy = run(State::initial(6, 8, 3), &SearchConfig::default());
        assert_eq!(strategy.status(), SearchStatus::Unsolvable);
        assert_eq!(strategy.stats().expanded, 0);
    }

    #[test]
    fn test_visited_cap_keeps_current_branch() {
        let config = SearchConfig::default().with_max_visited_states(2);
        let strategy = run(State::initial(5, 3, 4), &config);
        assert_eq!(strategy.status(), SearchStatus::Exhausted);
        let path = strategy.solution_path();
        assert!(path.is_consistent());
        assert!(path.move_count() > 0, "branch should hold the explored moves");
    }

    #[test]
    fn test_whole_graph_exhausted_without_target() {
        let config = SearchConfig::default()
            .with_moves([Move::fill(Container::First), Move::empty(Container::First)]);
        let strategy = run(State::initial(5, 3, 3), &config);
        assert_eq!(strategy.status(), SearchStatus::Exhausted);
        assert_eq!(strategy.solution_path().move_count(), 0);
        assert_eq!(strategy.stats().expanded, 2);
    }
}
