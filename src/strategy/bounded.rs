//! Depth-bounded backtracking without memoization.
//!
//! Tries every sequence of at most `max_moves` valid moves in the configured
//! order. Nothing is remembered between branches, so the same state may be
//! explored many times; the move budget is what keeps the work finite.

use crate::config::SearchConfig;
use crate::path::SearchPath;
use crate::state::{Move, State};

use super::{settle_without_search, Report, SearchStats, Strategy};

pub(crate) const NAME: &str = "bounded backtracking";

struct Frame {
    state: State,
    next_move: usize,
}

pub struct BoundedBacktracking {
    initial: State,
    moves: Vec<Move>,
    max_moves: usize,
    report: Report,
}

impl BoundedBacktracking {
    pub fn new(initial: State, config: &SearchConfig) -> Self {
        Self {
            initial,
            moves: config.moves.clone(),
            max_moves: config.max_moves,
            report: Report::not_started(initial),
        }
    }

    fn search(&self) -> Report {
        let mut stats = SearchStats::default();
        // slots[i] holds the move leading from stack[i] to stack[i + 1]
        let mut slots = vec![Move::SENTINEL; self.max_moves];
        let mut stack = vec![Frame {
            state: self.initial,
            next_move: 0,
        }];
        // first branch to reach the greatest depth, reported on exhaustion
        let mut deepest: Vec<Move> = Vec::new();

        while let Some(position) = stack.len().checked_sub(1) {
            let frame = &mut stack[position];
            if frame.state.is_final() {
                slots.truncate(position);
                let path = SearchPath::from_moves(self.initial, slots);
                log::info!("{NAME}: solved in {} moves", path.move_count());
                return Report::solved(path, stats);
            }
            if position >= self.max_moves {
                stack.pop();
                continue;
            }
            if frame.next_move == 0 {
                stats.expanded += 1;
            }

            let state = frame.state;
            let mut chosen = None;
            while let Some(&mv) = self.moves.get(frame.next_move) {
                frame.next_move += 1;
                if state.move_is_valid(mv) {
                    chosen = Some(mv);
                    break;
                }
            }

            match chosen {
                Some(mv) => {
                    slots[position] = mv;
                    if position >= deepest.len() {
                        deepest = slots[..=position].to_vec();
                    }
                    stack.push(Frame {
                        state: state.execute_move(mv),
                        next_move: 0,
                    });
                }
                None => {
                    stack.pop();
                }
            }
        }

        log::debug!("{NAME}: no solution within {} moves", self.max_moves);
        Report::exhausted(SearchPath::from_moves(self.initial, deepest), stats)
    }
}

impl Strategy for BoundedBacktracking {
    fn name(&self) -> &'static str {
        NAME
    }

    fn start(&mut self) {
        log::debug!(
            "{NAME}: starting from {} with at most {} moves",
            self.initial,
            self.max_moves
        );
        self.report = settle_without_search(NAME, self.initial).unwrap_or_else(|| self.search());
    }

    fn report(&self) -> &Report {
        &self.report
    }
}
