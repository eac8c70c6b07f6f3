//! Search paths: the ordered `(move, state)` sequence a strategy reports.
//!
//! The first step always pairs [`Move::SENTINEL`] with the initial state; each
//! later step holds the move applied and the state it produced.

use serde::Serialize;

use crate::error::Result;
use crate::state::{Move, State};

/// One entry of a search path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Step {
    #[serde(rename = "move")]
    pub mv: Move,
    pub state: State,
}

/// A sentinel-led sequence of steps starting at the initial state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchPath {
    steps: Vec<Step>,
}

impl SearchPath {
    /// A path holding only the sentinel step.
    pub fn new(initial: State) -> Self {
        Self {
            steps: vec![Step {
                mv: Move::SENTINEL,
                state: initial,
            }],
        }
    }

    /// Builds a path by applying `moves` to `initial` in order.
    ///
    /// Moves are applied unchecked; use [`SearchPath::try_from_moves`] to
    /// reject no-op moves.
    pub fn from_moves(initial: State, moves: impl IntoIterator<Item = Move>) -> Self {
        let mut path = Self::new(initial);
        for mv in moves {
            path.push(mv);
        }
        path
    }

    /// Builds a path from `moves`, failing on the first move that would leave
    /// the state unchanged.
    pub fn try_from_moves(initial: State, moves: impl IntoIterator<Item = Move>) -> Result<Self> {
        let mut path = Self::new(initial);
        for mv in moves {
            let next = path.last_state().try_execute_move(mv)?;
            path.steps.push(Step { mv, state: next });
        }
        Ok(path)
    }

    /// Applies `mv` to the last state and appends the result.
    pub fn push(&mut self, mv: Move) {
        let state = self.last_state().execute_move(mv);
        self.steps.push(Step { mv, state });
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The applied moves, without the sentinel.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.steps[1..].iter().map(|step| step.mv)
    }

    /// The visited states, initial state included.
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.steps.iter().map(|step| step.state)
    }

    /// Number of applied moves.
    pub fn move_count(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn initial_state(&self) -> State {
        self.steps[0].state
    }

    pub fn last_state(&self) -> State {
        self.steps[self.steps.len() - 1].state
    }

    /// True if replaying the moves from the initial state reproduces every
    /// recorded state and each move actually changes its state.
    pub fn is_consistent(&self) -> bool {
        self.steps[0].mv == Move::SENTINEL
            && self.steps.windows(2).all(|pair| {
                let (before, after) = (pair[0].state, pair[1]);
                before.move_is_valid(after.mv) && before.execute_move(after.mv) == after.state
            })
    }
}

/// Formats a path as a table of moves and container levels.
///
/// ```text
/// step  move       jug 0  jug 1
///    0  start          0      0
///    1  fill 0         5      0
/// ```
pub fn format_path(path: &SearchPath) -> String {
    let mut output = format!("{:>4}  {:<10}{:>6}{:>7}\n", "step", "move", "jug 0", "jug 1");
    for (index, step) in path.steps().iter().enumerate() {
        let label = if index == 0 {
            "start".to_string()
        } else {
            step.mv.to_string()
        };
        output.push_str(&format!(
            "{:>4}  {:<10}{:>6}{:>7}\n",
            index,
            label,
            step.state.capacity0(),
            step.state.capacity1()
        ));
    }
    output
}
