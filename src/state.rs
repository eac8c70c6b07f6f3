//! Container states, moves and the transition rules between them.
//!
//! A [`State`] is an immutable snapshot of both fill levels together with the
//! problem parameters `(n, m, k)`. Every transition returns a new state, so
//! states can be used directly as keys in visited sets and predecessor maps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the two containers.
///
/// Serialized as its index (`0` or `1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "usize", try_from = "usize")]
pub enum Container {
    /// Container 0, with capacity `n`.
    First,
    /// Container 1, with capacity `m`.
    Second,
}

impl Container {
    /// Both containers in index order.
    pub const BOTH: [Container; 2] = [Container::First, Container::Second];

    /// Returns the container index (0 or 1).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Container::First => 0,
            Container::Second => 1,
        }
    }

    /// Returns the other container.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Container::First => Container::Second,
            Container::Second => Container::First,
        }
    }
}

impl TryFrom<usize> for Container {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Container::First),
            1 => Ok(Container::Second),
            other => Err(Error::InvalidContainer(other)),
        }
    }
}

impl From<Container> for usize {
    fn from(container: Container) -> usize {
        container.index()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// The three operations that can be applied to a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Fill the container to its capacity.
    Fill,
    /// Pour the container out completely.
    Empty,
    /// Pour from the container into the other one until the source is empty
    /// or the destination is full.
    Pour,
}

/// An operation applied to one container.
///
/// For [`MoveKind::Pour`] the container is the source; the other container
/// receives the water.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveKind,
    pub container: Container,
}

impl Move {
    /// Placeholder paired with the initial state at the head of a search path.
    pub const SENTINEL: Move = Move::new(MoveKind::Empty, Container::First);

    /// Every move, in the order strategies try them at each state.
    pub const ALL: [Move; 6] = [
        Move::new(MoveKind::Empty, Container::First),
        Move::new(MoveKind::Empty, Container::Second),
        Move::new(MoveKind::Fill, Container::First),
        Move::new(MoveKind::Fill, Container::Second),
        Move::new(MoveKind::Pour, Container::First),
        Move::new(MoveKind::Pour, Container::Second),
    ];

    pub const fn new(kind: MoveKind, container: Container) -> Self {
        Self { kind, container }
    }

    pub const fn fill(container: Container) -> Self {
        Self::new(MoveKind::Fill, container)
    }

    pub const fn empty(container: Container) -> Self {
        Self::new(MoveKind::Empty, container)
    }

    pub const fn pour(container: Container) -> Self {
        Self::new(MoveKind::Pour, container)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Fill => write!(f, "fill {}", self.container),
            MoveKind::Empty => write!(f, "empty {}", self.container),
            MoveKind::Pour => write!(f, "pour {}->{}", self.container, self.container.other()),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    /// Parses `fill0`, `empty 1`, `pour(0)` or the display form `pour 0->1`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMove(s.to_string());

        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
            .collect::<String>()
            .to_ascii_lowercase();
        let digits_at = cleaned
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (name, rest) = cleaned.split_at(digits_at);

        let kind = match name {
            "fill" => MoveKind::Fill,
            "empty" => MoveKind::Empty,
            "pour" => MoveKind::Pour,
            _ => return Err(invalid()),
        };
        let container = match (kind, rest) {
            (_, "0") | (MoveKind::Pour, "0->1") => Container::First,
            (_, "1") | (MoveKind::Pour, "1->0") => Container::Second,
            _ => return Err(invalid()),
        };

        Ok(Move::new(kind, container))
    }
}

/// Fill levels of both containers plus the fixed problem parameters.
///
/// Two states are equal only if all five fields match, so states belonging to
/// different `(n, m, k)` problems never collide in a shared map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct State {
    capacity0: u64,
    capacity1: u64,
    n: u64,
    m: u64,
    k: u64,
}

impl State {
    /// Creates a state with the given fill levels.
    ///
    /// Fails if either level exceeds its container's capacity.
    pub fn new(capacity0: u64, capacity1: u64, n: u64, m: u64, k: u64) -> Result<Self> {
        for (container, level, capacity) in [(0, capacity0, n), (1, capacity1, m)] {
            if level > capacity {
                return Err(Error::LevelExceedsCapacity {
                    container,
                    level,
                    capacity,
                });
            }
        }
        Ok(Self {
            capacity0,
            capacity1,
            n,
            m,
            k,
        })
    }

    /// Both containers empty.
    pub const fn initial(n: u64, m: u64, k: u64) -> Self {
        Self {
            capacity0: 0,
            capacity1: 0,
            n,
            m,
            k,
        }
    }

    /// Current level of container 0.
    #[inline]
    pub const fn capacity0(&self) -> u64 {
        self.capacity0
    }

    /// Current level of container 1.
    #[inline]
    pub const fn capacity1(&self) -> u64 {
        self.capacity1
    }

    /// Capacity of container 0.
    #[inline]
    pub const fn n(&self) -> u64 {
        self.n
    }

    /// Capacity of container 1.
    #[inline]
    pub const fn m(&self) -> u64 {
        self.m
    }

    /// Target quantity.
    #[inline]
    pub const fn k(&self) -> u64 {
        self.k
    }

    #[inline]
    pub const fn level(&self, container: Container) -> u64 {
        match container {
            Container::First => self.capacity0,
            Container::Second => self.capacity1,
        }
    }

    #[inline]
    pub const fn capacity(&self, container: Container) -> u64 {
        match container {
            Container::First => self.n,
            Container::Second => self.m,
        }
    }

    /// True if either container holds exactly `k` units.
    #[inline]
    pub const fn is_final(&self) -> bool {
        self.capacity0 == self.k || self.capacity1 == self.k
    }

    fn with_level(self, container: Container, level: u64) -> Self {
        debug_assert!(level <= self.capacity(container));
        match container {
            Container::First => Self {
                capacity0: level,
                ..self
            },
            Container::Second => Self {
                capacity1: level,
                ..self
            },
        }
    }

    /// Fills `container` to its capacity.
    pub fn fill(self, container: Container) -> Self {
        self.with_level(container, self.capacity(container))
    }

    /// Empties `container`.
    pub fn empty(self, container: Container) -> Self {
        self.with_level(container, 0)
    }

    /// Units that pouring from `source` would move into the other container.
    #[inline]
    pub fn transferable(&self, source: Container) -> u64 {
        let destination = source.other();
        self.level(source)
            .min(self.capacity(destination) - self.level(destination))
    }

    /// Pours from `source` into the other container, updating both levels.
    pub fn pour(self, source: Container) -> Self {
        let amount = self.transferable(source);
        let destination = source.other();
        self.with_level(source, self.level(source) - amount)
            .with_level(destination, self.level(destination) + amount)
    }

    /// Applies `mv` and returns the resulting state.
    pub fn execute_move(self, mv: Move) -> Self {
        match mv.kind {
            MoveKind::Fill => self.fill(mv.container),
            MoveKind::Empty => self.empty(mv.container),
            MoveKind::Pour => self.pour(mv.container),
        }
    }

    /// True iff applying `mv` would change the state.
    ///
    /// Filling a full container, emptying an empty one, or pouring when
    /// nothing can be transferred are no-ops and therefore invalid.
    pub fn move_is_valid(&self, mv: Move) -> bool {
        let container = mv.container;
        match mv.kind {
            MoveKind::Fill => self.level(container) != self.capacity(container),
            MoveKind::Empty => self.level(container) != 0,
            MoveKind::Pour => self.transferable(container) != 0,
        }
    }

    /// Applies `mv`, failing if it would leave the state unchanged.
    pub fn try_execute_move(self, mv: Move) -> Result<Self> {
        if self.move_is_valid(mv) {
            Ok(self.execute_move(mv))
        } else {
            Err(Error::IllegalMove {
                mv: mv.to_string(),
                state: self.to_string(),
            })
        }
    }

    /// Closed-form reachability check for the target `k`.
    ///
    /// The target is reachable iff it fits in the larger container and is a
    /// multiple of `gcd(n, m)`; with both capacities zero only `k == 0` is.
    pub fn has_solution(&self) -> bool {
        if self.k > self.n.max(self.m) {
            return false;
        }
        match gcd(self.n, self.m) {
            0 => self.k == 0,
            g => self.k % g == 0,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}/{}, {}/{}) target {}",
            self.capacity0, self.n, self.capacity1, self.m, self.k
        )
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b > 0 {
        (a, b) = (b, a % b);
    }
    a
}
