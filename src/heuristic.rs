//! Distance estimates from a state to the nearest final state.
//!
//! All heuristics return a value in `[min_value, max_value]`, lower is better.
//! The bounds are fixed sentinels:
//! local search uses `min_value` to stop early and best-first search uses
//! `max_value` as the initial "no solution yet" cost.

use serde::{Deserialize, Serialize};

use crate::state::State;

/// Lower bound shared by all heuristics.
pub const MIN_HEURISTIC: f64 = 0.0;

/// Upper bound shared by all heuristics; evaluations are clamped to it.
pub const MAX_HEURISTIC: f64 = 1e9;

/// Estimates how far a state is from a final state.
pub trait Heuristic {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Estimated distance from `state` to a final state.
    fn evaluate(&self, state: &State) -> f64;

    fn min_value(&self) -> f64 {
        MIN_HEURISTIC
    }

    fn max_value(&self) -> f64 {
        MAX_HEURISTIC
    }
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn evaluate(&self, state: &State) -> f64 {
        (**self).evaluate(state)
    }

    fn min_value(&self) -> f64 {
        (**self).min_value()
    }

    fn max_value(&self) -> f64 {
        (**self).max_value()
    }
}

fn bounded(value: u64) -> f64 {
    (value as f64).min(MAX_HEURISTIC)
}

/// One-step lookahead: 0 at a final state, 1 if a single fill, empty or pour
/// could plausibly reach the target, 2 otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lookahead;

impl Heuristic for Lookahead {
    fn name(&self) -> &'static str {
        "lookahead"
    }

    fn evaluate(&self, state: &State) -> f64 {
        let (c0, c1) = (state.capacity0(), state.capacity1());
        let (n, m, k) = (state.n(), state.m(), state.k());

        if k == c0 || k == c1 {
            return 0.0;
        }
        // a single empty or fill
        if k == 0 || k == n || k == m {
            return 1.0;
        }
        // pour arithmetic below divides by both capacities
        if n == 0 || m == 0 {
            return 1.0;
        }
        let sum = c0.saturating_add(c1);
        if sum == k || sum % n == k || sum % m == k {
            return 1.0;
        }
        2.0
    }
}

/// Distance of the closer container level to the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsoluteDifference;

impl Heuristic for AbsoluteDifference {
    fn name(&self) -> &'static str {
        "absolute-difference"
    }

    fn evaluate(&self, state: &State) -> f64 {
        let k = state.k();
        bounded(state.capacity0().abs_diff(k).min(state.capacity1().abs_diff(k)))
    }
}

/// Distance of the total water volume to the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumDifference;

impl Heuristic for SumDifference {
    fn name(&self) -> &'static str {
        "sum-difference"
    }

    fn evaluate(&self, state: &State) -> f64 {
        bounded(state.capacity0().saturating_add(state.capacity1()).abs_diff(state.k()))
    }
}

/// Selects one of the built-in heuristics at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    #[default]
    Lookahead,
    AbsoluteDifference,
    SumDifference,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [
        HeuristicKind::Lookahead,
        HeuristicKind::AbsoluteDifference,
        HeuristicKind::SumDifference,
    ];
}

impl Heuristic for HeuristicKind {
    fn name(&self) -> &'static str {
        match self {
            HeuristicKind::Lookahead => Lookahead.name(),
            HeuristicKind::AbsoluteDifference => AbsoluteDifference.name(),
            HeuristicKind::SumDifference => SumDifference.name(),
        }
    }

    fn evaluate(&self, state: &State) -> f64 {
        match self {
            HeuristicKind::Lookahead => Lookahead.evaluate(state),
            HeuristicKind::AbsoluteDifference => AbsoluteDifference.evaluate(state),
            HeuristicKind::SumDifference => SumDifference.evaluate(state),
        }
    }
}
