//! Heuristic best-first search (A*).
//!
//! Nodes are expanded in order of `f = g + h`, where `g` is the number of
//! moves from the initial state and `h` the heuristic estimate. The first
//! final state popped becomes the candidate answer; the search keeps going
//! while cheaper nodes remain, so the result is optimal whenever the
//! heuristic is admissible and consistent.
//!
//! The priority queue has no decrease-key. When a shorter route to a pending
//! state is found, a new entry is pushed and the outdated one is skipped when
//! it surfaces.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::SearchConfig;
use crate::heuristic::{Heuristic, HeuristicKind};
use crate::state::{Move, State};

use super::{reconstruct, settle_without_search, Predecessors, Report, SearchStats, Strategy};

pub(crate) const NAME: &str = "best-first search";

/// A queued state with its estimated total cost.
#[derive(Clone, Copy, Debug)]
struct Node {
    cost: f64,
    distance: usize,
    state: State,
}

impl Eq for Node {}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Ord for Node {
    // reversed: BinaryHeap is a max-heap and the cheapest node must surface first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.distance.cmp(&self.distance))
    }
}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bookkeeping left behind by one run of the search loop.
struct Exploration {
    distances: FxHashMap<State, usize>,
    predecessors: Predecessors,
    best_final: Option<(State, f64)>,
    last_expanded: State,
    /// Queue entries dropped on pop because a shorter route had replaced them
    /// or their state was already explored.
    skipped: usize,
    stats: SearchStats,
}

pub struct BestFirst<H = HeuristicKind> {
    initial: State,
    heuristic: H,
    moves: Vec<Move>,
    max_visited_states: usize,
    report: Report,
}

impl BestFirst {
    /// Uses the heuristic selected in `config`.
    pub fn new(initial: State, config: &SearchConfig) -> Self {
        Self::with_heuristic(initial, config.heuristic, config)
    }
}

impl<H: Heuristic> BestFirst<H> {
    pub fn with_heuristic(initial: State, heuristic: H, config: &SearchConfig) -> Self {
        Self {
            initial,
            heuristic,
            moves: config.moves.clone(),
            max_visited_states: config.max_visited_states,
            report: Report::not_started(initial),
        }
    }

    fn search(&self) -> Report {
        let exploration = self.explore();
        log::debug!(
            "{NAME}: reached {} states, skipped {} stale queue entries",
            exploration.distances.len(),
            exploration.skipped
        );

        match exploration.best_final {
            Some((target, cost)) => {
                let path = reconstruct(&exploration.predecessors, self.initial, target);
                log::info!(
                    "{NAME}: solved in {} moves (cost {cost})",
                    path.move_count()
                );
                Report::solved(path, exploration.stats)
            }
            None => {
                let path = reconstruct(
                    &exploration.predecessors,
                    self.initial,
                    exploration.last_expanded,
                );
                Report::exhausted(path, exploration.stats)
            }
        }
    }

    fn explore(&self) -> Exploration {
        let mut stats = SearchStats::default();
        let mut queue = BinaryHeap::new();
        let mut distances: FxHashMap<State, usize> = FxHashMap::default();
        let mut explored: FxHashSet<State> = FxHashSet::default();
        let mut predecessors = Predecessors::default();
        let mut skipped = 0;

        distances.insert(self.initial, 0);
        queue.push(Node {
            cost: self.heuristic.evaluate(&self.initial),
            distance: 0,
            state: self.initial,
        });

        let mut best_final: Option<(State, f64)> = None;
        let mut last_expanded = self.initial;

        while let Some(node) = queue.pop() {
            let outdated = distances
                .get(&node.state)
                .is_some_and(|&known| node.distance > known);
            if outdated || explored.contains(&node.state) {
                skipped += 1;
                continue;
            }
            if best_final.is_some_and(|(_, best)| node.cost > best) {
                break;
            }
            if explored.len() > self.max_visited_states {
                log::debug!(
                    "{NAME}: explored more than {} states, giving up",
                    self.max_visited_states
                );
                break;
            }
            explored.insert(node.state);

            if node.state.is_final() {
                // keep the first final state unless a strictly cheaper one shows up
                if best_final.map_or(true, |(_, best)| node.cost < best) {
                    best_final = Some((node.state, node.cost));
                }
                continue;
            }

            stats.expanded += 1;
            last_expanded = node.state;
            self.push_neighbors(node, &mut queue, &mut distances, &explored, &mut predecessors);
        }

        Exploration {
            distances,
            predecessors,
            best_final,
            last_expanded,
            skipped,
            stats,
        }
    }

    /// Queues every unexplored neighbor of `node` that is new or now reachable
    /// in fewer moves.
    fn push_neighbors(
        &self,
        node: Node,
        queue: &mut BinaryHeap<Node>,
        distances: &mut FxHashMap<State, usize>,
        explored: &FxHashSet<State>,
        predecessors: &mut Predecessors,
    ) {
        let distance = node.distance + 1;
        for &mv in &self.moves {
            if !node.state.move_is_valid(mv) {
                continue;
            }
            let next = node.state.execute_move(mv);
            if explored.contains(&next) {
                continue;
            }
            if distances.get(&next).is_some_and(|&known| known <= distance) {
                continue;
            }
            distances.insert(next, distance);
            predecessors.insert(next, (node.state, mv));
            queue.push(Node {
                cost: distance as f64 + self.heuristic.evaluate(&next),
                distance,
                state: next,
            });
        }
    }
}

impl<H: Heuristic> Strategy for BestFirst<H> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Container;
    use crate::strategy::SearchStatus;

    /// Uninformed estimate; turns the search into uniform-cost search.
    struct Blind;

    impl Heuristic for Blind {
        fn name(&self) -> &'static str {
            "blind"
        }

        fn evaluate(&self, _state: &State) -> f64 {
            0.0
        }
    }

    /// Overestimates (0, 3) only, so it is expanded after longer routes past
    /// it have been queued.
    struct Detour;

    impl Heuristic for Detour {
        fn name(&self) -> &'static str {
            "detour"
        }

        fn evaluate(&self, state: &State) -> f64 {
            if state.capacity0() == 0 && state.capacity1() == 3 {
                2.0
            } else {
                0.0
            }
        }
    }

    fn node(cost: f64, distance: usize) -> Node {
        Node {
            cost,
            distance,
            state: State::initial(5, 3, 4),
        }
    }

    #[test]
    fn test_queue_pops_cheapest_first() {
        let mut queue = BinaryHeap::new();
        for (cost, distance) in [(3.0, 1), (1.0, 1), (2.0, 2), (1.0, 0)] {
            queue.push(node(cost, distance));
        }
        let order: Vec<(f64, usize)> = std::iter::from_fn(|| queue.pop())
            .map(|n| (n.cost, n.distance))
            .collect();
        assert_eq!(order, vec![(1.0, 0), (1.0, 1), (2.0, 2), (3.0, 1)]);
    }

    #[test]
    fn test_solves_5_3_4() {
        let mut strategy = BestFirst::new(State::initial(5, 3, 4), &SearchConfig::default());
        strategy.start();
        assert_eq!(strategy.status(), SearchStatus::Solved);
        let path = strategy.solution_path();
        assert_eq!(path.move_count(), 6);
        assert!(path.last_state().is_final());
        assert!(path.is_consistent());
    }

    #[test]
    fn test_uniform_cost_matches_breadth_first_length() {
        let config = SearchConfig::default();
        for (n, m, k) in [(5, 3, 4), (4, 3, 1), (7, 5, 4), (9, 4, 6), (2, 3, 3)] {
            let initial = State::initial(n, m, k);
            let mut blind = BestFirst::with_heuristic(initial, Blind, &config);
            blind.start();
            let mut bfs = crate::strategy::Bfs::new(initial, &config);
            bfs.start();
            assert_eq!(
                blind.solution_path().move_count(),
                bfs.solution_path().move_count(),
                "({n}, {m}, {k})"
            );
        }
    }

    #[test]
    fn test_shorter_route_replaces_queued_entry() {
        // (3, 0) is queued at distance 3 via (3, 3), then again at distance 2
        // once the delayed (0, 3) is expanded
        let initial = State::new(0, 2, 4, 3, 1).unwrap();
        let delayed = State::new(0, 3, 4, 3, 1).unwrap();
        let relinked = State::new(3, 0, 4, 3, 1).unwrap();
        let search = BestFirst::with_heuristic(initial, Detour, &SearchConfig::default());

        let exploration = search.explore();
        assert_eq!(exploration.distances[&relinked], 2);
        assert_eq!(
            exploration.predecessors[&relinked],
            (delayed, Move::pour(Container::Second))
        );
        // the distance 3 entry surfaces after (3, 0) was explored
        assert_eq!(exploration.skipped, 1);
        assert_eq!(exploration.stats.expanded, 10);
    }

    #[test]
    fn test_longer_route_keeps_first_link() {
        // (4, 3), (3, 3) and (2, 3) all reach (0, 3) in 3 moves after it was
        // queued in 1
        let initial = State::new(0, 2, 4, 3, 1).unwrap();
        let delayed = State::new(0, 3, 4, 3, 1).unwrap();
        let search = BestFirst::with_heuristic(initial, Detour, &SearchConfig::default());

        let exploration = search.explore();
        assert_eq!(exploration.distances[&delayed], 1);
        assert_eq!(
            exploration.predecessors[&delayed],
            (initial, Move::fill(Container::Second))
        );
    }

    #[test]
    fn test_relinked_search_still_solves() {
        let initial = State::new(0, 2, 4, 3, 1).unwrap();
        let mut strategy = BestFirst::with_heuristic(initial, Detour, &SearchConfig::default());
        strategy.start();
        assert_eq!(strategy.status(), SearchStatus::Solved);
        let path = strategy.solution_path();
        assert_eq!(path.move_count(), 3);
        assert!(path.last_state().is_final());
        assert!(path.is_consistent());
        assert_eq!(strategy.stats().expanded, 10);
    }

    #[test]
    fn test_equal_cost_ties_prefer_shallower_nodes() {
        // popping the deeper of two equal-cost nodes first settles on a
        // 4-move route here
        let config = SearchConfig::default().with_heuristic(HeuristicKind::SumDifference);
        let mut strategy = BestFirst::new(State::initial(2, 6, 4), &config);
        strategy.start();
        assert_eq!(strategy.status(), SearchStatus::Solved);
        assert_eq!(strategy.solution_path().move_count(), 2);
    }

    #[test]
    fn test_every_heuristic_solves() {
        for heuristic in HeuristicKind::ALL {
            let config = SearchConfig::default().with_heuristic(heuristic);
            let mut strategy = BestFirst::new(State::initial(7, 5, 4), &config);
            strategy.start();
            assert_eq!(strategy.status(), SearchStatus::Solved, "{}", heuristic.name());
            assert!(strategy.solution_path().is_consistent());
        }
    }

    #[test]
    fn test_visited_cap_exhausts_search() {
        let config = SearchConfig::default().with_max_visited_states(1);
        let mut strategy = BestFirst::new(State::initial(5, 3, 4), &config);
        strategy.start();
        assert_eq!(strategy.status(), SearchStatus::Exhausted);
        let path = strategy.solution_path();
        assert!(path.is_consistent());
        assert!(!path.last_state().is_final());
    }

    #[test]
    fn test_unsolvable_is_reported_without_search() {
        let mut strategy = BestFirst::new(State::initial(6, 8, 3), &SearchConfig::default());
        strategy.start();
        assert_eq!(strategy.status(), SearchStatus::Unsolvable);
        assert_eq!(strategy.stats().expanded, 0);
        assert_eq!(
            strategy.solution_path().steps()[0].mv,
            Move::empty(Container::First)
        );
    }
}
