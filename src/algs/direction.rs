//! Push/pull direction selection.
//!
//! Two policies decide the direction of every round:
//!
//! - [`DirectionPolicy::CostEstimate`] compares a per-round estimate of push
//!   work (`d · nq`) against pull work
//!   (`(n − nvisited) · min(d, n / (nvisited + 1)) · 3 (1 + log₂ nq)`), where
//!   `d` is the average degree and `nvisited` excludes the source.
//! - [`DirectionPolicy::Hysteresis`] switches push → pull when the frontier is
//!   growing and holds more than `1/alpha` of the still unexplored edges, and
//!   pull → push once the frontier shrinks to `n / beta2`. After the first
//!   pull phase edge tracking is abandoned and a second switch to pull only
//!   needs a growing frontier larger than `n / beta1`.
//!
//! Availability of the graph orientations overrides both.
//!
//! References: Yang, Buluç, Owens, *Implementing Push-Pull Efficiently in
//! GraphBLAS*, ICPP 2018; Beamer, Asanović, Patterson, *The GAP Benchmark
//! Suite*, 2015.

use serde::{Deserialize, Serialize};

use crate::algs::frontier::Frontier;
use crate::topology::adapter::{GraphAdapter, Orientation};
use crate::topology::adjacency::Adjacency;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Frontier vertices scan their out-edges.
    Push,
    /// Unvisited vertices scan their in-edges.
    Pull,
}

/// Thresholds of the hysteresis policy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HysteresisConfig {
    /// Push → pull when frontier edges exceed `unexplored / alpha`.
    pub alpha: f64,
    /// Re-entering pull requires a frontier above `n / beta1`.
    pub beta1: f64,
    /// Pull → push once the frontier drops to `n / beta2`.
    pub beta2: f64,
}

impl Default for HysteresisConfig {
    fn default() -> Self {
        Self {
            alpha: 8.0,
            beta1: 8.0,
            beta2: 512.0,
        }
    }
}

/// How the engine picks a direction each round.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionPolicy {
    /// Stateless per-round work estimate.
    CostEstimate,
    /// Edge-count thresholds with hysteresis.
    Hysteresis(HysteresisConfig),
    /// Always push (needs the forward graph).
    PushOnly,
    /// Always pull (needs the transpose).
    PullOnly,
}

impl Default for DirectionPolicy {
    fn default() -> Self {
        DirectionPolicy::Hysteresis(HysteresisConfig::default())
    }
}

/// Running counters, updated once per round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Size of the current frontier.
    pub frontier: usize,
    /// Size of the frontier one round earlier.
    pub last_frontier: usize,
    /// Vertices visited so far, the source included.
    pub visited: usize,
}

impl TraversalStats {
    /// Statistics before the first round: the source alone.
    pub fn seeded() -> Self {
        Self {
            frontier: 1,
            last_frontier: 0,
            visited: 1,
        }
    }

    /// Roll forward after a round produced `frontier` new vertices.
    pub fn advance(&mut self, frontier: usize, newly_visited: usize) {
        self.last_frontier = self.frontier;
        self.frontier = frontier;
        self.visited += newly_visited;
    }

    #[inline]
    pub fn growing(&self) -> bool {
        self.frontier > self.last_frontier
    }

    #[inline]
    pub fn shrinking(&self) -> bool {
        self.frontier < self.last_frontier
    }
}

/// Per-traversal direction state machine.
#[derive(Clone, Debug)]
pub struct DirectionSelector {
    policy: DirectionPolicy,
    orientation: Orientation,
    n: usize,
    avg_degree: f64,
    do_push: bool,
    /// False once switching is disabled for the rest of the run.
    switching: bool,
    edges_unexplored: usize,
    any_pull: bool,
}

impl DirectionSelector {
    pub fn new<G: Adjacency>(policy: DirectionPolicy, graph: &GraphAdapter<'_, G>) -> Self {
        let orientation = graph.orientation();
        match (policy, orientation) {
            (DirectionPolicy::PullOnly, Orientation::ForwardOnly) => {
                log::warn!("pull-only requested without a transpose; traversal will push")
            }
            (DirectionPolicy::PushOnly, Orientation::TransposeOnly) => {
                log::warn!("push-only requested without a forward graph; traversal will pull")
            }
            _ => {}
        }
        Self {
            policy,
            orientation,
            n: graph.vertex_count(),
            avg_degree: graph.average_degree(),
            do_push: orientation.can_push(),
            switching: orientation == Orientation::Both,
            edges_unexplored: graph.edge_count(),
            any_pull: false,
        }
    }

    /// True once at least one pull round has been chosen.
    pub fn any_pull(&self) -> bool {
        self.any_pull
    }

    /// Direction for the round that expands `frontier`.
    pub fn select<G: Adjacency>(
        &mut self,
        frontier: &Frontier,
        stats: &TraversalStats,
        graph: &GraphAdapter<'_, G>,
    ) -> Direction {
        let direction = match self.orientation {
            Orientation::ForwardOnly => Direction::Push,
            Orientation::TransposeOnly => Direction::Pull,
            Orientation::Both => match self.policy {
                DirectionPolicy::PushOnly => Direction::Push,
                DirectionPolicy::PullOnly => Direction::Pull,
                DirectionPolicy::CostEstimate => self.cost_estimate(stats),
                DirectionPolicy::Hysteresis(cfg) => self.hysteresis(&cfg, frontier, stats, graph),
            },
        };
        self.any_pull |= direction == Direction::Pull;
        direction
    }

    fn cost_estimate(&self, stats: &TraversalStats) -> Direction {
        let n = self.n as f64;
        let nq = stats.frontier as f64;
        let nvisited = stats.visited.saturating_sub(1) as f64;
        let d = self.avg_degree;

        let push_work = d * nq;
        let expected = n / (nvisited + 1.0);
        let per_dot = d.min(expected);
        let binary_search = 3.0 * (1.0 + nq.log2());
        let pull_work = (n - nvisited) * per_dot * binary_search;

        if push_work < pull_work {
            Direction::Push
        } else {
            Direction::Pull
        }
    }

    fn hysteresis<G: Adjacency>(
        &mut self,
        cfg: &HysteresisConfig,
        frontier: &Frontier,
        stats: &TraversalStats,
        graph: &GraphAdapter<'_, G>,
    ) -> Direction {
        if !self.switching {
            return Direction::Push;
        }
        let nq = stats.frontier;
        if self.do_push {
            let growing = stats.growing();
            let switch_to_pull = if self.edges_unexplored < self.n {
                // very little of the graph is left
                log::trace!("{} unexplored edges left, pull disabled", self.edges_unexplored);
                self.switching = false;
                false
            } else if self.any_pull {
                growing && (nq as f64) > self.n as f64 / cfg.beta1
            } else {
                let edges_in_frontier =
                    frontier.par_sum_by(|v| graph.out_degree(v).unwrap_or(0));
                self.edges_unexplored = self.edges_unexplored.saturating_sub(edges_in_frontier);
                growing && (edges_in_frontier as f64) > self.edges_unexplored as f64 / cfg.alpha
            };
            if switch_to_pull {
                log::trace!("switching push -> pull at frontier size {nq}");
                self.do_push = false;
            }
        } else if stats.shrinking() && (nq as f64) <= self.n as f64 / cfg.beta2 {
            log::trace!("switching pull -> push at frontier size {nq}");
            self.do_push = true;
        }
        if self.do_push {
            Direction::Push
        } else {
            Direction::Pull
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::frontier::SparseFrontier;
    use crate::topology::csr::CsrGraph;

    fn complete(n: usize) -> CsrGraph {
        let edges = (0..n).flat_map(|u| (0..n).filter(move |&v| v != u).map(move |v| (u, v)));
        CsrGraph::square(n, edges).unwrap()
    }

    fn frontier_of(vs: impl IntoIterator<Item = usize>) -> Frontier {
        Frontier::Sparse(SparseFrontier::from_entries(
            vs.into_iter().map(|v| (v, 0)).collect(),
        ))
    }

    #[test]
    fn availability_overrides_policy() {
        let a = complete(4);
        let at = a.transpose();
        let fwd = GraphAdapter::new(Some(&a), None).unwrap();
        let mut sel = DirectionSelector::new(DirectionPolicy::PullOnly, &fwd);
        assert_eq!(
            sel.select(&Frontier::seed(0), &TraversalStats::seeded(), &fwd),
            Direction::Push
        );

        let rev = GraphAdapter::new(None, Some(&at)).unwrap();
        let mut sel = DirectionSelector::new(DirectionPolicy::PushOnly, &rev);
        assert_eq!(
            sel.select(&Frontier::seed(0), &TraversalStats::seeded(), &rev),
            Direction::Pull
        );
        assert!(sel.any_pull());
    }

    #[test]
    fn cost_estimate_pushes_from_a_single_vertex() {
        let a = complete(64);
        let at = a.transpose();
        let view = GraphAdapter::new(Some(&a), Some(&at)).unwrap();
        let mut sel = DirectionSelector::new(DirectionPolicy::CostEstimate, &view);
        assert_eq!(
            sel.select(&Frontier::seed(0), &TraversalStats::seeded(), &view),
            Direction::Push
        );
    }

    #[test]
    fn cost_estimate_pulls_for_a_huge_frontier() {
        let a = complete(64);
        let at = a.transpose();
        let view = GraphAdapter::new(Some(&a), Some(&at)).unwrap();
        let mut sel = DirectionSelector::new(DirectionPolicy::CostEstimate, &view);
        // 40 of 64 vertices in the frontier, 41 visited:
        // push = 63 * 40 = 2520, pull = 24 * min(63, 64/41) * 3 (1 + log2 40) ≈ 716
        let stats = TraversalStats {
            frontier: 40,
            last_frontier: 1,
            visited: 41,
        };
        assert_eq!(sel.select(&frontier_of(1..41), &stats, &view), Direction::Pull);
    }

    #[test]
    fn hysteresis_switches_to_pull_and_back() {
        // n = 1024 so that n / beta2 = 2
        let n = 1024;
        let edges = (1..n).flat_map(|v| [(0, v), (v, 0)]);
        let a = CsrGraph::square(n, edges).unwrap();
        let at = a.transpose();
        let view = GraphAdapter::new(Some(&a), Some(&at)).unwrap();
        let mut sel = DirectionSelector::new(DirectionPolicy::default(), &view);

        // round 1: the hub alone carries 1023 of 2046 edges, growing from 0 → 1
        let mut stats = TraversalStats::seeded();
        assert_eq!(sel.select(&Frontier::seed(0), &stats, &view), Direction::Pull);

        // frontier grows to 1023: stay in pull
        stats.advance(n - 1, n - 1);
        assert_eq!(sel.select(&frontier_of(1..n), &stats, &view), Direction::Pull);

        // frontier collapses to 2 <= n / beta2: back to push
        stats.advance(2, 0);
        assert_eq!(sel.select(&frontier_of([1, 2]), &stats, &view), Direction::Push);
        assert!(sel.any_pull());
    }

    /// Hub 0 linked both ways to every leaf, plus a ring over the leaves,
    /// so unexplored edges stay above `n` after the first switch.
    fn hub_and_ring(n: usize) -> CsrGraph {
        let edges = (1..n).flat_map(|v| [(0, v), (v, 0), (v, v % (n - 1) + 1)]);
        CsrGraph::square(n, edges).unwrap()
    }

    /// Drive push -> pull -> push and leave the selector pushing with a
    /// frontier of one vertex.
    fn after_one_pull<G: Adjacency>(
        view: &GraphAdapter<'_, G>,
    ) -> (DirectionSelector, TraversalStats) {
        let n = view.vertex_count();
        let mut sel = DirectionSelector::new(DirectionPolicy::default(), view);
        let mut stats = TraversalStats::seeded();
        // 1023 hub edges > (3069 - 1023) / alpha
        assert_eq!(sel.select(&Frontier::seed(0), &stats, view), Direction::Pull);
        stats.advance(n - 1, n - 1);
        assert_eq!(sel.select(&frontier_of(1..n), &stats, view), Direction::Pull);
        stats.advance(2, 0);
        assert_eq!(sel.select(&frontier_of([1, 2]), &stats, view), Direction::Push);
        stats.advance(1, 0);
        assert_eq!(sel.select(&frontier_of([1]), &stats, view), Direction::Push);
        (sel, stats)
    }

    #[test]
    fn hysteresis_pulls_again_above_n_over_beta1() {
        let n = 1024;
        let a = hub_and_ring(n);
        let at = a.transpose();
        let view = GraphAdapter::new(Some(&a), Some(&at)).unwrap();
        let (mut sel, mut stats) = after_one_pull(&view);

        // growing to 129 > n / beta1 = 128
        stats.advance(129, 0);
        assert_eq!(sel.select(&frontier_of(1..130), &stats, &view), Direction::Pull);
    }

    #[test]
    fn hysteresis_keeps_pushing_at_n_over_beta1() {
        let n = 1024;
        let a = hub_and_ring(n);
        let at = a.transpose();
        let view = GraphAdapter::new(Some(&a), Some(&at)).unwrap();
        let (mut sel, mut stats) = after_one_pull(&view);

        // growing, but 128 is not above n / beta1
        stats.advance(128, 0);
        assert_eq!(sel.select(&frontier_of(1..129), &stats, &view), Direction::Push);
    }

    #[test]
    fn hysteresis_disables_pull_when_few_edges_remain() {
        // a path has n - 1 < n edges: pull is never chosen
        let n = 16;
        let a = CsrGraph::square(n, (0..n - 1).map(|v| (v, v + 1))).unwrap();
        let at = a.transpose();
        let view = GraphAdapter::new(Some(&a), Some(&at)).unwrap();
        let mut sel = DirectionSelector::new(DirectionPolicy::default(), &view);
        let mut stats = TraversalStats::seeded();
        for v in 0..n - 1 {
            assert_eq!(sel.select(&frontier_of([v]), &stats, &view), Direction::Push);
            stats.advance(1, 1);
        }
        assert!(!sel.any_pull());
    }

    #[test]
    fn hysteresis_config_round_trips_through_json() {
        let policy = DirectionPolicy::Hysteresis(HysteresisConfig {
            alpha: 14.0,
            ..Default::default()
        });
        let json = serde_json::to_string(&policy).unwrap();
        let back: DirectionPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);

        let partial: HysteresisConfig = serde_json::from_str(r#"{"beta2": 256.0}"#).unwrap();
        assert_eq!(partial.alpha, 8.0);
        assert_eq!(partial.beta2, 256.0);
    }
}
