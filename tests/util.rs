#![allow(dead_code)]
use pushpull_bfs::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Directed star: 0 → i for i in 1..n.
pub fn star(n: usize) -> CsrGraph {
    CsrGraph::square(n, (1..n).map(|i| (0, i))).unwrap()
}

/// Directed path 0 → 1 → … → n-1.
pub fn path(n: usize) -> CsrGraph {
    CsrGraph::square(n, (0..n.saturating_sub(1)).map(|v| (v, v + 1))).unwrap()
}

/// Every vertex gets `degree` distinct random out-neighbors.
pub fn random_regular(n: usize, degree: usize, seed: u64) -> CsrGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(n * degree);
    for u in 0..n {
        for v in rand::seq::index::sample(&mut rng, n, degree.min(n)) {
            edges.push((u, v));
        }
    }
    CsrGraph::square(n, edges).unwrap()
}

/// Erdős–Rényi style graph with `m` random directed edges.
pub fn random_sparse(n: usize, m: usize, seed: u64) -> CsrGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let edges: Vec<_> = (0..m)
        .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
        .collect();
    CsrGraph::square(n, edges).unwrap()
}

/// Dense level array of a result that tracked levels.
pub fn dense_levels(res: &BfsResult) -> Vec<usize> {
    res.levels().expect("levels requested").to_dense()
}

/// Every policy/orientation combination the engine supports.
pub fn all_modes() -> Vec<(&'static str, DirectionPolicy)> {
    vec![
        ("cost", DirectionPolicy::CostEstimate),
        ("hysteresis", DirectionPolicy::default()),
        (
            "eager-hysteresis",
            DirectionPolicy::Hysteresis(HysteresisConfig {
                alpha: 1e9,
                beta1: 1e9,
                beta2: 1.0,
            }),
        ),
        ("push", DirectionPolicy::PushOnly),
        ("pull", DirectionPolicy::PullOnly),
    ]
}
