//! One BFS round: expand a frontier by a structural multiply with the graph.
//!
//! Both kernels are masked by the result record, so already visited vertices
//! never enter the next frontier, and both produce the same vertex set for the
//! same input frontier. They differ only in which qualifying neighbor becomes
//! the parent:
//!
//! - push: the first frontier vertex to claim `v` during the parallel scan
//!   wins (not deterministic);
//! - pull: the first in-neighbor of `v`, in adjacency order, found in the
//!   frontier.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::algs::assemble::ResultRecord;
use crate::algs::direction::Direction;
use crate::algs::frontier::{DenseFrontier, Frontier, NO_VERTEX, SparseFrontier};
use crate::bfs_error::{BfsError, try_filled};
use crate::topology::adapter::GraphAdapter;
use crate::topology::adjacency::Adjacency;

/// Push/pull kernels plus the per-traversal claim workspace.
pub struct StepExecutor<'g, G: Adjacency> {
    graph: GraphAdapter<'g, G>,
    /// `claims[v]` holds the last round in which `v` was claimed by a push.
    claims: Vec<AtomicUsize>,
}

impl<'g, G: Adjacency> StepExecutor<'g, G> {
    pub fn new(graph: GraphAdapter<'g, G>) -> Result<Self, BfsError> {
        let n = if graph.orientation().can_push() {
            graph.vertex_count()
        } else {
            0
        };
        let mut claims = Vec::new();
        claims
            .try_reserve_exact(n)
            .map_err(BfsError::oom("claim workspace", n))?;
        claims.extend((0..n).map(|_| AtomicUsize::new(0)));
        Ok(Self { graph, claims })
    }

    /// Compute the frontier of `round` (>= 1) from the previous one.
    ///
    /// The result record is only read, as the mask of unvisited vertices.
    pub(crate) fn step(
        &self,
        frontier: Frontier,
        direction: Direction,
        visited: &ResultRecord,
        round: usize,
    ) -> Result<Frontier, BfsError> {
        debug_assert!(round >= 1);
        match direction {
            Direction::Push => {
                let sparse = frontier.into_sparse()?;
                Ok(Frontier::Sparse(self.push(&sparse, visited, round)))
            }
            Direction::Pull => {
                let dense = frontier.into_dense(self.graph.vertex_count())?;
                Ok(Frontier::Dense(self.pull(&dense, visited)?))
            }
        }
    }

    /// `q'<!visited> = q' A`: scan out-edges of every frontier vertex.
    fn push(
        &self,
        frontier: &SparseFrontier,
        visited: &ResultRecord,
        round: usize,
    ) -> SparseFrontier {
        let Some(forward) = self.graph.forward() else {
            // the selector never pushes without a forward graph
            return SparseFrontier::default();
        };
        let claims = &self.claims;
        let entries: Vec<(usize, usize)> = frontier
            .entries()
            .par_iter()
            .flat_map_iter(|&(u, _)| {
                forward
                    .neighbors(u)
                    .filter(move |&v| {
                        !visited.is_visited(v)
                            && claims[v].fetch_max(round, Ordering::Relaxed) < round
                    })
                    .map(move |v| (v, u))
            })
            .collect();
        SparseFrontier::from_entries(entries)
    }

    /// `q<!visited> = Aᵀ q`: every unvisited vertex scans its in-edges.
    fn pull(
        &self,
        frontier: &DenseFrontier,
        visited: &ResultRecord,
    ) -> Result<DenseFrontier, BfsError> {
        let n = self.graph.vertex_count();
        let Some(transpose) = self.graph.transpose() else {
            return Ok(DenseFrontier::from_slots(try_filled("pull frontier", n, NO_VERTEX)?, 0));
        };
        let mut slots = try_filled("pull frontier", n, NO_VERTEX)?;
        let found: usize = slots
            .par_iter_mut()
            .enumerate()
            .map(|(v, slot)| {
                if visited.is_visited(v) {
                    return 0;
                }
                match transpose.neighbors(v).find(|&u| frontier.contains(u)) {
                    Some(u) => {
                        *slot = u;
                        1
                    }
                    None => 0,
                }
            })
            .sum();
        Ok(DenseFrontier::from_slots(slots, found))
    }
}
