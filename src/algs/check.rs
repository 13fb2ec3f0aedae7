//! Independent verification of a BFS result.
//!
//! Recomputes levels with a plain sequential queue BFS over the forward graph
//! and then checks the supplied records against it: levels must match
//! exactly; a parent is valid when it was reached, the edge `parent → v`
//! exists, and it sits exactly one level above `v`. Any valid parent is
//! accepted, so results of different directions can all be checked.

use std::collections::VecDeque;

use crate::algs::assemble::{BfsResult, UNREACHED, VertexRecord};
use crate::bfs_error::BfsError;
use crate::topology::adjacency::Adjacency;

/// Reference levels from `source`, [`UNREACHED`] for unreachable vertices.
pub fn reference_levels<G: Adjacency>(graph: &G, source: usize) -> Result<Vec<usize>, BfsError> {
    let n = graph.nrows();
    if graph.ncols() != n {
        return Err(BfsError::NotSquare {
            nrows: n,
            ncols: graph.ncols(),
        });
    }
    if source >= n {
        return Err(BfsError::SourceOutOfRange { vertex: source, n });
    }
    let mut level = vec![UNREACHED; n];
    let mut queue = VecDeque::from([source]);
    level[source] = 0;
    while let Some(u) = queue.pop_front() {
        for v in graph.neighbors(u) {
            if level[v] == UNREACHED {
                level[v] = level[u] + 1;
                queue.push_back(v);
            }
        }
    }
    Ok(level)
}

/// Check level and/or parent records of a traversal from `source`.
pub fn check_bfs<G: Adjacency>(
    graph: &G,
    source: usize,
    levels: Option<&VertexRecord>,
    parents: Option<&VertexRecord>,
) -> Result<(), BfsError> {
    let expected = reference_levels(graph, source)?;
    for record in levels.iter().chain(parents.iter()) {
        if record.vertex_count() != expected.len() {
            return Err(BfsError::RecordSize {
                expected: expected.len(),
                found: record.vertex_count(),
            });
        }
    }
    let at = |v: usize| Some(expected[v]).filter(|&l| l != UNREACHED);

    if let Some(levels) = levels {
        for v in 0..expected.len() {
            let found = levels.get(v);
            if found != at(v) {
                return Err(BfsError::LevelMismatch {
                    vertex: v,
                    expected: at(v),
                    found,
                });
            }
        }
    }

    if let Some(parents) = parents {
        for v in 0..expected.len() {
            let parent = parents.get(v);
            let ok = match (at(v), parent) {
                (None, None) => true,
                (None, Some(_)) | (Some(_), None) => false,
                (Some(_), Some(p)) if v == source => p == source,
                (Some(lv), Some(p)) => {
                    p < expected.len()
                        && at(p).is_some_and(|lp| lp + 1 == lv)
                        && graph.neighbors(p).any(|x| x == v)
                }
            };
            if !ok {
                return Err(BfsError::InvalidParent { vertex: v, parent });
            }
        }
    }
    Ok(())
}

impl BfsResult {
    /// Verify this result against `graph` with [`check_bfs`].
    pub fn check<G: Adjacency>(&self, graph: &G) -> Result<(), BfsError> {
        check_bfs(graph, self.source(), self.levels(), self.parents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::assemble::SparseRecord;
    use crate::topology::csr::CsrGraph;

    fn tree() -> CsrGraph {
        // 0 → 1 → 3, 0 → 2, 4 isolated
        CsrGraph::square(5, [(0, 1), (0, 2), (1, 3)]).unwrap()
    }

    #[test]
    fn reference_levels_of_tree() {
        let lv = reference_levels(&tree(), 0).unwrap();
        assert_eq!(lv, vec![0, 1, 1, 2, UNREACHED]);
    }

    #[test]
    fn accepts_correct_records() {
        let levels = VertexRecord::Dense(vec![0, 1, 1, 2, UNREACHED]);
        let parents = VertexRecord::Sparse(
            SparseRecord::new(5, vec![(0, 0), (1, 0), (2, 0), (3, 1)]).unwrap(),
        );
        assert!(check_bfs(&tree(), 0, Some(&levels), Some(&parents)).is_ok());
    }

    #[test]
    fn rejects_wrong_level() {
        let levels = VertexRecord::Dense(vec![0, 1, 2, 2, UNREACHED]);
        let err = check_bfs(&tree(), 0, Some(&levels), None).unwrap_err();
        assert_eq!(
            err,
            BfsError::LevelMismatch {
                vertex: 2,
                expected: Some(1),
                found: Some(2)
            }
        );
    }

    #[test]
    fn rejects_parent_without_edge() {
        // 2 is at level 1 but 2 → 3 is not an edge
        let parents = VertexRecord::Dense(vec![0, 0, 0, 2, UNREACHED]);
        let err = check_bfs(&tree(), 0, None, Some(&parents)).unwrap_err();
        assert_eq!(
            err,
            BfsError::InvalidParent {
                vertex: 3,
                parent: Some(2)
            }
        );
    }

    #[test]
    fn rejects_reached_unreachable_vertex() {
        let parents = VertexRecord::Dense(vec![0, 0, 0, 1, 3]);
        let err = check_bfs(&tree(), 0, None, Some(&parents)).unwrap_err();
        assert!(matches!(err, BfsError::InvalidParent { vertex: 4, .. }));
    }

    #[test]
    fn source_must_be_in_range() {
        let err = reference_levels(&tree(), 9).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn record_of_other_size_is_rejected() {
        let levels = VertexRecord::Dense(vec![0, 1, 1]);
        let err = check_bfs(&tree(), 0, Some(&levels), None).unwrap_err();
        assert_eq!(err, BfsError::RecordSize { expected: 5, found: 3 });
    }

    #[test]
    fn sparse_levels_are_looked_up_by_vertex() {
        let entries = vec![(0, 0), (1, 1), (2, 1), (3, 2)];
        let levels = VertexRecord::Sparse(SparseRecord::new(5, entries).unwrap());
        assert!(check_bfs(&tree(), 0, Some(&levels), None).is_ok());
    }
}
