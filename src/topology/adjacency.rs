//! Read-only adjacency abstraction consumed by the traversal engine.
//!
//! A graph is an `nrows × ncols` boolean adjacency structure; the presence of
//! entry `(u, v)` is the directed edge `u → v`. Values are never looked at.
//! The same trait describes both orientations: the forward graph yields
//! out-neighbors, its transpose yields in-neighbors.

/// Row-oriented adjacency structure shared read-only across threads.
///
/// All methods are read-only and must be safe to call concurrently; the engine
/// calls [`Adjacency::neighbors`] from rayon workers during a step.
pub trait Adjacency: Sync {
    /// Iterator over the column indices stored in one row.
    type NeighIter<'a>: Iterator<Item = usize> + 'a
    where
        Self: 'a;

    /// Number of rows (source vertices).
    fn nrows(&self) -> usize;

    /// Number of columns (destination vertices).
    fn ncols(&self) -> usize;

    /// Number of stored entries. Only used by cost heuristics, so an
    /// approximation is acceptable.
    fn nvals(&self) -> usize;

    /// Column indices of row `v`. `v` must be `< nrows()`.
    fn neighbors(&self, v: usize) -> Self::NeighIter<'_>;

    /// Number of entries in row `v`.
    fn degree(&self, v: usize) -> usize {
        self.neighbors(v).count()
    }
}

impl<G: Adjacency + ?Sized> Adjacency for &G {
    type NeighIter<'a>
        = G::NeighIter<'a>
    where
        Self: 'a;

    #[inline]
    fn nrows(&self) -> usize {
        (**self).nrows()
    }
    #[inline]
    fn ncols(&self) -> usize {
        (**self).ncols()
    }
    #[inline]
    fn nvals(&self) -> usize {
        (**self).nvals()
    }
    #[inline]
    fn neighbors(&self, v: usize) -> Self::NeighIter<'_> {
        (**self).neighbors(v)
    }
    #[inline]
    fn degree(&self, v: usize) -> usize {
        (**self).degree(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Simple hash-map backed graph for testing the default methods.
    struct MapGraph {
        n: usize,
        adj: HashMap<usize, Vec<usize>>,
    }

    impl Adjacency for MapGraph {
        type NeighIter<'a> = std::iter::Copied<std::slice::Iter<'a, usize>>;

        fn nrows(&self) -> usize {
            self.n
        }
        fn ncols(&self) -> usize {
            self.n
        }
        fn nvals(&self) -> usize {
            self.adj.values().map(Vec::len).sum()
        }
        fn neighbors(&self, v: usize) -> Self::NeighIter<'_> {
            self.adj.get(&v).map_or(&[][..], |ns| ns.as_slice()).iter().copied()
        }
    }

    #[test]
    fn default_degree_counts_neighbors() {
        let mut adj = HashMap::new();
        adj.insert(0, vec![1, 2, 3]);
        adj.insert(2, vec![0]);
        let g = MapGraph { n: 4, adj };
        assert_eq!(g.degree(0), 3);
        assert_eq!(g.degree(1), 0);
        assert_eq!(g.nvals(), 4);
    }

    #[test]
    fn reference_forwards_to_graph() {
        let mut adj = HashMap::new();
        adj.insert(1, vec![0]);
        let g = MapGraph { n: 2, adj };
        let r = &g;
        assert_eq!(r.nrows(), 2);
        assert_eq!(r.neighbors(1).collect::<Vec<_>>(), vec![0]);
    }
}
