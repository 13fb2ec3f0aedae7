//! Read-only view over a graph and its (optional) transpose.
//!
//! The adapter is the only place where the shape of the inputs is checked:
//! every problem with the arguments is reported here, before any round runs.

use crate::bfs_error::BfsError;
use crate::topology::adjacency::Adjacency;

/// Which orientations of the graph were supplied at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Forward graph and transpose; push and pull are both possible.
    Both,
    /// Forward graph only; traversal is push-only.
    ForwardOnly,
    /// Transpose only; traversal is pull-only.
    TransposeOnly,
}

impl Orientation {
    #[inline]
    pub fn can_push(self) -> bool {
        !matches!(self, Orientation::TransposeOnly)
    }
    #[inline]
    pub fn can_pull(self) -> bool {
        !matches!(self, Orientation::ForwardOnly)
    }
}

/// Forward/transpose pair with validated dimensions.
///
/// If both orientations are supplied they must describe the same edge set;
/// this is a caller contract and is only verified by
/// [`GraphAdapter::validate_transpose`].
#[derive(Debug)]
pub struct GraphAdapter<'g, G: Adjacency> {
    forward: Option<&'g G>,
    transpose: Option<&'g G>,
    n: usize,
    nvals: usize,
}

impl<G: Adjacency> Clone for GraphAdapter<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: Adjacency> Copy for GraphAdapter<'_, G> {}

impl<'g, G: Adjacency> GraphAdapter<'g, G> {
    pub fn new(forward: Option<&'g G>, transpose: Option<&'g G>) -> Result<Self, BfsError> {
        let square = |g: &G| -> Result<usize, BfsError> {
            let (nrows, ncols) = (g.nrows(), g.ncols());
            if nrows != ncols {
                return Err(BfsError::NotSquare { nrows, ncols });
            }
            Ok(nrows)
        };

        let (n, nvals) = match (forward, transpose) {
            (None, None) => return Err(BfsError::MissingGraph),
            (Some(a), None) => (square(a)?, a.nvals()),
            (None, Some(at)) => (square(at)?, at.nvals()),
            (Some(a), Some(at)) => {
                let n = square(a)?;
                let nt = square(at)?;
                if n != nt {
                    return Err(BfsError::DimensionMismatch {
                        graph: n,
                        transpose: nt,
                    });
                }
                (n, a.nvals())
            }
        };

        Ok(Self {
            forward,
            transpose,
            n,
            nvals,
        })
    }

    /// Reject a source that is not a vertex of the graph.
    pub fn check_source(&self, source: usize) -> Result<(), BfsError> {
        if source >= self.n {
            return Err(BfsError::SourceOutOfRange {
                vertex: source,
                n: self.n,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Number of stored edges, taken from whichever orientation is present.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.nvals
    }

    /// `edges / vertices`, zero for the empty graph.
    pub fn average_degree(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.nvals as f64 / self.n as f64
        }
    }

    pub fn orientation(&self) -> Orientation {
        match (self.forward.is_some(), self.transpose.is_some()) {
            (true, true) => Orientation::Both,
            (true, false) => Orientation::ForwardOnly,
            _ => Orientation::TransposeOnly,
        }
    }

    #[inline]
    pub fn forward(&self) -> Option<&'g G> {
        self.forward
    }

    #[inline]
    pub fn transpose(&self) -> Option<&'g G> {
        self.transpose
    }

    /// Out-neighbors of `v`, if the forward orientation is available.
    pub fn out_neighbors(&self, v: usize) -> Option<G::NeighIter<'g>> {
        self.forward.map(|a| a.neighbors(v))
    }

    /// In-neighbors of `v`, if the transpose is available.
    pub fn in_neighbors(&self, v: usize) -> Option<G::NeighIter<'g>> {
        self.transpose.map(|at| at.neighbors(v))
    }

    /// Out-degree of `v`, if the forward orientation is available.
    #[inline]
    pub fn out_degree(&self, v: usize) -> Option<usize> {
        self.forward.map(|a| a.degree(v))
    }

    /// Opt-in check that the transpose really is the transpose of the graph.
    ///
    /// Costs a sort of both edge lists. Succeeds trivially when only one
    /// orientation is present.
    pub fn validate_transpose(&self) -> Result<(), BfsError> {
        let (Some(a), Some(at)) = (self.forward, self.transpose) else {
            return Ok(());
        };
        let mut fwd: Vec<(usize, usize)> = (0..self.n)
            .flat_map(|u| a.neighbors(u).map(move |v| (v, u)))
            .collect();
        let mut rev: Vec<(usize, usize)> = (0..self.n)
            .flat_map(|v| at.neighbors(v).map(move |u| (v, u)))
            .collect();
        fwd.sort_unstable();
        fwd.dedup();
        rev.sort_unstable();
        rev.dedup();
        if fwd == rev {
            return Ok(());
        }
        let vertex = fwd
            .iter()
            .zip(rev.iter())
            .find(|(x, y)| x != y)
            .map(|(x, y)| x.0.min(y.0))
            .or_else(|| fwd.get(rev.len()).or(rev.get(fwd.len())).map(|e| e.0))
            .unwrap_or(0);
        Err(BfsError::TransposeMismatch { vertex })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::csr::CsrGraph;

    fn path3() -> CsrGraph {
        CsrGraph::square(3, [(0, 1), (1, 2)]).unwrap()
    }

    #[test]
    fn requires_some_orientation() {
        let err = GraphAdapter::<CsrGraph>::new(None, None).unwrap_err();
        assert_eq!(err, BfsError::MissingGraph);
    }

    #[test]
    fn rejects_non_square() {
        let g = CsrGraph::from_edges(2, 3, [(0, 2)]).unwrap();
        let err = GraphAdapter::new(Some(&g), None).unwrap_err();
        assert_eq!(err, BfsError::NotSquare { nrows: 2, ncols: 3 });
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let a = path3();
        let at = CsrGraph::square(4, [(1, 0)]).unwrap();
        let err = GraphAdapter::new(Some(&a), Some(&at)).unwrap_err();
        assert!(matches!(
            err,
            BfsError::DimensionMismatch {
                graph: 3,
                transpose: 4
            }
        ));
    }

    #[test]
    fn source_range_is_checked() {
        let a = path3();
        let view = GraphAdapter::new(Some(&a), None).unwrap();
        assert!(view.check_source(2).is_ok());
        assert_eq!(
            view.check_source(3),
            Err(BfsError::SourceOutOfRange { vertex: 3, n: 3 })
        );
    }

    #[test]
    fn orientation_follows_inputs() {
        let a = path3();
        let at = a.transpose();
        let both = GraphAdapter::new(Some(&a), Some(&at)).unwrap();
        assert_eq!(both.orientation(), Orientation::Both);
        let pull = GraphAdapter::new(None, Some(&at)).unwrap();
        assert_eq!(pull.orientation(), Orientation::TransposeOnly);
        assert!(!pull.orientation().can_push());
        assert_eq!(pull.out_degree(0), None);
        assert_eq!(pull.in_neighbors(2).unwrap().collect::<Vec<_>>(), vec![1]);
        assert_eq!(pull.edge_count(), 2);
    }

    #[test]
    fn transpose_validation() {
        let a = path3();
        let at = a.transpose();
        assert!(GraphAdapter::new(Some(&a), Some(&at)).unwrap().validate_transpose().is_ok());
        // passing the graph itself as its transpose is wrong for a path
        let err = GraphAdapter::new(Some(&a), Some(&a))
            .unwrap()
            .validate_transpose()
            .unwrap_err();
        assert!(matches!(err, BfsError::TransposeMismatch { .. }));
    }

    /// Implicit edgeless graph whose size is not bounded by a storage format.
    struct Edgeless(usize);

    impl Adjacency for Edgeless {
        type NeighIter<'a> = std::iter::Empty<usize>;

        fn nrows(&self) -> usize {
            self.0
        }
        fn ncols(&self) -> usize {
            self.0
        }
        fn nvals(&self) -> usize {
            0
        }
        fn neighbors(&self, _v: usize) -> Self::NeighIter<'_> {
            std::iter::empty()
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn custom_graphs_are_not_limited_to_u32_ids() {
        let n = u32::MAX as usize + 2;
        let g = Edgeless(n);
        let view = GraphAdapter::new(Some(&g), Some(&g)).unwrap();
        assert_eq!(view.vertex_count(), n);
        assert!(view.check_source(n - 1).is_ok());
    }
}
