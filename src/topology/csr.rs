//! Compressed Sparse Row adjacency graph.
//!
//! Immutable, cache-friendly adjacency structure with deterministic iteration
//! order. Every row is sorted and free of duplicates, so neighbor scans walk
//! one contiguous slice. Built once from an edge list and intended for
//! read-only traversal workloads; cloning shares the arrays.

use std::sync::Arc;

use itertools::Itertools;

use super::adjacency::Adjacency;
use crate::bfs_error::BfsError;
use crate::debug_invariants::DebugInvariants;

/// Immutable boolean adjacency matrix in CSR form.
#[derive(Clone, Debug)]
pub struct CsrGraph {
    nrows: usize,
    ncols: usize,
    /// Row `i` occupies `targets[offsets[i]..offsets[i + 1]]`.
    offsets: Arc<[usize]>,
    targets: Arc<[u32]>,
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            nrows: 0,
            ncols: 0,
            offsets: Arc::from([0]),
            targets: Arc::from([]),
        }
    }
}

impl CsrGraph {
    /// Build an `nrows × ncols` graph from `(src, dst)` pairs.
    ///
    /// Duplicate edges collapse into one; rows come out sorted.
    pub fn from_edges<I>(nrows: usize, ncols: usize, edges: I) -> Result<Self, BfsError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let limit = u32::MAX as usize;
        if nrows > limit || ncols > limit {
            return Err(BfsError::TooManyVertices(nrows.max(ncols)));
        }

        let mut pairs: Vec<(u32, u32)> = Vec::new();
        for (src, dst) in edges {
            if src >= nrows || dst >= ncols {
                return Err(BfsError::EdgeOutOfRange {
                    src,
                    dst,
                    nrows,
                    ncols,
                });
            }
            pairs.push((src as u32, dst as u32));
        }
        pairs.sort_unstable();
        pairs.dedup();

        // degree counts, then prefix sums
        let mut offsets = vec![0usize; nrows + 1];
        for &(src, _) in &pairs {
            offsets[src as usize + 1] += 1;
        }
        for i in 0..nrows {
            offsets[i + 1] += offsets[i];
        }
        let targets: Vec<u32> = pairs.into_iter().map(|(_, dst)| dst).collect();

        let g = Self {
            nrows,
            ncols,
            offsets: offsets.into(),
            targets: targets.into(),
        };
        g.debug_assert_invariants();
        Ok(g)
    }

    /// Square `n × n` graph from an edge list.
    pub fn square<I>(n: usize, edges: I) -> Result<Self, BfsError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Self::from_edges(n, n, edges)
    }

    /// Explicit transpose: row `v` of the result lists the sources of all
    /// edges entering `v`.
    pub fn transpose(&self) -> Self {
        let mut offsets = vec![0usize; self.ncols + 1];
        for &dst in self.targets.iter() {
            offsets[dst as usize + 1] += 1;
        }
        for j in 0..self.ncols {
            offsets[j + 1] += offsets[j];
        }
        let mut write = offsets.clone();
        let mut targets = vec![0u32; self.targets.len()];
        // rows visited in ascending order keep every transposed row sorted
        for i in 0..self.nrows {
            for &dst in self.row(i) {
                let pos = &mut write[dst as usize];
                targets[*pos] = i as u32;
                *pos += 1;
            }
        }
        Self {
            nrows: self.ncols,
            ncols: self.nrows,
            offsets: offsets.into(),
            targets: targets.into(),
        }
    }

    /// First row at which `other` disagrees with the transpose of `self`,
    /// or `None` when `other` is exactly `selfᵀ`.
    pub fn transpose_mismatch(&self, other: &CsrGraph) -> Option<usize> {
        if other.nrows != self.ncols || other.ncols != self.nrows {
            return Some(0);
        }
        let t = self.transpose();
        (0..t.nrows).find(|&v| t.row(v) != other.row(v))
    }

    /// True when `self` stores exactly the reversed edges of `other`.
    pub fn is_transpose_of(&self, other: &CsrGraph) -> bool {
        other.transpose_mismatch(self).is_none()
    }

    /// Raw sorted neighbor slice of row `v`.
    #[inline]
    pub fn row(&self, v: usize) -> &[u32] {
        &self.targets[self.offsets[v]..self.offsets[v + 1]]
    }

    /// True if the directed edge `src → dst` is stored.
    pub fn has_edge(&self, src: usize, dst: usize) -> bool {
        src < self.nrows && dst < self.ncols && self.row(src).binary_search(&(dst as u32)).is_ok()
    }

    /// Structural symmetry test; a symmetric graph is its own transpose.
    pub fn is_symmetric(&self) -> bool {
        self.nrows == self.ncols && self.transpose_mismatch(self).is_none()
    }
}

/// Iterator over one CSR row.
pub struct NeighIter<'a> {
    inner: std::slice::Iter<'a, u32>,
}

impl Iterator for NeighIter<'_> {
    type Item = usize;
    #[inline]
    fn next(&mut self) -> Option<usize> {
        self.inner.next().map(|&v| v as usize)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for NeighIter<'_> {}

impl Adjacency for CsrGraph {
    type NeighIter<'a> = NeighIter<'a>;

    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }
    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }
    #[inline]
    fn nvals(&self) -> usize {
        self.targets.len()
    }
    #[inline]
    fn neighbors(&self, v: usize) -> NeighIter<'_> {
        NeighIter {
            inner: self.row(v).iter(),
        }
    }
    #[inline]
    fn degree(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }
}

impl DebugInvariants for CsrGraph {
    fn validate_invariants(&self) -> Result<(), BfsError> {
        if self.offsets.len() != self.nrows + 1 {
            return Err(BfsError::Invariant(format!(
                "offsets length {} != nrows + 1 = {}",
                self.offsets.len(),
                self.nrows + 1
            )));
        }
        if self.offsets.last().copied() != Some(self.targets.len()) {
            return Err(BfsError::Invariant(
                "last offset does not match number of entries".into(),
            ));
        }
        if let Some((i, _)) = self
            .offsets
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (lo, hi))| lo > hi)
        {
            return Err(BfsError::Invariant(format!("offsets decrease at row {i}")));
        }
        for i in 0..self.nrows {
            let row = self.row(i);
            if row.iter().tuple_windows().any(|(a, b)| a >= b) {
                return Err(BfsError::Invariant(format!(
                    "row {i} is not strictly sorted"
                )));
            }
            if row.last().is_some_and(|&v| v as usize >= self.ncols) {
                return Err(BfsError::Invariant(format!(
                    "row {i} has a column outside 0..{}",
                    self.ncols
                )));
            }
        }
        Ok(())
    }
}
