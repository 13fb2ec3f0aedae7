//! Frontier containers: the vertices reached in the current round.
//!
//! Every entry carries a payload, the vertex that discovered it (its parent
//! candidate). The source is seeded as its own parent.
//!
//! Two representations live behind one enum. `Sparse` is an explicit list and
//! suits small frontiers and push steps; `Dense` keeps one slot per vertex and
//! gives the O(1) membership test a pull step needs.

use rayon::prelude::*;

use crate::bfs_error::{BfsError, try_filled};

/// Slot value of a vertex that is not in a dense frontier.
pub const NO_VERTEX: usize = usize::MAX;

#[cfg(test)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrontierKind {
    Sparse,
    Dense,
}

/// Explicit `(vertex, parent)` list, each vertex at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SparseFrontier {
    entries: Vec<(usize, usize)>,
}

impl SparseFrontier {
    pub fn from_entries(entries: Vec<(usize, usize)>) -> Self {
        Self { entries }
    }

    #[inline]
    pub fn entries(&self) -> &[(usize, usize)] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One slot per vertex holding the parent, or [`NO_VERTEX`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseFrontier {
    slots: Vec<usize>,
    len: usize,
}

impl DenseFrontier {
    /// Wrap filled slots; `len` must equal the number of occupied slots.
    pub fn from_slots(slots: Vec<usize>, len: usize) -> Self {
        debug_assert_eq!(slots.iter().filter(|&&p| p != NO_VERTEX).count(), len);
        Self { slots, len }
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.slots[v] != NO_VERTEX
    }

    #[cfg(test)]
    pub(crate) fn parent(&self, v: usize) -> Option<usize> {
        Some(self.slots[v]).filter(|&p| p != NO_VERTEX)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots (the vertex count).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p != NO_VERTEX)
            .map(|(v, &p)| (v, p))
    }
}

/// Active vertices of one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frontier {
    Sparse(SparseFrontier),
    Dense(DenseFrontier),
}

impl Frontier {
    /// The round-zero frontier: `source` with itself as parent.
    pub fn seed(source: usize) -> Self {
        Frontier::Sparse(SparseFrontier::from_entries(vec![(source, source)]))
    }

    #[cfg(test)]
    pub(crate) fn kind(&self) -> FrontierKind {
        match self {
            Frontier::Sparse(_) => FrontierKind::Sparse,
            Frontier::Dense(_) => FrontierKind::Dense,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Frontier::Sparse(s) => s.len(),
            Frontier::Dense(d) => d.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(vertex, parent)` pairs in ascending vertex order for dense
    /// frontiers, discovery order for sparse ones.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize)> + '_> {
        match self {
            Frontier::Sparse(s) => Box::new(s.entries.iter().copied()),
            Frontier::Dense(d) => Box::new(d.iter()),
        }
    }

    /// Membership test; linear for sparse frontiers.
    #[cfg(test)]
    pub(crate) fn contains(&self, v: usize) -> bool {
        match self {
            Frontier::Sparse(s) => s.entries.iter().any(|&(u, _)| u == v),
            Frontier::Dense(d) => v < d.capacity() && d.contains(v),
        }
    }

    /// Convert to the list representation used by push steps.
    pub fn into_sparse(self) -> Result<SparseFrontier, BfsError> {
        match self {
            Frontier::Sparse(s) => Ok(s),
            Frontier::Dense(d) => {
                let mut entries = Vec::new();
                entries
                    .try_reserve_exact(d.len)
                    .map_err(BfsError::oom("sparse frontier", d.len))?;
                entries.extend(d.iter());
                Ok(SparseFrontier { entries })
            }
        }
    }

    /// Convert to the slot representation used by pull steps.
    pub fn into_dense(self, n: usize) -> Result<DenseFrontier, BfsError> {
        match self {
            Frontier::Dense(d) => Ok(d),
            Frontier::Sparse(s) => {
                let mut slots = try_filled("dense frontier", n, NO_VERTEX)?;
                for &(v, p) in &s.entries {
                    slots[v] = p;
                }
                Ok(DenseFrontier {
                    slots,
                    len: s.entries.len(),
                })
            }
        }
    }

    /// Sum of `weight(v)` over the frontier vertices, computed in parallel.
    pub fn par_sum_by<F>(&self, weight: F) -> usize
    where
        F: Fn(usize) -> usize + Sync,
    {
        match self {
            Frontier::Sparse(s) => s.entries.par_iter().map(|&(v, _)| weight(v)).sum(),
            Frontier::Dense(d) => d
                .slots
                .par_iter()
                .enumerate()
                .filter(|&(_, &p)| p != NO_VERTEX)
                .map(|(v, _)| weight(v))
                .sum(),
        }
    }
}
