//! Result assembly: the persistent parent/level record of a traversal.
//!
//! Each vertex is written exactly once, in the round that first reaches it.
//! Later frontiers never contain a visited vertex, so absorbing a frontier is
//! a plain union; the record still refuses to overwrite.

use serde::{Deserialize, Serialize};

use crate::algs::direction::Direction;
use crate::algs::frontier::Frontier;
use crate::bfs_error::{BfsError, try_filled};
use crate::debug_invariants::DebugInvariants;

/// Dense sentinel for a vertex the traversal never reached.
pub const UNREACHED: usize = usize::MAX;

/// Representation requested for output records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `n` slots, unreached vertices hold [`UNREACHED`].
    #[default]
    Dense,
    /// Reached vertices only, as `(vertex, value)` sorted by vertex.
    Sparse,
}

/// Reached `(vertex, value)` pairs of an `n`-vertex record, strictly
/// ascending by vertex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSparseRecord")]
pub struct SparseRecord {
    n: usize,
    entries: Vec<(usize, usize)>,
}

#[derive(Deserialize)]
struct RawSparseRecord {
    n: usize,
    entries: Vec<(usize, usize)>,
}

impl TryFrom<RawSparseRecord> for SparseRecord {
    type Error = BfsError;

    fn try_from(raw: RawSparseRecord) -> Result<Self, Self::Error> {
        SparseRecord::new(raw.n, raw.entries)
    }
}

impl SparseRecord {
    /// Rejects entries that are out of range, unsorted, duplicated or hold
    /// [`UNREACHED`].
    pub fn new(n: usize, entries: Vec<(usize, usize)>) -> Result<Self, BfsError> {
        let mut prev = None;
        for (position, &(v, x)) in entries.iter().enumerate() {
            if v >= n || x == UNREACHED || prev.is_some_and(|p| p >= v) {
                return Err(BfsError::MalformedRecord {
                    position,
                    vertex: v,
                    n,
                });
            }
            prev = Some(v);
        }
        Ok(Self { n, entries })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn entries(&self) -> &[(usize, usize)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(usize, usize)> {
        self.entries
    }
}

/// Per-vertex output array (parents or levels).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexRecord {
    Dense(Vec<usize>),
    Sparse(SparseRecord),
}

impl VertexRecord {
    fn from_dense(values: Vec<usize>, format: OutputFormat) -> Self {
        match format {
            OutputFormat::Dense => VertexRecord::Dense(values),
            OutputFormat::Sparse => VertexRecord::Sparse(SparseRecord {
                n: values.len(),
                entries: values
                    .into_iter()
                    .enumerate()
                    .filter(|&(_, x)| x != UNREACHED)
                    .collect(),
            }),
        }
    }

    /// Value stored for `v`, `None` if `v` was not reached.
    pub fn get(&self, v: usize) -> Option<usize> {
        match self {
            VertexRecord::Dense(values) => values.get(v).copied().filter(|&x| x != UNREACHED),
            VertexRecord::Sparse(s) => s
                .entries
                .binary_search_by_key(&v, |&(u, _)| u)
                .ok()
                .map(|i| s.entries[i].1),
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            VertexRecord::Dense(values) => values.len(),
            VertexRecord::Sparse(s) => s.n,
        }
    }

    /// Number of reached vertices.
    pub fn reached(&self) -> usize {
        match self {
            VertexRecord::Dense(values) => values.iter().filter(|&&x| x != UNREACHED).count(),
            VertexRecord::Sparse(s) => s.entries.len(),
        }
    }

    /// Reached `(vertex, value)` pairs in ascending vertex order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize)> + '_> {
        match self {
            VertexRecord::Dense(values) => Box::new(
                values
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|&(_, x)| x != UNREACHED),
            ),
            VertexRecord::Sparse(s) => Box::new(s.entries.iter().copied()),
        }
    }

    /// Dense copy with [`UNREACHED`] holes.
    pub fn to_dense(&self) -> Vec<usize> {
        match self {
            VertexRecord::Dense(values) => values.clone(),
            VertexRecord::Sparse(s) => {
                let mut out = vec![UNREACHED; s.n];
                for &(v, x) in &s.entries {
                    out[v] = x;
                }
                out
            }
        }
    }
}

/// What happened in one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    /// Level assigned in this round (1 for the source's neighbors).
    pub round: usize,
    pub direction: Direction,
    /// Size of the frontier the round produced.
    pub frontier: usize,
}

/// Mutable record owned by the engine while a traversal runs.
#[derive(Debug)]
pub(crate) struct ResultRecord {
    source: usize,
    parents: Option<Vec<usize>>,
    levels: Option<Vec<usize>>,
    visited: usize,
}

impl ResultRecord {
    /// Record with only `source` marked (its own parent, level 0).
    pub(crate) fn new(
        n: usize,
        source: usize,
        want_levels: bool,
        want_parents: bool,
    ) -> Result<Self, BfsError> {
        if !want_levels && !want_parents {
            return Err(BfsError::NothingRequested);
        }
        let mut parents = None;
        if want_parents {
            let mut p = try_filled("parent record", n, UNREACHED)?;
            p[source] = source;
            parents = Some(p);
        }
        let mut levels = None;
        if want_levels {
            let mut l = try_filled("level record", n, UNREACHED)?;
            l[source] = 0;
            levels = Some(l);
        }
        Ok(Self {
            source,
            parents,
            levels,
            visited: 1,
        })
    }

    /// The mask of a step: true once `v` has been assigned.
    #[inline]
    pub(crate) fn is_visited(&self, v: usize) -> bool {
        match (&self.parents, &self.levels) {
            (Some(p), _) => p[v] != UNREACHED,
            (None, Some(l)) => l[v] != UNREACHED,
            (None, None) => false,
        }
    }

    #[inline]
    pub(crate) fn visited(&self) -> usize {
        self.visited
    }

    /// Write the frontier's parents and `level` into the record.
    ///
    /// Returns the number of newly visited vertices.
    pub(crate) fn absorb(&mut self, frontier: &Frontier, level: usize) -> usize {
        let mut delta = 0;
        for (v, parent) in frontier.iter() {
            if self.is_visited(v) {
                continue;
            }
            if let Some(p) = self.parents.as_mut() {
                p[v] = parent;
            }
            if let Some(l) = self.levels.as_mut() {
                l[v] = level;
            }
            delta += 1;
        }
        self.visited += delta;
        delta
    }

    pub(crate) fn finish(self, format: OutputFormat, rounds: Vec<RoundInfo>) -> BfsResult {
        let n = self
            .parents
            .as_ref()
            .or(self.levels.as_ref())
            .map_or(0, Vec::len);
        BfsResult {
            source: self.source,
            n,
            parents: self.parents.map(|p| VertexRecord::from_dense(p, format)),
            levels: self.levels.map(|l| VertexRecord::from_dense(l, format)),
            visited: self.visited,
            rounds,
        }
    }
}

/// Outcome of a breadth-first search, owned by the caller.
#[derive(Clone, Debug)]
pub struct BfsResult {
    source: usize,
    n: usize,
    parents: Option<VertexRecord>,
    levels: Option<VertexRecord>,
    visited: usize,
    rounds: Vec<RoundInfo>,
}

impl BfsResult {
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Number of vertices reached, the source included.
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    pub fn parents(&self) -> Option<&VertexRecord> {
        self.parents.as_ref()
    }

    pub fn levels(&self) -> Option<&VertexRecord> {
        self.levels.as_ref()
    }

    pub fn parent(&self, v: usize) -> Option<usize> {
        self.parents.as_ref().and_then(|p| p.get(v))
    }

    pub fn level(&self, v: usize) -> Option<usize> {
        self.levels.as_ref().and_then(|l| l.get(v))
    }

    /// True if `v` was reached from the source.
    pub fn is_reached(&self, v: usize) -> bool {
        self.parent(v).or_else(|| self.level(v)).is_some()
    }

    /// Per-round direction and frontier size, in execution order.
    pub fn rounds(&self) -> &[RoundInfo] {
        &self.rounds
    }

    /// `(parents, levels)`
    pub fn into_parts(self) -> (Option<VertexRecord>, Option<VertexRecord>) {
        (self.parents, self.levels)
    }
}

impl DebugInvariants for BfsResult {
    fn validate_invariants(&self) -> Result<(), BfsError> {
        let s = self.source;
        if self.levels.is_some() && self.level(s) != Some(0) {
            return Err(BfsError::Invariant(format!("source {s} is not at level 0")));
        }
        if self.parents.is_some() && self.parent(s) != Some(s) {
            return Err(BfsError::Invariant(format!(
                "source {s} is not its own parent"
            )));
        }
        if let Some(parents) = &self.parents {
            for (v, p) in parents.iter().filter(|&(v, _)| v != s) {
                if parents.get(p).is_none() {
                    return Err(BfsError::Invariant(format!(
                        "parent {p} of vertex {v} was never reached"
                    )));
                }
                if let (Some(lv), Some(lp)) = (self.level(v), self.level(p)) {
                    if lp + 1 != lv {
                        return Err(BfsError::Invariant(format!(
                            "vertex {v} at level {lv} has parent {p} at level {lp}"
                        )));
                    }
                }
            }
        }
        let reached = self
            .parents
            .as_ref()
            .or(self.levels.as_ref())
            .map_or(0, VertexRecord::reached);
        if reached != self.visited {
            return Err(BfsError::Invariant(format!(
                "{reached} vertices recorded but {} visited",
                self.visited
            )));
        }
        Ok(())
    }
}
