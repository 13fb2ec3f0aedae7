//! BfsError: Unified error type for pushpull-bfs public APIs
//!
//! Setup problems are reported before the first round is executed; allocation
//! failures and cancellation can only surface while rounds are running.

use std::collections::TryReserveError;
use thiserror::Error;

/// Unified error type for traversal operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BfsError {
    /// Neither the forward graph nor its transpose was supplied.
    #[error("Invalid argument: at least one graph orientation is required")]
    MissingGraph,
    /// The adjacency structure is not square.
    #[error("Invalid argument: adjacency must be square, got {nrows} x {ncols}")]
    NotSquare { nrows: usize, ncols: usize },
    /// Forward graph and transpose describe different vertex counts.
    #[error("Invalid argument: graph has {graph} vertices but transpose has {transpose}")]
    DimensionMismatch { graph: usize, transpose: usize },
    /// Source vertex is not a vertex of the graph.
    #[error("Invalid argument: source vertex {vertex} out of range (n = {n})")]
    SourceOutOfRange { vertex: usize, n: usize },
    /// The caller asked for neither levels nor parents.
    #[error("Invalid argument: either levels or parents must be requested")]
    NothingRequested,
    /// An edge endpoint lies outside the declared shape.
    #[error("Invalid argument: edge ({src}, {dst}) outside {nrows} x {ncols} shape")]
    EdgeOutOfRange {
        src: usize,
        dst: usize,
        nrows: usize,
        ncols: usize,
    },
    /// Vertex ids must fit in the 32-bit CSR target array.
    #[error("Invalid argument: {0} vertices exceed the supported maximum")]
    TooManyVertices(usize),
    /// A sparse record entry is out of range, out of order or unreached.
    #[error("Invalid argument: record entry {position} (vertex {vertex}) invalid for n = {n}")]
    MalformedRecord {
        position: usize,
        vertex: usize,
        n: usize,
    },
    /// A record passed to the checker has the wrong number of vertices.
    #[error("Invalid argument: record covers {found} vertices, graph has {expected}")]
    RecordSize { expected: usize, found: usize },
    /// Workspace for a frontier or record could not be allocated.
    #[error("Out of memory: could not allocate {what} for {len} entries")]
    OutOfMemory { what: &'static str, len: usize },
    /// The supplied transpose does not match the forward graph.
    #[error("Internal inconsistency: transpose differs from graph at vertex {vertex}")]
    TransposeMismatch { vertex: usize },
    /// A structural invariant of a graph or result was violated.
    #[error("Internal inconsistency: {0}")]
    Invariant(String),
    /// The caller's cancellation hook stopped the traversal between rounds.
    #[error("Traversal cancelled before round {round}")]
    Cancelled { round: usize },
    /// A level record disagrees with a reference traversal.
    #[error("Check failed: vertex {vertex} has level {found:?}, expected {expected:?}")]
    LevelMismatch {
        vertex: usize,
        expected: Option<usize>,
        found: Option<usize>,
    },
    /// A parent record does not describe a valid BFS tree edge.
    #[error("Check failed: vertex {vertex} has invalid parent {parent:?}")]
    InvalidParent {
        vertex: usize,
        parent: Option<usize>,
    },
}

impl BfsError {
    /// True for errors detected eagerly during setup.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            BfsError::MissingGraph
                | BfsError::NotSquare { .. }
                | BfsError::DimensionMismatch { .. }
                | BfsError::SourceOutOfRange { .. }
                | BfsError::NothingRequested
                | BfsError::EdgeOutOfRange { .. }
                | BfsError::TooManyVertices(_)
                | BfsError::MalformedRecord { .. }
                | BfsError::RecordSize { .. }
        )
    }

    pub(crate) fn oom(what: &'static str, len: usize) -> impl FnOnce(TryReserveError) -> Self {
        move |_| BfsError::OutOfMemory { what, len }
    }
}

/// Allocate a vector of `len` copies of `value`, reporting allocation failure
/// instead of aborting.
pub(crate) fn try_filled<T: Clone>(
    what: &'static str,
    len: usize,
    value: T,
) -> Result<Vec<T>, BfsError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(BfsError::oom(what, len))?;
    v.resize(len, value);
    Ok(v)
}
