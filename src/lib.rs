#![cfg_attr(docsrs, feature(doc_cfg))]
//! # pushpull-bfs
//!
//! pushpull-bfs computes breadth-first-search levels and parents from a single
//! source over large sparse directed graphs. Every round it chooses between a
//! *push* step (frontier vertices scan their out-edges) and a *pull* step
//! (unvisited vertices scan their in-edges for a frontier member), keeping the
//! total work close to the number of edges actually touched.
//!
//! ## Features
//! - Immutable CSR graphs with an explicit transpose, or any type implementing
//!   [`topology::Adjacency`]
//! - Two direction policies: a per-round cost estimate and edge-count
//!   hysteresis thresholds, plus forced push-only / pull-only modes
//! - Sparse and dense frontiers, switched with the chosen direction
//! - Data-parallel steps on the rayon global pool
//! - Dense or sparse output records, optional depth limit, cancellation
//!   between rounds, and an independent result checker
//!
//! ## Caller contract
//! When both the graph and its transpose are supplied they must describe the
//! same edge set. This is not checked unless
//! [`BfsConfig::validate_transpose`](algs::BfsConfig) is enabled; a
//! symmetric graph may be passed as its own transpose.
//!
//! ## Determinism
//!
//! Levels are always deterministic. When several frontier vertices qualify as
//! the parent of a vertex, the one recorded is unspecified and may differ
//! between directions and runs.
//!
//! ## Usage
//! ```
//! use pushpull_bfs::prelude::*;
//!
//! let g = CsrGraph::square(4, [(0, 1), (1, 2), (0, 3)]).unwrap();
//! let gt = g.transpose();
//! let res = BfsBuilder::new(&g).transpose(&gt).source(0).run().unwrap();
//! assert_eq!(res.level(2), Some(2));
//! assert_eq!(res.parent(3), Some(0));
//! ```

pub mod algs;
pub mod bfs_error;
pub mod debug_invariants;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::{
        BfsBuilder, BfsConfig, BfsResult, Direction, DirectionPolicy, HysteresisConfig,
        OutputFormat, SparseRecord, UNREACHED, VertexRecord, bfs, breadth_first_search,
        breadth_first_search_batch, check_bfs,
    };
    pub use crate::bfs_error::BfsError;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::topology::{Adjacency, CsrGraph, GraphAdapter, Orientation};
}
