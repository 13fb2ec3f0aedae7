//! Graph topology abstractions consumed by the traversal engine.
//!
//! - [`Adjacency`]: read-only row access to a boolean adjacency structure
//! - [`CsrGraph`]: immutable CSR implementation with an explicit transpose
//! - [`GraphAdapter`]: validated forward/transpose pair handed to the engine

pub mod adapter;
pub mod adjacency;
pub mod csr;

pub use adapter::{GraphAdapter, Orientation};
pub use adjacency::Adjacency;
pub use csr::CsrGraph;

static_assertions::assert_impl_all!(CsrGraph: Send, Sync, Clone);
