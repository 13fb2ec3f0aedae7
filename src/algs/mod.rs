//! Re-export public algorithms.

pub mod assemble;
pub mod bfs;
pub mod check;
pub mod direction;
pub mod frontier;
pub mod step;

pub use assemble::{
    BfsResult, OutputFormat, RoundInfo, SparseRecord, UNREACHED, VertexRecord,
};
pub use bfs::{BfsBuilder, BfsConfig, bfs, breadth_first_search, breadth_first_search_batch};
pub use check::check_bfs;
pub use direction::{Direction, DirectionPolicy, HysteresisConfig};

static_assertions::assert_impl_all!(BfsResult: Send, Sync);
