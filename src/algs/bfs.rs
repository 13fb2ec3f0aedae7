//! Direction-optimizing breadth-first search entry points.
//!
//! The round loop is strictly sequential: select a direction, run one
//! parallel step, absorb the new frontier, repeat until the frontier is empty
//! or every vertex is visited.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algs::assemble::{BfsResult, OutputFormat, ResultRecord, RoundInfo};
use crate::algs::direction::{DirectionPolicy, DirectionSelector, TraversalStats};
use crate::algs::frontier::Frontier;
use crate::algs::step::StepExecutor;
use crate::bfs_error::BfsError;
use crate::debug_invariants::DebugInvariants;
use crate::topology::adapter::GraphAdapter;
use crate::topology::adjacency::Adjacency;

/// Tuning and output options of one traversal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BfsConfig {
    pub policy: DirectionPolicy,
    pub output: OutputFormat,
    /// Stop after assigning this level; `None` searches the whole component.
    pub max_level: Option<usize>,
    /// Verify that the transpose matches the graph before the first round.
    pub validate_transpose: bool,
}

impl Default for BfsConfig {
    fn default() -> Self {
        Self {
            policy: DirectionPolicy::default(),
            output: OutputFormat::Dense,
            max_level: None,
            validate_transpose: false,
        }
    }
}

pub struct BfsBuilder<'a, G: Adjacency> {
    graph: Option<&'a G>,
    transpose: Option<&'a G>,
    source: usize,
    want_levels: bool,
    want_parents: bool,
    config: BfsConfig,
    /// Called with the upcoming round number; returning true cancels.
    cancel: Option<&'a dyn Fn(usize) -> bool>,
}

impl<'a, G: Adjacency> BfsBuilder<'a, G> {
    /// Traversal over `graph` (forward orientation); push-only unless a
    /// transpose is added.
    pub fn new(graph: &'a G) -> Self {
        Self::from_parts(Some(graph), None)
    }

    /// Traversal from whichever orientations are available.
    pub fn from_parts(graph: Option<&'a G>, transpose: Option<&'a G>) -> Self {
        Self {
            graph,
            transpose,
            source: 0,
            want_levels: true,
            want_parents: true,
            config: BfsConfig::default(),
            cancel: None,
        }
    }

    /// Pull-only traversal driven by the transpose alone.
    pub fn transpose_only(transpose: &'a G) -> Self {
        Self::from_parts(None, Some(transpose))
    }

    /// Supply `Aᵀ`, enabling pull steps. Must match the graph's edge set.
    pub fn transpose(mut self, at: &'a G) -> Self {
        self.transpose = Some(at);
        self
    }
    pub fn source(mut self, s: usize) -> Self {
        self.source = s;
        self
    }
    pub fn levels(mut self, on: bool) -> Self {
        self.want_levels = on;
        self
    }
    pub fn parents(mut self, on: bool) -> Self {
        self.want_parents = on;
        self
    }
    pub fn policy(mut self, p: DirectionPolicy) -> Self {
        self.config.policy = p;
        self
    }
    pub fn output(mut self, f: OutputFormat) -> Self {
        self.config.output = f;
        self
    }
    pub fn max_level(mut self, l: Option<usize>) -> Self {
        self.config.max_level = l;
        self
    }
    pub fn validate_transpose(mut self, on: bool) -> Self {
        self.config.validate_transpose = on;
        self
    }
    pub fn config(mut self, cfg: BfsConfig) -> Self {
        self.config = cfg;
        self
    }
    pub fn cancel_when(mut self, f: &'a dyn Fn(usize) -> bool) -> Self {
        self.cancel = Some(f);
        self
    }

    pub fn run(self) -> Result<BfsResult, BfsError> {
        let BfsBuilder {
            graph,
            transpose,
            source,
            want_levels,
            want_parents,
            config,
            cancel,
        } = self;

        let adapter = GraphAdapter::new(graph, transpose)?;
        adapter.check_source(source)?;
        if config.validate_transpose {
            adapter.validate_transpose()?;
        }
        let n = adapter.vertex_count();
        let mut record = ResultRecord::new(n, source, want_levels, want_parents)?;
        let executor = StepExecutor::new(adapter)?;
        let mut selector = DirectionSelector::new(config.policy, &adapter);
        let mut stats = TraversalStats::seeded();
        let mut frontier = Frontier::seed(source);
        let mut rounds = Vec::new();
        let max_level = config.max_level.unwrap_or(usize::MAX);

        let mut round = 1;
        while record.visited() < n && round <= max_level {
            if let Some(f) = cancel
                && f(round)
            {
                return Err(BfsError::Cancelled { round });
            }
            let direction = selector.select(&frontier, &stats, &adapter);
            frontier = executor.step(frontier, direction, &record, round)?;
            let nq = frontier.len();
            log::debug!("bfs round {round}: {direction:?}, frontier {nq}");
            rounds.push(RoundInfo {
                round,
                direction,
                frontier: nq,
            });
            if nq == 0 {
                break;
            }
            let delta = record.absorb(&frontier, round);
            stats.advance(nq, delta);
            round += 1;
        }

        let result = record.finish(config.output, rounds);
        result.debug_assert_invariants();
        Ok(result)
    }
}

/// Levels and parents from `source` with the default configuration.
pub fn breadth_first_search<G: Adjacency>(
    graph: &G,
    transpose: Option<&G>,
    source: usize,
) -> Result<BfsResult, BfsError> {
    BfsBuilder::from_parts(Some(graph), transpose)
        .source(source)
        .run()
}

/// General entry point: any combination of orientations and outputs.
pub fn bfs<G: Adjacency>(
    graph: Option<&G>,
    transpose: Option<&G>,
    source: usize,
    want_levels: bool,
    want_parents: bool,
    config: &BfsConfig,
) -> Result<BfsResult, BfsError> {
    BfsBuilder::from_parts(graph, transpose)
        .source(source)
        .levels(want_levels)
        .parents(want_parents)
        .config(*config)
        .run()
}

/// Independent traversals from several sources, run in parallel over the
/// shared read-only graph. Results are in the order of `sources`.
pub fn breadth_first_search_batch<G: Adjacency>(
    graph: Option<&G>,
    transpose: Option<&G>,
    sources: &[usize],
    config: &BfsConfig,
) -> Vec<Result<BfsResult, BfsError>> {
    sources
        .par_iter()
        .map(|&s| bfs(graph, transpose, s, true, true, config))
        .collect()
}
