//! Single-source shortest-path oracles following the Brandes contract.
//!
//! # Contract
//!
//! Given an [`Adjacency`] and a source index, an oracle reports for the
//! subgraph reachable from the source:
//!
//! - `order`: reached nodes in non-decreasing distance, so popping from the
//!   end yields the farthest node first;
//! - `predecessors[w]`: every `v` such that arc `(v, w)` lies on a shortest
//!   path from the source to `w`;
//! - `sigma[w]`: the number of distinct shortest paths from the source to
//!   `w`, with `sigma[source] = 1`.
//!
//! Unreached nodes are absent from `order` and have `sigma = 0`.
//!
//! # Variants
//!
//! - [`BreadthFirst`]: hop-count distances, weights ignored. O(V + E).
//! - [`Dijkstra`]: sum-of-weights distances. Weights must be non-negative;
//!   this is not checked. O((V + E) log V).

pub mod adjacency;
pub mod dijkstra;
pub mod unweighted;

pub use adjacency::{Adjacency, Neighbor, NodeIndexer};
pub use dijkstra::Dijkstra;
pub use unweighted::BreadthFirst;

/// Output of one oracle run.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandesPaths {
    pub order: Vec<usize>,
    pub predecessors: Vec<Vec<usize>>,
    pub sigma: Vec<f64>,
}

impl BrandesPaths {
    fn with_capacity(n: usize) -> Self {
        Self {
            order: Vec::with_capacity(n),
            predecessors: vec![Vec::new(); n],
            sigma: vec![0.0; n],
        }
    }
}

/// A single-source shortest-path traversal producing [`BrandesPaths`].
pub trait ShortestPathOracle: Sync {
    fn brandes(&self, adjacency: &Adjacency, source: usize) -> BrandesPaths;
}

/// Select the oracle for weighted or unweighted traversal.
#[must_use]
pub fn oracle_for(weighted: bool) -> &'static dyn ShortestPathOracle {
    if weighted { &Dijkstra } else { &BreadthFirst }
}
