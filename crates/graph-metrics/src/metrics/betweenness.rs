//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness nodes are bridges: removing
//! them lengthens or breaks many shortest paths.
//!
//! # Algorithm
//!
//! 1. For each source node `s`, run a [`ShortestPathOracle`] to get the
//!    finishing order, shortest-path predecessors and path counts.
//! 2. Replay the finishing order from the end (farthest nodes first) and
//!    accumulate pairwise dependencies into predecessors.
//! 3. Sum the dependencies across all sources, then rescale.
//!
//! Complexity: O(V * E) unweighted, O(V * E log V) weighted.
//!
//! # Scaling
//!
//! - normalized, n > 2: `1 / ((n-1)(n-2))`;
//! - normalized, n <= 2: none (every score is already 0);
//! - not normalized, undirected graph: `0.5`, since each pair is reached
//!   from both endpoints;
//! - not normalized, directed or mixed graph: none.
//!
//! # Parallelism
//!
//! With the `parallel` feature, sources are processed on the rayon pool and
//! per-worker partial sums are merged afterwards. Summation order then
//! varies between runs, so scores may differ in the least-significant
//! digits from the sequential build.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::BetweennessConfig;
use crate::error::Result;
use crate::graph::{GraphAccess, GraphAccessMut, GraphKind, validate};
use crate::shortest_path::{Adjacency, ShortestPathOracle, oracle_for};

/// Compute betweenness centrality for every node.
///
/// # Returns
///
/// A map from node ID to score. Isolated nodes and graphs with fewer than
/// three nodes score 0; an empty graph yields an empty map.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidGraph`](crate::MetricsError::InvalidGraph)
/// if `graph` fails [`validate`].
#[instrument(skip(graph, config), fields(weighted = config.weighted, normalized = config.normalized))]
pub fn betweenness_centrality<G>(
    graph: &G,
    config: &BetweennessConfig,
) -> Result<HashMap<G::NodeId, f64>>
where
    G: GraphAccess + ?Sized,
{
    validate(graph)?;

    let weight_attribute = config.weighted.then_some(config.weight_attribute.as_str());
    let (indexer, adjacency) = Adjacency::from_graph(graph, weight_attribute)?;
    let n = indexer.len();

    let mut centrality = accumulate(&adjacency, oracle_for(config.weighted));

    if let Some(scale) = scale_factor(n, config.normalized, graph.kind()) {
        for score in &mut centrality {
            *score *= scale;
        }
    }

    debug!(nodes = n, edges = graph.size(), "betweenness computed");
    Ok(indexer.into_map(centrality))
}

/// Compute betweenness centrality and store each score on its node under
/// `config.centrality_attribute`.
///
/// Returns the same map as [`betweenness_centrality`].
///
/// # Errors
///
/// See [`betweenness_centrality`]. Nothing is written on error.
#[instrument(skip(graph, config), fields(attribute = %config.centrality_attribute))]
pub fn assign_betweenness_centrality<G>(
    graph: &mut G,
    config: &BetweennessConfig,
) -> Result<HashMap<G::NodeId, f64>>
where
    G: GraphAccessMut + ?Sized,
{
    let scores = betweenness_centrality(&*graph, config)?;
    for (node, score) in &scores {
        graph.set_node_attribute(node, &config.centrality_attribute, Value::from(*score));
    }
    Ok(scores)
}

/// Scale applied after accumulation, or `None` to leave raw sums.
#[allow(clippy::cast_precision_loss)]
fn scale_factor(n: usize, normalized: bool, kind: GraphKind) -> Option<f64> {
    if normalized {
        (n > 2).then(|| 1.0 / ((n - 1) * (n - 2)) as f64)
    } else {
        (kind == GraphKind::Undirected).then_some(0.5)
    }
}

/// Run the oracle from every source and sum the dependencies per node.
#[cfg(not(feature = "parallel"))]
fn accumulate(adjacency: &Adjacency, oracle: &dyn ShortestPathOracle) -> Vec<f64> {
    let n = adjacency.node_count();
    let mut centrality = vec![0.0; n];
    let mut delta = vec![0.0; n];

    for source in 0..n {
        accumulate_source(adjacency, oracle, source, &mut centrality, &mut delta);
    }

    centrality
}

/// Run the oracle from every source on the rayon pool; each worker folds
/// into its own partial vector and the partials are summed.
#[cfg(feature = "parallel")]
fn accumulate(adjacency: &Adjacency, oracle: &dyn ShortestPathOracle) -> Vec<f64> {
    let n = adjacency.node_count();

    (0..n)
        .into_par_iter()
        .fold(
            || (vec![0.0; n], vec![0.0; n]),
            |(mut partial, mut delta), source| {
                accumulate_source(adjacency, oracle, source, &mut partial, &mut delta);
                (partial, delta)
            },
        )
        .map(|(partial, _)| partial)
        .reduce(
            || vec![0.0; n],
            |mut left, right| {
                for (l, r) in left.iter_mut().zip(right) {
                    *l += r;
                }
                left
            },
        )
}

/// Add the dependencies of every node on `source` into `centrality`.
///
/// `delta` is scratch space of length n; only entries reached from `source`
/// are touched and they are reset before use.
fn accumulate_source(
    adjacency: &Adjacency,
    oracle: &dyn ShortestPathOracle,
    source: usize,
    centrality: &mut [f64],
    delta: &mut [f64],
) {
    let mut paths = oracle.brandes(adjacency, source);

    for &w in &paths.order {
        delta[w] = 0.0;
    }

    // Farthest first.
    while let Some(w) = paths.order.pop() {
        let coefficient = (1.0 + delta[w]) / paths.sigma[w];

        for &v in &paths.predecessors[w] {
            delta[v] += paths.sigma[v] * coefficient;
        }

        if w != source {
            centrality[w] += delta[w];
        }
    }
}
