//! Dense, index-addressed snapshot of a [`GraphAccess`] used by the oracles.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{MetricsError, Result};
use crate::graph::{GraphAccess, edge_weight};

/// Bijection between a graph's node identifiers and `0..n`.
#[derive(Debug, Clone)]
pub struct NodeIndexer<N> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
}

impl<N: Clone + Eq + Hash> NodeIndexer<N> {
    #[must_use]
    pub fn new(nodes: Vec<N>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.clone(), i))
            .collect();
        Self { nodes, index }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    #[must_use]
    pub fn node(&self, index: usize) -> Option<&N> {
        self.nodes.get(index)
    }

    /// Pair every node with the value at its index.
    #[must_use]
    pub fn into_map(self, values: Vec<f64>) -> HashMap<N, f64> {
        self.nodes.into_iter().zip(values).collect()
    }
}

/// An outgoing arc in an [`Adjacency`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub target: usize,
    pub weight: f64,
}

/// Out-arcs per node index.
///
/// Self-loops are dropped and parallel arcs collapse to the lightest one, so
/// the breadth-first and Dijkstra oracles see the same simple topology.
/// Arcs are sorted by target for a deterministic traversal order.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    out: Vec<Vec<Neighbor>>,
}

impl Adjacency {
    /// Snapshot `graph`, reading arc weights from `weight_attribute` when
    /// given (missing or non-numeric weights count as 1).
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidGraph`] if an edge has no extremities
    /// or references a node that `nodes()` did not enumerate.
    pub fn from_graph<G: GraphAccess + ?Sized>(
        graph: &G,
        weight_attribute: Option<&str>,
    ) -> Result<(NodeIndexer<G::NodeId>, Self)> {
        let indexer = NodeIndexer::new(graph.nodes());
        let mut arcs = Vec::with_capacity(graph.size() * 2);

        for edge in graph.edges() {
            let (source, target) = graph
                .extremities(&edge)
                .ok_or_else(|| MetricsError::invalid("an enumerated edge has no extremities"))?;
            let lookup = |node: &G::NodeId| {
                indexer.index_of(node).ok_or_else(|| {
                    MetricsError::invalid(format!(
                        "edge endpoint \"{node}\" is not an enumerated node"
                    ))
                })
            };
            let (s, t) = (lookup(&source)?, lookup(&target)?);
            let weight = weight_attribute.map_or(1.0, |name| edge_weight(graph, &edge, name));

            arcs.push((s, t, weight));
            if graph.is_undirected_edge(&edge) {
                arcs.push((t, s, weight));
            }
        }

        let adjacency = Self::from_arcs(indexer.len(), &arcs);
        Ok((indexer, adjacency))
    }

    /// Build from explicit `(source, target, weight)` arcs over `n` nodes.
    ///
    /// # Panics
    ///
    /// Panics if an arc references an index `>= n`.
    #[must_use]
    pub fn from_arcs(n: usize, arcs: &[(usize, usize, f64)]) -> Self {
        let mut out: Vec<Vec<Neighbor>> = vec![Vec::new(); n];
        for &(source, target, weight) in arcs {
            if source != target {
                out[source].push(Neighbor { target, weight });
            }
        }
        for neighbors in &mut out {
            neighbors.sort_by(|a, b| {
                a.target
                    .cmp(&b.target)
                    .then_with(|| a.weight.total_cmp(&b.weight))
            });
            neighbors.dedup_by_key(|n| n.target);
        }
        Self { out }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.out.len()
    }

    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[Neighbor] {
        &self.out[node]
    }
}
