//! Graph access contract consumed by every metric.
//!
//! # Overview
//!
//! Metrics never own topology. They read it through [`GraphAccess`], a
//! capability set any graph type can implement: node and edge enumeration,
//! edge endpoints, reciprocity queries, graph-kind flags, and attribute
//! reads. [`GraphAccessMut`] adds the single write the metrics perform:
//! storing a computed scalar on a node.
//!
//! [`validate`] is run once at every metric entry point. It rejects an
//! implementation whose enumerations disagree with each other before any
//! computation starts.
//!
//! ## Edge Direction
//!
//! In a [`GraphKind::Mixed`] graph each edge carries its own directedness,
//! reported by [`GraphAccess::is_undirected_edge`]. A directed edge `a → b`
//! is traversable from `a` only; an undirected edge is traversable both ways.
//!
//! ## Reference Implementation
//!
//! [`memory::AttributedGraph`] is a petgraph-backed implementation used by
//! tests and benches, and by callers without a graph type of their own.

pub mod memory;

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MetricsError, Result};

pub use memory::AttributedGraph;

/// Overall directedness of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Directed,
    Undirected,
    /// Edges may be individually directed or undirected.
    Mixed,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
            Self::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// Read access to an externally-owned graph.
pub trait GraphAccess {
    /// Opaque node identifier, unique and stable for one computation.
    type NodeId: Clone + Eq + Hash + fmt::Display;
    /// Opaque edge identifier.
    type EdgeId: Clone;

    fn kind(&self) -> GraphKind;

    /// Whether the graph permits parallel edges between the same endpoints.
    fn is_multi(&self) -> bool;

    /// Number of nodes.
    fn order(&self) -> usize;

    /// Number of edges.
    fn size(&self) -> usize;

    fn nodes(&self) -> Vec<Self::NodeId>;

    fn edges(&self) -> Vec<Self::EdgeId>;

    /// `(source, target)` of an edge, or `None` if the edge is unknown.
    ///
    /// For undirected edges the order is the insertion order.
    fn extremities(&self, edge: &Self::EdgeId) -> Option<(Self::NodeId, Self::NodeId)>;

    fn is_undirected_edge(&self, _edge: &Self::EdgeId) -> bool {
        self.kind() == GraphKind::Undirected
    }

    /// Whether a *directed* edge `source → target` exists.
    fn has_directed_edge(&self, source: &Self::NodeId, target: &Self::NodeId) -> bool;

    fn node_attribute(&self, node: &Self::NodeId, name: &str) -> Option<Value>;

    fn edge_attribute(&self, edge: &Self::EdgeId, name: &str) -> Option<Value>;
}

/// Write access used by the `assign_*` metric variants.
pub trait GraphAccessMut: GraphAccess {
    fn set_node_attribute(&mut self, node: &Self::NodeId, name: &str, value: Value);
}

/// Check that `graph` honours the [`GraphAccess`] contract.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidGraph`] if node identifiers repeat, if
/// `order()`/`size()` disagree with the enumerations, or if an edge has no
/// extremities or references a node that was not enumerated.
pub fn validate<G: GraphAccess + ?Sized>(graph: &G) -> Result<()> {
    let nodes = graph.nodes();
    let mut known: HashSet<&G::NodeId> = HashSet::with_capacity(nodes.len());

    for node in &nodes {
        if !known.insert(node) {
            return Err(MetricsError::invalid(format!(
                "node \"{node}\" is enumerated twice"
            )));
        }
    }

    if nodes.len() != graph.order() {
        return Err(MetricsError::invalid(format!(
            "order() is {} but {} nodes were enumerated",
            graph.order(),
            nodes.len()
        )));
    }

    let edges = graph.edges();
    if edges.len() != graph.size() {
        return Err(MetricsError::invalid(format!(
            "size() is {} but {} edges were enumerated",
            graph.size(),
            edges.len()
        )));
    }

    for edge in &edges {
        let Some((source, target)) = graph.extremities(edge) else {
            return Err(MetricsError::invalid("an enumerated edge has no extremities"));
        };
        for endpoint in [&source, &target] {
            if !known.contains(endpoint) {
                return Err(MetricsError::invalid(format!(
                    "edge endpoint \"{endpoint}\" is not an enumerated node"
                )));
            }
        }
    }

    Ok(())
}

/// Resolve a numeric edge weight, falling back to 1 when the attribute is
/// missing, not a number, or NaN.
pub(crate) fn edge_weight<G: GraphAccess + ?Sized>(
    graph: &G,
    edge: &G::EdgeId,
    attribute: &str,
) -> f64 {
    graph
        .edge_attribute(edge, attribute)
        .and_then(|value| value.as_f64())
        .filter(|w| !w.is_nan())
        .unwrap_or(1.0)
}
