//! Modularity of a community partition.
//!
//! # Overview
//!
//! Modularity compares the weight of edges inside communities with the
//! weight expected under a degree-preserving random null model:
//!
//! ```text
//! Q = Σ_c (internal[c] - total[c]² / M) / M
//! ```
//!
//! # Directed edges
//!
//! Directed edges are folded into the undirected formula:
//!
//! - if both `a → b` and `b → a` exist, the pair counts as one undirected
//!   edge `a - b`; each directed half contributes its weight once;
//! - if only `a → b` exists, it also counts as `a - b`, mirrored on the
//!   spot (total weight on both endpoints, doubled internal weight);
//! - if `a → b` and `b → a` carry different weights, each half contributes
//!   its own weight. Which half is visited first does not matter.
//!
//! Self-loops are ignored entirely: removing them leaves the score
//! unchanged.

use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::config::ModularityConfig;
use crate::error::{MetricsError, Result};
use crate::graph::{GraphAccess, edge_weight, validate};

/// Community label read from a node attribute.
///
/// Attribute values are compared by their canonical string form: strings
/// as-is, numbers and booleans through their display form. So `2` and
/// `"2"` name the same community.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommunityId(String);

impl CommunityId {
    /// Interpret an attribute value as a community label; `null` means
    /// unassigned.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            Value::Bool(b) => Some(Self(b.to_string())),
            Value::Array(_) | Value::Object(_) => Some(Self(value.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommunityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CommunityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for CommunityId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<i64> for CommunityId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// Modularity with communities read from each node's
/// `config.community_attribute`.
///
/// # Errors
///
/// - [`MetricsError::InvalidGraph`] if `graph` fails [`validate`];
/// - [`MetricsError::UnsupportedGraph`] if the graph is multi;
/// - [`MetricsError::EmptyGraph`] if there is no non-loop edge weight;
/// - [`MetricsError::PartitionIncomplete`] if an edge endpoint has no
///   community attribute (or a `null` one).
#[instrument(skip(graph, config), fields(attribute = %config.community_attribute))]
pub fn modularity<G>(graph: &G, config: &ModularityConfig) -> Result<f64>
where
    G: GraphAccess + ?Sized,
{
    score(graph, &config.weight_attribute, |node| {
        graph
            .node_attribute(node, &config.community_attribute)
            .as_ref()
            .and_then(CommunityId::from_value)
    })
}

/// Modularity with an explicit node → community partition.
///
/// `config.community_attribute` is ignored.
///
/// # Errors
///
/// As [`modularity`]; [`MetricsError::PartitionIncomplete`] is raised for
/// the first edge endpoint missing from `partition`.
#[instrument(skip(graph, partition, config), fields(assigned = partition.len()))]
pub fn modularity_with_partition<G, C, S>(
    graph: &G,
    partition: &HashMap<G::NodeId, C, S>,
    config: &ModularityConfig,
) -> Result<f64>
where
    G: GraphAccess + ?Sized,
    C: Eq + Hash,
    S: BuildHasher,
{
    score(graph, &config.weight_attribute, |node| partition.get(node))
}

/// Per-community accumulators for one edge pass.
#[derive(Debug, Clone, Copy, Default)]
struct CommunityWeight {
    internal: f64,
    total: f64,
}

#[allow(clippy::float_cmp)]
fn score<G, C, F>(graph: &G, weight_attribute: &str, mut community_of: F) -> Result<f64>
where
    G: GraphAccess + ?Sized,
    C: Eq + Hash,
    F: FnMut(&G::NodeId) -> Option<C>,
{
    validate(graph)?;

    if graph.is_multi() {
        return Err(MetricsError::UnsupportedGraph);
    }
    if graph.size() == 0 {
        return Err(MetricsError::EmptyGraph);
    }

    let mut communities: HashMap<C, CommunityWeight> = HashMap::new();
    let mut m = 0.0_f64;

    for edge in graph.edges() {
        let (source, target) = graph
            .extremities(&edge)
            .ok_or_else(|| MetricsError::invalid("an enumerated edge has no extremities"))?;

        if source == target {
            trace!(node = %source, "skipping self-loop");
            continue;
        }

        let source_community = community_of(&source).ok_or_else(|| {
            MetricsError::PartitionIncomplete {
                node: source.to_string(),
            }
        })?;
        let target_community = community_of(&target).ok_or_else(|| {
            MetricsError::PartitionIncomplete {
                node: target.to_string(),
            }
        })?;

        let weight = edge_weight(graph, &edge, weight_attribute);
        let reciprocal = graph.has_directed_edge(&target, &source);
        let mirrored = graph.is_undirected_edge(&edge) || !reciprocal;
        // A lone directed edge stands in for its missing mirror.
        let internal = if reciprocal { weight } else { 2.0 * weight };
        let same = source_community == target_community;

        let entry = communities.entry(source_community).or_default();
        entry.total += weight;
        if same {
            entry.internal += internal;
        }

        if mirrored {
            communities.entry(target_community).or_default().total += weight;
            m += 2.0 * weight;
        } else {
            m += weight;
        }
    }

    if m == 0.0 {
        return Err(MetricsError::EmptyGraph);
    }

    let q = communities
        .values()
        .map(|c| c.internal - c.total * c.total / m)
        .sum::<f64>()
        / m;

    debug!(
        edges = graph.size(),
        communities = communities.len(),
        modularity = q,
        "modularity computed"
    );
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::graph::AttributedGraph;
    use serde_json::json;

    fn partition(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(node, community)| ((*node).to_string(), (*community).to_string()))
            .collect()
    }

    #[test]
    fn community_ids_compare_by_canonical_string() {
        assert_eq!(
            CommunityId::from_value(&json!(2)),
            CommunityId::from_value(&json!("2"))
        );
        assert_eq!(CommunityId::from_value(&json!(true)), Some(CommunityId::from("true")));
        assert_eq!(CommunityId::from_value(&Value::Null), None);
        assert_eq!(CommunityId::from(7_u64).as_str(), "7");
    }

    #[test]
    fn reciprocal_pairs_score_like_undirected_edges() {
        let mut directed = AttributedGraph::directed();
        for (a, b) in [("a", "b"), ("b", "c"), ("c", "d")] {
            directed.add_edge(a, b).expect("add edge");
            directed.add_edge(b, a).expect("add reverse edge");
        }

        let mut undirected = AttributedGraph::undirected();
        for (a, b) in [("a", "b"), ("b", "c"), ("c", "d")] {
            undirected.add_edge(a, b).expect("add edge");
        }

        let p = partition(&[("a", "X"), ("b", "X"), ("c", "Y"), ("d", "Y")]);
        let config = ModularityConfig::default();

        let qd = modularity_with_partition(&directed, &p, &config).expect("directed score");
        let qu = modularity_with_partition(&undirected, &p, &config).expect("undirected score");

        assert!((qd - 1.0 / 6.0).abs() < 1e-12, "directed: {qd}");
        assert!((qu - 1.0 / 6.0).abs() < 1e-12, "undirected: {qu}");
    }

    #[test]
    fn self_loops_are_ignored() {
        let mut g = AttributedGraph::undirected();
        for (a, b) in [("a", "b"), ("b", "c"), ("a", "c"), ("c", "d")] {
            g.add_edge(a, b).expect("add edge");
        }
        let p = partition(&[("a", "X"), ("b", "X"), ("c", "X"), ("d", "Y")]);
        let config = ModularityConfig::default();
        let before = modularity_with_partition(&g, &p, &config).expect("score");

        g.add_weighted_edge("a", "a", 100.0).expect("self-loop");
        let after = modularity_with_partition(&g, &p, &config).expect("score");

        assert!((before - after).abs() < 1e-12, "{before} != {after}");
    }

    #[test]
    fn only_self_loops_is_empty() {
        let mut g = AttributedGraph::undirected();
        g.add_edge("a", "a").expect("self-loop");
        let err = modularity_with_partition(&g, &partition(&[("a", "X")]), &ModularityConfig::default())
            .expect_err("no scorable edge");
        assert_eq!(err, MetricsError::EmptyGraph);
    }

    #[test]
    fn multi_is_checked_before_emptiness() {
        let g = AttributedGraph::undirected().with_multi(true);
        let err = modularity(&g, &ModularityConfig::default()).expect_err("multi graph");
        assert_eq!(err.kind(), ErrorKind::UnsupportedGraph);
    }

    #[test]
    fn null_community_attribute_is_unassigned() {
        let mut g = AttributedGraph::undirected();
        let mut attrs = serde_json::Map::new();
        attrs.insert("community".to_string(), json!(0));
        g.add_node_with_attributes("a", attrs);
        let mut attrs = serde_json::Map::new();
        attrs.insert("community".to_string(), Value::Null);
        g.add_node_with_attributes("b", attrs);
        g.add_edge("a", "b").expect("add edge");

        let err = modularity(&g, &ModularityConfig::default()).expect_err("b is unassigned");
        assert_eq!(
            err,
            MetricsError::PartitionIncomplete {
                node: "b".to_string()
            }
        );
    }
}
