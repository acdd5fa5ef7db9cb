//! In-memory attributed graph backed by petgraph.
//!
//! [`AttributedGraph`] stores every edge as a petgraph arc and records on
//! the arc whether it is directed. An undirected edge is stored once, in
//! insertion order, and reported with that order by
//! [`GraphAccess::extremities`].
//!
//! Node identifiers are strings. Endpoints that do not exist yet are created
//! when an edge is added.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde_json::{Map, Value};

use super::{GraphAccess, GraphAccessMut, GraphKind};
use crate::error::GraphError;

/// Payload of a node: its identifier and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub id: String,
    pub attributes: Map<String, Value>,
}

/// Payload of an edge: its directedness and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    pub directed: bool,
    pub attributes: Map<String, Value>,
}

/// A directed, undirected, or mixed graph with JSON attributes on nodes and
/// edges.
#[derive(Debug, Clone)]
pub struct AttributedGraph {
    /// Storage graph: undirected edges are single arcs with `directed = false`.
    pub graph: DiGraph<NodeData, EdgeData>,
    /// Mapping from node ID to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    kind: GraphKind,
    multi: bool,
}

impl AttributedGraph {
    #[must_use]
    pub fn new(kind: GraphKind) -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            kind,
            multi: false,
        }
    }

    #[must_use]
    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    #[must_use]
    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    #[must_use]
    pub fn mixed() -> Self {
        Self::new(GraphKind::Mixed)
    }

    /// Allow or forbid parallel edges between the same endpoints.
    #[must_use]
    pub fn with_multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    /// Add a node, or return the existing index if the ID is already present.
    pub fn add_node(&mut self, id: impl Into<String>) -> NodeIndex {
        let id = id.into();
        if let Some(&idx) = self.node_map.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData {
            id: id.clone(),
            attributes: Map::new(),
        });
        self.node_map.insert(id, idx);
        idx
    }

    /// Add a node (if missing) and merge `attributes` into its attributes.
    pub fn add_node_with_attributes(
        &mut self,
        id: impl Into<String>,
        attributes: Map<String, Value>,
    ) -> NodeIndex {
        let idx = self.add_node(id);
        self.graph[idx].attributes.extend(attributes);
        idx
    }

    /// Add an edge whose directedness follows the graph kind: undirected in
    /// undirected graphs, directed otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateEdge`] if the edge exists in a simple
    /// graph.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<EdgeIndex, GraphError> {
        self.insert_edge(source, target, self.default_directed(), Map::new())
    }

    /// Add an edge with a numeric `weight` attribute.
    ///
    /// # Errors
    ///
    /// See [`Self::add_edge`].
    pub fn add_weighted_edge(
        &mut self,
        source: &str,
        target: &str,
        weight: f64,
    ) -> Result<EdgeIndex, GraphError> {
        let mut attributes = Map::new();
        attributes.insert("weight".to_string(), Value::from(weight));
        self.insert_edge(source, target, self.default_directed(), attributes)
    }

    /// Add an edge with arbitrary attributes.
    ///
    /// # Errors
    ///
    /// See [`Self::add_edge`].
    pub fn add_edge_with_attributes(
        &mut self,
        source: &str,
        target: &str,
        attributes: Map<String, Value>,
    ) -> Result<EdgeIndex, GraphError> {
        self.insert_edge(source, target, self.default_directed(), attributes)
    }

    /// # Errors
    ///
    /// Returns [`GraphError::KindMismatch`] on an undirected graph, or
    /// [`GraphError::DuplicateEdge`] if the edge exists in a simple graph.
    pub fn add_directed_edge(
        &mut self,
        source: &str,
        target: &str,
    ) -> Result<EdgeIndex, GraphError> {
        self.insert_edge(source, target, true, Map::new())
    }

    /// # Errors
    ///
    /// Returns [`GraphError::KindMismatch`] on a directed graph, or
    /// [`GraphError::DuplicateEdge`] if the edge exists in a simple graph.
    pub fn add_undirected_edge(
        &mut self,
        source: &str,
        target: &str,
    ) -> Result<EdgeIndex, GraphError> {
        self.insert_edge(source, target, false, Map::new())
    }

    /// Set (or overwrite) an attribute on an existing edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgeNotFound`] if `edge` is not in the graph.
    pub fn set_edge_attribute(
        &mut self,
        edge: EdgeIndex,
        name: &str,
        value: Value,
    ) -> Result<(), GraphError> {
        let data = self
            .graph
            .edge_weight_mut(edge)
            .ok_or(GraphError::EdgeNotFound(edge.index()))?;
        data.attributes.insert(name.to_string(), value);
        Ok(())
    }

    /// Look up the `NodeIndex` for a node ID.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    const fn default_directed(&self) -> bool {
        !matches!(self.kind, GraphKind::Undirected)
    }

    fn insert_edge(
        &mut self,
        source: &str,
        target: &str,
        directed: bool,
        attributes: Map<String, Value>,
    ) -> Result<EdgeIndex, GraphError> {
        match (self.kind, directed) {
            (GraphKind::Directed, false) => {
                return Err(GraphError::KindMismatch {
                    kind: self.kind,
                    edge: "undirected",
                });
            }
            (GraphKind::Undirected, true) => {
                return Err(GraphError::KindMismatch {
                    kind: self.kind,
                    edge: "directed",
                });
            }
            _ => {}
        }

        let s = self.add_node(source);
        let t = self.add_node(target);

        if !self.multi && self.contains_edge(s, t, directed) {
            return Err(GraphError::DuplicateEdge {
                from: source.to_string(),
                to: target.to_string(),
            });
        }

        Ok(self.graph.add_edge(s, t, EdgeData { directed, attributes }))
    }

    fn contains_edge(&self, s: NodeIndex, t: NodeIndex, directed: bool) -> bool {
        if directed {
            return self
                .graph
                .edges_connecting(s, t)
                .any(|e| e.weight().directed);
        }
        self.graph
            .edges_connecting(s, t)
            .chain(self.graph.edges_connecting(t, s))
            .any(|e| !e.weight().directed)
    }
}

impl GraphAccess for AttributedGraph {
    type NodeId = String;
    type EdgeId = EdgeIndex;

    fn kind(&self) -> GraphKind {
        self.kind
    }

    fn is_multi(&self) -> bool {
        self.multi
    }

    fn order(&self) -> usize {
        self.graph.node_count()
    }

    fn size(&self) -> usize {
        self.graph.edge_count()
    }

    fn nodes(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].id.clone())
            .collect()
    }

    fn edges(&self) -> Vec<EdgeIndex> {
        self.graph.edge_indices().collect()
    }

    fn extremities(&self, edge: &EdgeIndex) -> Option<(String, String)> {
        self.graph
            .edge_endpoints(*edge)
            .map(|(s, t)| (self.graph[s].id.clone(), self.graph[t].id.clone()))
    }

    fn is_undirected_edge(&self, edge: &EdgeIndex) -> bool {
        self.graph.edge_weight(*edge).is_some_and(|e| !e.directed)
    }

    fn has_directed_edge(&self, source: &String, target: &String) -> bool {
        let (Some(s), Some(t)) = (self.node_index(source), self.node_index(target)) else {
            return false;
        };
        self.graph
            .edges_connecting(s, t)
            .any(|e| e.weight().directed)
    }

    fn node_attribute(&self, node: &String, name: &str) -> Option<Value> {
        let idx = self.node_index(node)?;
        self.graph[idx].attributes.get(name).cloned()
    }

    fn edge_attribute(&self, edge: &EdgeIndex, name: &str) -> Option<Value> {
        self.graph.edge_weight(*edge)?.attributes.get(name).cloned()
    }
}

impl GraphAccessMut for AttributedGraph {
    fn set_node_attribute(&mut self, node: &String, name: &str, value: Value) {
        if let Some(idx) = self.node_index(node) {
            self.graph[idx].attributes.insert(name.to_string(), value);
        }
    }
}
