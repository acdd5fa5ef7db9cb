use std::fmt;

use crate::graph::GraphKind;

/// Machine-readable classification of a [`MetricsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidGraph,
    UnsupportedGraph,
    EmptyGraph,
    PartitionIncomplete,
}

impl ErrorKind {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidGraph => "E1001",
            Self::UnsupportedGraph => "E1002",
            Self::EmptyGraph => "E1003",
            Self::PartitionIncomplete => "E2001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidGraph => "Graph does not satisfy the access contract",
            Self::UnsupportedGraph => "Multi graphs are not handled",
            Self::EmptyGraph => "Graph has no edges",
            Self::PartitionIncomplete => "Node missing from partition",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidGraph => {
                Some("Check that every enumerated edge references enumerated nodes.")
            }
            Self::UnsupportedGraph => Some("Collapse parallel edges before scoring."),
            Self::EmptyGraph => None,
            Self::PartitionIncomplete => {
                Some("Assign a community to every node that touches an edge.")
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the metric entry points.
///
/// All of them are detected synchronously before or during a single pass;
/// none is transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricsError {
    /// The graph does not satisfy the [`GraphAccess`](crate::graph::GraphAccess) contract.
    #[error("the given graph is not a valid graph instance: {reason}")]
    InvalidGraph { reason: String },

    /// Modularity was asked for on a graph that permits parallel edges.
    #[error("multi graphs are not handled")]
    UnsupportedGraph,

    /// Modularity was asked for on a graph with no scorable edges.
    #[error("the given graph has no edges")]
    EmptyGraph,

    /// An edge endpoint has no resolvable community.
    #[error("the \"{node}\" node is not in the partition")]
    PartitionIncomplete { node: String },
}

impl MetricsError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidGraph { .. } => ErrorKind::InvalidGraph,
            Self::UnsupportedGraph => ErrorKind::UnsupportedGraph,
            Self::EmptyGraph => ErrorKind::EmptyGraph,
            Self::PartitionIncomplete { .. } => ErrorKind::PartitionIncomplete,
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidGraph {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors raised while building an [`AttributedGraph`](crate::graph::memory::AttributedGraph).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("cannot add a {edge} edge to a {kind} graph")]
    KindMismatch { kind: GraphKind, edge: &'static str },

    #[error("edge {from} -> {to} already exists and the graph is not multi")]
    DuplicateEdge { from: String, to: String },

    #[error("edge index {0} does not exist")]
    EdgeNotFound(usize),
}
