//! Graph metrics.
//!
//! - **Betweenness centrality** (`betweenness`): which nodes sit on the
//!   most shortest paths between other nodes?
//! - **Modularity** (`modularity`): how well does a partition separate the
//!   graph into densely connected communities?
//!
//! Both read the graph through [`GraphAccess`](crate::graph::GraphAccess)
//! and validate it before computing anything.
//!
//! ```rust,ignore
//! use graph_metrics::{AttributedGraph, BetweennessConfig, ModularityConfig};
//! use graph_metrics::metrics::{betweenness_centrality, modularity};
//!
//! let g: AttributedGraph = /* build graph */;
//!
//! let bc = betweenness_centrality(&g, &BetweennessConfig::default())?;
//! let q = modularity(&g, &ModularityConfig::default())?;
//! ```

pub mod betweenness;
pub mod modularity;

pub use betweenness::{assign_betweenness_centrality, betweenness_centrality};
pub use modularity::{CommunityId, modularity, modularity_with_partition};
