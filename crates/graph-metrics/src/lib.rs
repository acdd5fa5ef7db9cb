#![forbid(unsafe_code)]
//! graph-metrics library.
//!
//! Betweenness centrality and partition modularity over any graph that
//! implements [`GraphAccess`].
//!
//! # Conventions
//!
//! - **Errors**: metric entry points return [`error::Result`] with a typed
//!   [`MetricsError`]; configuration loading uses `anyhow::Result`.
//! - **Logging**: `tracing` spans on public metrics, `debug!` summaries on
//!   completion. No subscriber is installed here.

pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod shortest_path;

pub use config::{BetweennessConfig, MetricsConfig, ModularityConfig, load_metrics_config};
pub use error::{ErrorKind, GraphError, MetricsError};
pub use graph::{AttributedGraph, GraphAccess, GraphAccessMut, GraphKind};
pub use metrics::{
    CommunityId, assign_betweenness_centrality, betweenness_centrality, modularity,
    modularity_with_partition,
};
