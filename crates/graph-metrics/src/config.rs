//! Metric configuration.
//!
//! Each metric takes its own config struct; [`MetricsConfig`] bundles them
//! for loading from a TOML file:
//!
//! ```toml
//! [betweenness]
//! weighted = true
//! normalized = false
//! weight_attribute = "cost"
//! centrality_attribute = "bc"
//!
//! [modularity]
//! community_attribute = "cluster"
//! ```
//!
//! Every field is optional and falls back to its documented default.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for betweenness centrality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetweennessConfig {
    /// Use edge weights (Dijkstra) instead of hop counts (BFS).
    /// Default: false.
    #[serde(default)]
    pub weighted: bool,
    /// Rescale by `1 / ((n-1)(n-2))`.
    /// Default: true.
    #[serde(default = "default_true")]
    pub normalized: bool,
    /// Edge attribute read as the weight when `weighted` is set.
    /// Default: `"weight"`.
    #[serde(default = "default_weight_attribute")]
    pub weight_attribute: String,
    /// Node attribute written by the assign variant.
    /// Default: `"centrality"`.
    #[serde(default = "default_centrality_attribute")]
    pub centrality_attribute: String,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self {
            weighted: false,
            normalized: default_true(),
            weight_attribute: default_weight_attribute(),
            centrality_attribute: default_centrality_attribute(),
        }
    }
}

impl BetweennessConfig {
    #[must_use]
    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    #[must_use]
    pub fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }
}

/// Configuration for modularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModularityConfig {
    /// Node attribute holding the community label when no explicit partition
    /// is supplied. Default: `"community"`.
    #[serde(default = "default_community_attribute")]
    pub community_attribute: String,
    /// Edge attribute read as the weight. Default: `"weight"`.
    #[serde(default = "default_weight_attribute")]
    pub weight_attribute: String,
}

impl Default for ModularityConfig {
    fn default() -> Self {
        Self {
            community_attribute: default_community_attribute(),
            weight_attribute: default_weight_attribute(),
        }
    }
}

/// All metric configuration, as stored in a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub betweenness: BetweennessConfig,
    #[serde(default)]
    pub modularity: ModularityConfig,
}

impl MetricsConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or has fields of
    /// the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse metrics config")
    }
}

/// Load a [`MetricsConfig`] from `path`, or defaults if the file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_metrics_config(path: &Path) -> Result<MetricsConfig> {
    if !path.exists() {
        return Ok(MetricsConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<MetricsConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_true() -> bool {
    true
}

fn default_weight_attribute() -> String {
    "weight".to_string()
}

fn default_centrality_attribute() -> String {
    "centrality".to_string()
}

fn default_community_attribute() -> String {
    "community".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documentation() {
        let bc = BetweennessConfig::default();
        assert!(!bc.weighted);
        assert!(bc.normalized);
        assert_eq!(bc.weight_attribute, "weight");
        assert_eq!(bc.centrality_attribute, "centrality");

        let md = ModularityConfig::default();
        assert_eq!(md.community_attribute, "community");
        assert_eq!(md.weight_attribute, "weight");
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = MetricsConfig::from_toml_str("").expect("parse empty");
        assert_eq!(config, MetricsConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = MetricsConfig::from_toml_str(
            r#"
            [betweenness]
            weighted = true
            weight_attribute = "cost"

            [modularity]
            community_attribute = "cluster"
            "#,
        )
        .expect("parse config");

        assert!(config.betweenness.weighted);
        assert!(config.betweenness.normalized);
        assert_eq!(config.betweenness.weight_attribute, "cost");
        assert_eq!(config.betweenness.centrality_attribute, "centrality");
        assert_eq!(config.modularity.community_attribute, "cluster");
        assert_eq!(config.modularity.weight_attribute, "weight");
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = MetricsConfig::from_toml_str("[betweenness]\nweighted = \"yes\"\n")
            .expect_err("string is not a bool");
        assert!(err.to_string().contains("metrics config"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config =
            load_metrics_config(&dir.path().join("metrics.toml")).expect("load missing file");
        assert_eq!(config, MetricsConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[betweenness]\nnormalized = false").expect("write config");

        let config = load_metrics_config(file.path()).expect("load config");
        assert!(!config.betweenness.normalized);
    }

    #[test]
    fn builder_toggles() {
        let config = BetweennessConfig::default().weighted(true).normalized(false);
        assert!(config.weighted);
        assert!(!config.normalized);
    }
}
