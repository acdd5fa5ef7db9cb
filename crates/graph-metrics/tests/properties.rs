use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use serde_json::{Map, json};

use graph_metrics::{
    AttributedGraph, BetweennessConfig, ModularityConfig, betweenness_centrality, modularity,
    modularity_with_partition,
};

/// A random simple undirected graph: node count, weighted edges (integer
/// weights so sums stay exact), and a community per node.
#[derive(Debug, Clone)]
struct Sample {
    nodes: usize,
    edges: Vec<(usize, usize, u8)>,
    communities: Vec<u8>,
}

fn arb_sample() -> impl Strategy<Value = Sample> {
    (1usize..12).prop_flat_map(|nodes| {
        (
            Just(nodes),
            prop::collection::vec((0..nodes, 0..nodes, 1u8..5), 0..30),
            prop::collection::vec(0u8..3, nodes),
        )
            .prop_map(|(nodes, raw, communities)| {
                let mut seen = BTreeSet::new();
                let edges = raw
                    .into_iter()
                    .filter(|(a, b, _)| a != b && seen.insert((*a.min(b), *a.max(b))))
                    .collect();
                Sample {
                    nodes,
                    edges,
                    communities,
                }
            })
    })
}

fn build(sample: &Sample, weight_scale: f64) -> AttributedGraph {
    let mut g = AttributedGraph::undirected();
    for (node, community) in sample.communities.iter().enumerate() {
        let mut attributes = Map::new();
        attributes.insert("community".to_string(), json!(community));
        g.add_node_with_attributes(node.to_string(), attributes);
    }
    for (a, b, w) in &sample.edges {
        g.add_weighted_edge(&a.to_string(), &b.to_string(), f64::from(*w) * weight_scale)
            .expect("edges are deduplicated");
    }
    g
}

fn build_unit(sample: &Sample) -> AttributedGraph {
    let mut g = AttributedGraph::undirected();
    for node in 0..sample.nodes {
        g.add_node(node.to_string());
    }
    for (a, b, _) in &sample.edges {
        g.add_weighted_edge(&a.to_string(), &b.to_string(), 1.0)
            .expect("edges are deduplicated");
    }
    g
}

fn partition(sample: &Sample) -> HashMap<String, u8> {
    sample
        .communities
        .iter()
        .enumerate()
        .map(|(node, community)| (node.to_string(), *community))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn betweenness_is_non_negative_and_bounded(sample in arb_sample()) {
        let g = build(&sample, 1.0);
        for config in [
            BetweennessConfig::default(),
            BetweennessConfig::default().weighted(true),
        ] {
            let bc = betweenness_centrality(&g, &config).expect("compute");
            prop_assert_eq!(bc.len(), sample.nodes);
            for score in bc.values() {
                prop_assert!(*score >= 0.0, "negative score {}", score);
                prop_assert!(*score <= 1.0 + 1e-9, "normalized score {} above 1", score);
            }
        }
    }

    #[test]
    fn unit_weights_agree_with_hop_counts(sample in arb_sample()) {
        let g = build_unit(&sample);
        let plain = betweenness_centrality(&g, &BetweennessConfig::default()).expect("plain");
        let weighted = betweenness_centrality(&g, &BetweennessConfig::default().weighted(true))
            .expect("weighted");

        for (node, score) in &plain {
            prop_assert!((weighted[node] - score).abs() < 1e-9, "{}: {} vs {}", node, weighted[node], score);
        }
    }

    #[test]
    fn doubling_every_weight_changes_nothing(sample in arb_sample()) {
        let config = BetweennessConfig::default().weighted(true);
        let base = betweenness_centrality(&build(&sample, 1.0), &config).expect("base");
        let doubled = betweenness_centrality(&build(&sample, 2.0), &config).expect("doubled");

        for (node, score) in &base {
            prop_assert!((doubled[node] - score).abs() < 1e-9);
        }
    }

    #[test]
    fn single_community_scores_zero(sample in arb_sample()) {
        prop_assume!(!sample.edges.is_empty());
        let g = build(&sample, 1.0);
        let everyone: HashMap<String, u8> =
            (0..sample.nodes).map(|node| (node.to_string(), 0)).collect();

        let q = modularity_with_partition(&g, &everyone, &ModularityConfig::default())
            .expect("score");
        prop_assert!(q.abs() < 1e-9, "q = {}", q);
    }

    #[test]
    fn attribute_and_explicit_partitions_agree(sample in arb_sample()) {
        prop_assume!(!sample.edges.is_empty());
        let g = build(&sample, 1.0);
        let config = ModularityConfig::default();

        let from_attributes = modularity(&g, &config).expect("attribute partition");
        let explicit = modularity_with_partition(&g, &partition(&sample), &config)
            .expect("explicit partition");

        prop_assert!((from_attributes - explicit).abs() < 1e-12);
        prop_assert!((-1.0..=1.0).contains(&from_attributes), "q = {}", from_attributes);
    }

    #[test]
    fn reciprocal_directed_pairs_match_undirected(sample in arb_sample()) {
        prop_assume!(!sample.edges.is_empty());
        let undirected = build(&sample, 1.0);

        let mut directed = AttributedGraph::directed();
        for node in 0..sample.nodes {
            directed.add_node(node.to_string());
        }
        for (a, b, w) in &sample.edges {
            let (a, b) = (a.to_string(), b.to_string());
            directed.add_weighted_edge(&a, &b, f64::from(*w)).expect("forward");
            directed.add_weighted_edge(&b, &a, f64::from(*w)).expect("reverse");
        }

        let p = partition(&sample);
        let config = ModularityConfig::default();
        let qu = modularity_with_partition(&undirected, &p, &config).expect("undirected");
        let qd = modularity_with_partition(&directed, &p, &config).expect("directed");

        prop_assert!((qu - qd).abs() < 1e-9, "{} vs {}", qu, qd);
    }
}
