//! Dijkstra-based Brandes traversal for non-negative weights.
//!
//! Path counts are settled lazily: a node's `sigma` receives its settling
//! predecessor's count when the node leaves the heap, and every other
//! equal-length predecessor adds its count when the tie is discovered. Both
//! contributions come from already-settled nodes, so the counts are final.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{Adjacency, BrandesPaths, ShortestPathOracle};

/// Weighted oracle. Negative weights give unspecified results.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

/// Heap entry; ordered so that `BinaryHeap` pops the closest, then oldest.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    seq: usize,
    predecessor: Option<usize>,
    node: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl ShortestPathOracle for Dijkstra {
    #[allow(clippy::float_cmp)] // ties must be exact to count paths
    fn brandes(&self, adjacency: &Adjacency, source: usize) -> BrandesPaths {
        let n = adjacency.node_count();
        let mut paths = BrandesPaths::with_capacity(n);

        let mut settled = vec![false; n];
        // Best tentative distance seen so far per node.
        let mut seen: Vec<Option<f64>> = vec![None; n];
        seen[source] = Some(0.0);

        let mut seq = 0usize;
        let mut heap = BinaryHeap::new();
        heap.push(Candidate {
            distance: 0.0,
            seq,
            predecessor: None,
            node: source,
        });

        while let Some(Candidate {
            distance,
            predecessor,
            node: v,
            ..
        }) = heap.pop()
        {
            if settled[v] {
                continue;
            }
            settled[v] = true;
            paths.sigma[v] += predecessor.map_or(1.0, |p| paths.sigma[p]);
            paths.order.push(v);

            for hop in adjacency.neighbors(v) {
                let w = hop.target;
                let candidate = distance + hop.weight;

                if !settled[w] && seen[w].is_none_or(|best| candidate < best) {
                    seen[w] = Some(candidate);
                    seq += 1;
                    heap.push(Candidate {
                        distance: candidate,
                        seq,
                        predecessor: Some(v),
                        node: w,
                    });
                    paths.sigma[w] = 0.0;
                    paths.predecessors[w].clear();
                    paths.predecessors[w].push(v);
                } else if seen[w] == Some(candidate) {
                    paths.sigma[w] += paths.sigma[v];
                    paths.predecessors[w].push(v);
                }
            }
        }

        paths
    }
}
