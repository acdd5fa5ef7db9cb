//! Breadth-first Brandes traversal.

use std::collections::VecDeque;

use super::{Adjacency, BrandesPaths, ShortestPathOracle};

/// Hop-count oracle; arc weights are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl ShortestPathOracle for BreadthFirst {
    fn brandes(&self, adjacency: &Adjacency, source: usize) -> BrandesPaths {
        let n = adjacency.node_count();
        let mut paths = BrandesPaths::with_capacity(n);
        paths.sigma[source] = 1.0;

        // dist[t]: hops from source to t (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[source] = 0;

        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            paths.order.push(v);

            for hop in adjacency.neighbors(v) {
                let w = hop.target;

                // First visit to w?
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    paths.sigma[w] += paths.sigma[v];
                    paths.predecessors[w].push(v);
                }
            }
        }

        paths
    }
}
