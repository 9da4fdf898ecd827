//! 2-Opt neighborhood restricted to candidate lists.

use crate::local_search::neighbors::NeighborList;
use crate::local_search::{improvement_threshold, LocalSearch};
use crate::problem::DistanceOracle;
use crate::tour::{fitness_eq, Tour};
use log::debug;
use std::time::Instant;

/// First-improvement 2-opt over the `k` nearest neighbors of each node.
#[derive(Debug, Clone)]
pub struct TwoOpt {
    pub neighbor_count: usize,
    /// Keep the neighbor list between calls instead of rebuilding it.
    pub cache_neighbors: bool,
    /// Total scan passes started, across all calls.
    pub passes: u64,
    /// Total improving moves applied, across all calls.
    pub moves: u64,
    neighbors: Option<(CacheKey, NeighborList)>,
}

/// What a cached neighbor list was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    oracle: usize,
    dimension: usize,
    neighbor_count: usize,
}

impl CacheKey {
    fn new(oracle: &dyn DistanceOracle, neighbor_count: usize) -> Self {
        CacheKey {
            oracle: oracle as *const _ as *const () as usize,
            dimension: oracle.dimension(),
            neighbor_count,
        }
    }
}

impl TwoOpt {
    /// Create a new 2-opt search with candidate lists of size `neighbor_count`.
    pub fn new(neighbor_count: usize) -> Self {
        TwoOpt {
            neighbor_count,
            cache_neighbors: true,
            passes: 0,
            moves: 0,
            neighbors: None,
        }
    }

    /// Rebuild the candidate lists at the start of every call.
    pub fn without_cache(mut self) -> Self {
        self.cache_neighbors = false;
        self
    }

    /// Reuse the cached list if it was built for this oracle and list size.
    fn take_neighbors(
        &mut self,
        nodes: &[usize],
        oracle: &dyn DistanceOracle,
        key: CacheKey,
    ) -> NeighborList {
        match self.neighbors.take() {
            Some((cached, list)) if self.cache_neighbors && cached == key => list,
            _ => NeighborList::build(nodes, self.neighbor_count, oracle),
        }
    }
}

impl LocalSearch for TwoOpt {
    fn optimize(
        &mut self,
        tour: &Tour,
        oracle: &dyn DistanceOracle,
        deadline: Option<Instant>,
    ) -> Tour {
        let n = tour.len();
        if n < 4 {
            return tour.clone();
        }

        let mut nodes = tour.nodes.clone();
        let mut fitness = tour.fitness;
        let mut positions = tour.positions();
        let key = CacheKey::new(oracle, self.neighbor_count);
        let neighbors = self.take_neighbors(&nodes, oracle, key);

        let mut improved = true;
        while improved {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                debug!("2-opt stopped by deadline at length {:.2}", fitness);
                break;
            }

            improved = false;
            self.passes += 1;
            let threshold = improvement_threshold(fitness);

            'scan: for i in 0..n {
                for candidate in neighbors.get(nodes[i]) {
                    let j = positions[candidate.node];

                    // Adjacent pairs and the mirrored (j < i) case are skipped.
                    if j <= i + 1 || (i == 0 && j == n - 1) {
                        continue;
                    }

                    let delta = two_opt_delta(&nodes, oracle, i, j);
                    if delta < -threshold {
                        apply_two_opt(&mut nodes, i, j);
                        for pos in i + 1..=j {
                            positions[nodes[pos]] = pos;
                        }

                        fitness += delta;
                        self.moves += 1;
                        improved = true;
                        break 'scan;
                    }
                }
            }
        }

        debug_assert!(
            fitness_eq(fitness, Tour::compute_fitness(&nodes, oracle)),
            "incremental length {} drifted from recomputed {}",
            fitness,
            Tour::compute_fitness(&nodes, oracle)
        );

        if self.cache_neighbors {
            self.neighbors = Some((key, neighbors));
        }

        Tour { nodes, fitness }
    }

    fn reset(&mut self) {
        self.neighbors = None;
    }

    fn passes(&self) -> u64 {
        self.passes
    }
}

/// Change in tour length from replacing edges `(t[i], t[i+1])` and
/// `(t[j], t[j+1])` with `(t[i], t[j])` and `(t[i+1], t[j+1])`.
///
/// Requires `i < j`; position `j + 1` wraps to `0`.
pub fn two_opt_delta(nodes: &[usize], oracle: &dyn DistanceOracle, i: usize, j: usize) -> f64 {
    let n = nodes.len();

    let a = nodes[i];
    let a_next = nodes[i + 1];
    let b = nodes[j];
    let b_next = nodes[(j + 1) % n];

    let old_cost = oracle.weight(a, a_next) + oracle.weight(b, b_next);
    let new_cost = oracle.weight(a, b) + oracle.weight(a_next, b_next);

    new_cost - old_cost
}

/// Apply a 2-opt move by reversing positions `i + 1..=j`.
pub fn apply_two_opt(nodes: &mut [usize], i: usize, j: usize) {
    nodes[i + 1..=j].reverse();
}
