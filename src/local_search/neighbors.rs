//! Candidate lists restricting the 2-opt neighborhood.

use crate::problem::DistanceOracle;
use log::warn;
use std::cmp::Ordering;

/// A candidate node and its distance from the list owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub distance: f64,
    pub node: usize,
}

/// For each node, its nearest other nodes, nearest first.
#[derive(Debug, Clone, Default)]
pub struct NeighborList {
    lists: Vec<Vec<Neighbor>>,
    k: usize,
}

impl NeighborList {
    /// Build candidate lists of size `k` for every node of `tour`.
    ///
    /// Distance ties are broken by the position of the other node in
    /// `tour`. `k` outside `1..=n-1` is clamped into that range.
    pub fn build(tour: &[usize], k: usize, oracle: &dyn DistanceOracle) -> Self {
        let n = tour.len();
        let dimension = tour.iter().max().map_or(0, |&m| m + 1);

        if n < 2 {
            return NeighborList {
                lists: vec![Vec::new(); dimension],
                k: 0,
            };
        }

        let k = clamp_k(k, n);
        let mut lists = vec![Vec::new(); dimension];

        for &node in tour {
            let mut distances: Vec<Neighbor> = tour
                .iter()
                .filter(|&&other| other != node)
                .map(|&other| Neighbor {
                    distance: oracle.weight(node, other),
                    node: other,
                })
                .collect();

            // Stable, so equal distances keep tour order.
            distances.sort_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(Ordering::Equal)
            });
            distances.truncate(k);

            lists[node] = distances;
        }

        NeighborList { lists, k }
    }

    /// Candidates of `node`, nearest first.
    #[inline]
    pub fn get(&self, node: usize) -> &[Neighbor] {
        self.lists.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Effective list size after clamping.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of nodes covered.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

fn clamp_k(k: usize, n: usize) -> usize {
    let clamped = k.clamp(1, n - 1);
    if clamped != k {
        warn!(
            "neighbor count {} is outside [1, {}] for {} nodes, using {}",
            k,
            n - 1,
            n,
            clamped
        );
    }
    clamped
}
