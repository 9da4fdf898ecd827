//! Tour representation for the symmetric TSP.

use crate::problem::DistanceOracle;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative tolerance used when comparing an incrementally maintained
/// fitness with a from-scratch recomputation.
pub const FITNESS_TOLERANCE: f64 = 1e-9;

/// A closed tour over all nodes together with its length.
///
/// `nodes` is a permutation of `0..n`; position `n - 1` is followed by
/// position `0`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub nodes: Vec<usize>,
    pub fitness: f64,
}

impl Tour {
    /// Create a tour from a visiting order, computing its length.
    pub fn new(nodes: Vec<usize>, oracle: &dyn DistanceOracle) -> Self {
        let fitness = Self::compute_fitness(&nodes, oracle);
        Tour { nodes, fitness }
    }

    /// Uniformly random permutation of all nodes of the oracle.
    pub fn random<R: Rng + ?Sized>(oracle: &dyn DistanceOracle, rng: &mut R) -> Self {
        let mut nodes: Vec<usize> = (0..oracle.dimension()).collect();
        nodes.shuffle(rng);
        Self::new(nodes, oracle)
    }

    /// Total cycle length, evaluated from scratch.
    pub fn compute_fitness(nodes: &[usize], oracle: &dyn DistanceOracle) -> f64 {
        if nodes.len() < 2 {
            return 0.0;
        }

        nodes
            .iter()
            .circular_tuple_windows()
            .map(|(&a, &b)| oracle.weight(a, b))
            .sum()
    }

    /// Recompute the stored fitness from scratch.
    pub fn evaluate(&mut self, oracle: &dyn DistanceOracle) {
        self.fitness = Self::compute_fitness(&self.nodes, oracle);
    }

    /// Check whether the stored fitness matches a full recomputation.
    pub fn is_consistent(&self, oracle: &dyn DistanceOracle) -> bool {
        fitness_eq(self.fitness, Self::compute_fitness(&self.nodes, oracle))
    }

    /// Number of nodes in the tour.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that the tour visits each of `0..dimension` exactly once.
    pub fn is_permutation(&self, dimension: usize) -> bool {
        if self.nodes.len() != dimension {
            return false;
        }

        let mut seen = vec![false; dimension];
        for &node in &self.nodes {
            if node >= dimension || seen[node] {
                return false;
            }
            seen[node] = true;
        }

        true
    }

    /// Position of every node, indexed by node id.
    pub fn positions(&self) -> Vec<usize> {
        let mut positions = vec![0; self.nodes.len()];
        for (pos, &node) in self.nodes.iter().enumerate() {
            positions[node] = pos;
        }
        positions
    }
}

/// Compare two tour lengths within [`FITNESS_TOLERANCE`].
pub fn fitness_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= FITNESS_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

impl fmt::Debug for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tour(len={:.2}, nodes={:?})", self.fitness, self.nodes)
    }
}
