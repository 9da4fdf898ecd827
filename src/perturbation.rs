//! Perturbation operators used to escape 2-opt local optima.

use crate::problem::DistanceOracle;
use crate::tour::Tour;
use rand::seq::{index, SliceRandom};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Produces a perturbed copy of a tour.
///
/// Implementations return a permutation of the same node set and never
/// modify their input.
pub trait Perturbation {
    fn perturb(&self, tour: &Tour, oracle: &dyn DistanceOracle, rng: &mut dyn RngCore) -> Tour;
}

/// Selects one of the built-in perturbations from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerturbationKind {
    DoubleBridge,
    SegmentShuffle,
}

impl PerturbationKind {
    /// Instantiate the operator.
    pub fn build(self, min_segment_length: usize) -> Box<dyn Perturbation> {
        match self {
            PerturbationKind::DoubleBridge => Box::new(DoubleBridge),
            PerturbationKind::SegmentShuffle => Box::new(SegmentShuffle::new(min_segment_length)),
        }
    }
}

/// 4-opt double-bridge move.
///
/// Cuts the tour into `A B C D E` and reconnects it as `A D C B E`. A
/// single 2-opt reversal cannot undo this.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleBridge;

impl DoubleBridge {
    /// Tours this short are returned unchanged.
    pub const MIN_NODES: usize = 9;

    /// Draw sorted cut positions `i < j < k < l`.
    ///
    /// Draws where three of the four cyclic segments hold a single node
    /// are rejected, since they collapse into one segment reversal.
    pub fn draw_cuts<R: Rng + ?Sized>(n: usize, rng: &mut R) -> [usize; 4] {
        loop {
            let mut cuts = index::sample(rng, n, 4).into_vec();
            cuts.sort_unstable();
            let cuts = [cuts[0], cuts[1], cuts[2], cuts[3]];

            let lengths = [
                cuts[1] - cuts[0],
                cuts[2] - cuts[1],
                cuts[3] - cuts[2],
                n - cuts[3] + cuts[0],
            ];
            if lengths.iter().filter(|&&len| len == 1).count() < 3 {
                return cuts;
            }
        }
    }

    /// Reconnect `nodes` as `[0,i) + [k,l) + [j,k) + [i,j) + [l,n)`.
    pub fn reconnect(nodes: &[usize], cuts: [usize; 4]) -> Vec<usize> {
        let [i, j, k, l] = cuts;

        let mut result = Vec::with_capacity(nodes.len());
        result.extend_from_slice(&nodes[..i]);
        result.extend_from_slice(&nodes[k..l]);
        result.extend_from_slice(&nodes[j..k]);
        result.extend_from_slice(&nodes[i..j]);
        result.extend_from_slice(&nodes[l..]);
        result
    }
}

impl Perturbation for DoubleBridge {
    fn perturb(&self, tour: &Tour, oracle: &dyn DistanceOracle, rng: &mut dyn RngCore) -> Tour {
        let n = tour.len();
        if n < Self::MIN_NODES {
            return tour.clone();
        }

        let cuts = Self::draw_cuts(n, rng);
        Tour::new(Self::reconnect(&tour.nodes, cuts), oracle)
    }
}

/// Shuffles the nodes of one random contiguous segment.
///
/// The segment length is drawn from `min_length..=max(5, n / 20)`, capped
/// at `n`. Nodes outside the segment keep their positions.
#[derive(Debug, Clone, Copy)]
pub struct SegmentShuffle {
    pub min_length: usize,
}

impl SegmentShuffle {
    pub fn new(min_length: usize) -> Self {
        SegmentShuffle { min_length }
    }

    fn max_length(&self, n: usize) -> usize {
        (n / 20).max(5).max(self.min_length).min(n)
    }
}

impl Default for SegmentShuffle {
    fn default() -> Self {
        SegmentShuffle::new(3)
    }
}

impl Perturbation for SegmentShuffle {
    fn perturb(&self, tour: &Tour, oracle: &dyn DistanceOracle, rng: &mut dyn RngCore) -> Tour {
        let n = tour.len();
        if n < self.min_length.max(2) {
            return tour.clone();
        }

        let length = rng.gen_range(self.min_length..=self.max_length(n));
        let start = rng.gen_range(0..=n - length);

        let mut nodes = tour.nodes.clone();
        nodes[start..start + length].shuffle(rng);

        Tour::new(nodes, oracle)
    }
}
