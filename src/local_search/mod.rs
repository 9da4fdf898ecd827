//! Local search operators for the ILS algorithm.

pub mod neighbors;
pub mod two_opt;

use crate::problem::DistanceOracle;
use crate::tour::Tour;
use std::time::Instant;

pub use self::neighbors::{Neighbor, NeighborList};
pub use self::two_opt::{apply_two_opt, two_opt_delta, TwoOpt};

/// Relative gain, as a fraction of the tour length, a move must exceed to
/// count as improving.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Smallest length reduction that counts as an improvement on a tour of
/// length `tour_length`.
#[inline]
pub fn improvement_threshold(tour_length: f64) -> f64 {
    IMPROVEMENT_EPSILON * tour_length.abs()
}

/// Improves a tour until it is locally optimal or the deadline passes.
pub trait LocalSearch {
    /// Return an improved copy of `tour`; the input is left untouched.
    ///
    /// The deadline is checked between scan passes only, so a pass in
    /// progress always completes.
    fn optimize(
        &mut self,
        tour: &Tour,
        oracle: &dyn DistanceOracle,
        deadline: Option<Instant>,
    ) -> Tour;

    /// Drop any state carried over from earlier calls, such as cached
    /// candidate lists. Called at the start of every run.
    fn reset(&mut self) {}

    /// Scan passes performed so far, for run statistics.
    fn passes(&self) -> u64 {
        0
    }
}
