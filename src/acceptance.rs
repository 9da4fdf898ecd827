//! Acceptance criteria deciding whether a re-optimized candidate replaces
//! the current tour.

use crate::tour::Tour;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Temperatures at or below this are treated as zero.
pub const TEMPERATURE_EPSILON: f64 = 1e-12;

/// Outcome of an acceptance test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    KeepCurrent,
    AcceptCandidate,
}

/// Policy comparing a candidate against the current tour.
///
/// Criteria never change the temperature; cooling belongs to the caller.
pub trait Acceptance {
    fn decide(
        &self,
        current: &Tour,
        candidate: &Tour,
        temperature: f64,
        rng: &mut dyn RngCore,
    ) -> Decision;

    /// Short name used in logs and summaries.
    fn name(&self) -> &'static str;
}

/// Selects one of the built-in criteria from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptanceKind {
    SingleImprovement,
    Probabilistic,
}

impl AcceptanceKind {
    /// Instantiate the criterion.
    pub fn build(self) -> Box<dyn Acceptance> {
        match self {
            AcceptanceKind::SingleImprovement => Box::new(SingleImprovement),
            AcceptanceKind::Probabilistic => Box::new(ProbabilisticAcceptance),
        }
    }
}

/// Greedy: accept only strictly shorter candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleImprovement;

impl Acceptance for SingleImprovement {
    fn decide(
        &self,
        current: &Tour,
        candidate: &Tour,
        _temperature: f64,
        _rng: &mut dyn RngCore,
    ) -> Decision {
        if candidate.fitness < current.fitness {
            Decision::AcceptCandidate
        } else {
            Decision::KeepCurrent
        }
    }

    fn name(&self) -> &'static str {
        "Single Improvement"
    }
}

/// Annealing-style: accept a worse candidate with probability `exp(-Δ/T)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilisticAcceptance;

impl ProbabilisticAcceptance {
    /// Probability of accepting a candidate that is `delta` longer.
    pub fn probability(delta: f64, temperature: f64) -> f64 {
        if delta < 0.0 {
            1.0
        } else if temperature <= TEMPERATURE_EPSILON {
            0.0
        } else {
            (-delta / temperature).exp()
        }
    }
}

impl Acceptance for ProbabilisticAcceptance {
    fn decide(
        &self,
        current: &Tour,
        candidate: &Tour,
        temperature: f64,
        rng: &mut dyn RngCore,
    ) -> Decision {
        let delta = candidate.fitness - current.fitness;
        if delta < 0.0 {
            return Decision::AcceptCandidate;
        }

        if temperature <= TEMPERATURE_EPSILON {
            return Decision::KeepCurrent;
        }

        if rng.gen::<f64>() < Self::probability(delta, temperature) {
            Decision::AcceptCandidate
        } else {
            Decision::KeepCurrent
        }
    }

    fn name(&self) -> &'static str {
        "Probabilistic Acceptance"
    }
}
