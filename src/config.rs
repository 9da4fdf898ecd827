//! Configuration parameters for the ILS algorithm.

use crate::acceptance::AcceptanceKind;
use crate::error::{Error, Result};
use crate::perturbation::PerturbationKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration settings for one ILS run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Size of each node's candidate list (k)
    pub neighbor_count: usize,
    /// Starting temperature for probabilistic acceptance
    pub initial_temperature: f64,
    /// Geometric cooling factor applied once per iteration (0 < α < 1)
    pub cooling_factor: f64,
    /// Wall-clock budget for the run
    pub time_limit: Option<Duration>,
    /// Optional cap on outer iterations
    pub max_iterations: Option<u32>,
    /// Seed for the run's random stream
    pub seed: u64,
    pub acceptance: AcceptanceKind,
    pub perturbation: PerturbationKind,
    /// Shortest segment the segment shuffle may pick
    pub min_segment_length: usize,
    /// Build the neighbor list once per run instead of once per local search
    pub cache_neighbors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            neighbor_count: 25,
            initial_temperature: 920.0,
            cooling_factor: 0.99,
            time_limit: Some(Duration::from_secs(160)),
            max_iterations: None,
            seed: 47,
            acceptance: AcceptanceKind::SingleImprovement,
            perturbation: PerturbationKind::SegmentShuffle,
            min_segment_length: 3,
            cache_neighbors: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "cooling factor must lie in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if !(self.initial_temperature > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "initial temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if self.time_limit.is_none() && self.max_iterations.is_none() {
            return Err(Error::InvalidConfig(
                "either a time limit or an iteration cap is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the candidate list size.
    pub fn with_neighbor_count(mut self, k: usize) -> Self {
        self.neighbor_count = k;
        self
    }

    /// Set the initial temperature.
    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    /// Set the cooling factor.
    pub fn with_cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = factor;
        self
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }

    /// Run without a time limit; an iteration cap must then be set.
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit = None;
        self
    }

    /// Set the maximum number of outer iterations.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the acceptance criterion.
    pub fn with_acceptance(mut self, acceptance: AcceptanceKind) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Set the perturbation operator.
    pub fn with_perturbation(mut self, perturbation: PerturbationKind) -> Self {
        self.perturbation = perturbation;
        self
    }

    /// Set the minimum segment length for the segment shuffle.
    pub fn with_min_segment_length(mut self, length: usize) -> Self {
        self.min_segment_length = length;
        self
    }

    /// Choose whether the neighbor list is cached for the whole run.
    pub fn with_cache_neighbors(mut self, cache: bool) -> Self {
        self.cache_neighbors = cache;
        self
    }
}
