//! # TSP-ILS
//!
//! Iterated Local Search for the symmetric Traveling Salesman Problem.
//!
//! A random starting tour is driven to a 2-opt local optimum using
//! neighbor-list restricted moves with incremental length evaluation. The
//! search then repeatedly perturbs the current tour, re-optimizes the copy
//! and lets an acceptance criterion (greedy or annealing-style) decide
//! whether it replaces the current tour, until the budget is spent.
//!
//! Local search, perturbation and acceptance are trait objects, so
//! comparing two policies means running [`IlsAlgorithm`] twice with a
//! different strategy and the same seed.

pub mod acceptance;
pub mod config;
pub mod error;
pub mod local_search;
pub mod perturbation;
pub mod problem;
pub mod tour;
pub mod utils;

use crate::acceptance::{Acceptance, Decision};
use crate::config::Config;
use crate::local_search::{LocalSearch, TwoOpt};
use crate::perturbation::Perturbation;
use crate::problem::DistanceOracle;
use crate::tour::Tour;
use crate::utils::{percentage_error, ProgressRecord, RunSummary};

use log::{debug, info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

pub use crate::error::{Error, Result};

/// Mutable state of a single run, owned by the algorithm driving it.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub current: Tour,
    pub best: Tour,
    /// Completed outer iterations
    pub iterations: u32,
    pub temperature: f64,
    pub start_time: Instant,
    /// `None` when the run has no time limit
    pub deadline: Option<Instant>,
    pub progress: ProgressRecord,
}

impl SearchState {
    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Final result of a run.
#[derive(Debug, Clone)]
pub struct IlsResult {
    pub best: Tour,
    pub elapsed: Duration,
    pub iterations: u32,
    pub local_search_passes: u64,
    pub progress: ProgressRecord,
}

impl IlsResult {
    /// Summarize the run for reporting, with an optional reference optimum.
    pub fn summary(&self, label: &str, reference: Option<f64>) -> RunSummary {
        RunSummary {
            label: label.to_string(),
            elapsed: self.elapsed,
            iterations: self.iterations,
            local_search_passes: self.local_search_passes,
            best_fitness: self.best.fitness,
            error_percent: reference.map(|r| percentage_error(self.best.fitness, r)),
        }
    }
}

/// The main algorithm structure that orchestrates the iterated local search.
pub struct IlsAlgorithm<'a> {
    pub oracle: &'a dyn DistanceOracle,
    pub config: Config,
    pub local_search: Box<dyn LocalSearch>,
    pub perturbation: Box<dyn Perturbation>,
    pub acceptance: Box<dyn Acceptance>,
    rng: ChaCha8Rng,
}

impl<'a> IlsAlgorithm<'a> {
    /// Create an ILS instance with the strategies named in `config`.
    ///
    /// Fails with [`Error::InvalidConfig`] when `config` does not validate,
    /// including when it sets neither a time limit nor an iteration cap.
    pub fn new(oracle: &'a dyn DistanceOracle, config: Config) -> Result<Self> {
        config.validate()?;

        let mut two_opt = TwoOpt::new(config.neighbor_count);
        two_opt.cache_neighbors = config.cache_neighbors;

        Ok(IlsAlgorithm {
            oracle,
            local_search: Box::new(two_opt),
            perturbation: config.perturbation.build(config.min_segment_length),
            acceptance: config.acceptance.build(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        })
    }

    /// Replace the local search strategy.
    pub fn with_local_search(mut self, local_search: Box<dyn LocalSearch>) -> Self {
        self.local_search = local_search;
        self
    }

    /// Replace the perturbation operator.
    pub fn with_perturbation(mut self, perturbation: Box<dyn Perturbation>) -> Self {
        self.perturbation = perturbation;
        self
    }

    /// Replace the acceptance criterion.
    pub fn with_acceptance(mut self, acceptance: Box<dyn Acceptance>) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Generate a random tour and drive it to its first local optimum.
    pub fn initialize(&mut self) -> SearchState {
        let start_time = Instant::now();
        let deadline = self
            .config
            .time_limit
            .and_then(|limit| start_time.checked_add(limit));

        let mut progress = ProgressRecord::new();
        self.local_search.reset();

        let initial = Tour::random(self.oracle, &mut self.rng);
        progress.push(initial.fitness, initial.fitness);

        let optimized = self.local_search.optimize(&initial, self.oracle, deadline);
        progress.push(optimized.fitness, optimized.fitness);

        debug!(
            "initial tour {:.2}, first local optimum {:.2}",
            initial.fitness, optimized.fitness
        );

        SearchState {
            current: optimized.clone(),
            best: optimized,
            iterations: 0,
            temperature: self.config.initial_temperature,
            start_time,
            deadline,
            progress,
        }
    }

    /// Perform one perturb, optimize, accept and cool cycle.
    pub fn step(&mut self, state: &mut SearchState) {
        let perturbed = self
            .perturbation
            .perturb(&state.current, self.oracle, &mut self.rng);
        let candidate = self
            .local_search
            .optimize(&perturbed, self.oracle, state.deadline);

        let decision =
            self.acceptance
                .decide(&state.current, &candidate, state.temperature, &mut self.rng);
        if decision == Decision::AcceptCandidate {
            state.current = candidate;
        }

        state.temperature *= self.config.cooling_factor;
        state.iterations += 1;

        if state.current.fitness < state.best.fitness {
            state.best = state.current.clone();
            debug!(
                "iteration {}: new best {:.2}",
                state.iterations, state.best.fitness
            );
        }

        state
            .progress
            .push(state.current.fitness, state.best.fitness);

        trace!(
            "iteration {}: current {:.2}, best {:.2}, T = {:.4}",
            state.iterations,
            state.current.fitness,
            state.best.fitness,
            state.temperature
        );
    }

    /// Run the algorithm until the termination criteria are met.
    pub fn run(&mut self) -> IlsResult {
        info!(
            "starting ILS on {} nodes ({}, k = {}, seed = {})",
            self.oracle.dimension(),
            self.acceptance.name(),
            self.config.neighbor_count,
            self.config.seed
        );

        let mut state = self.initialize();

        while !self.should_terminate(&state) {
            self.step(&mut state);
        }

        let elapsed = state.elapsed();
        info!(
            "{} finished after {} iterations in {:.2}s, best {:.2}",
            self.acceptance.name(),
            state.iterations,
            elapsed.as_secs_f64(),
            state.best.fitness
        );

        IlsResult {
            best: state.best,
            elapsed,
            iterations: state.iterations,
            local_search_passes: self.local_search.passes(),
            progress: state.progress,
        }
    }

    /// Check if the termination criteria are met.
    fn should_terminate(&self, state: &SearchState) -> bool {
        // No operator can change a tour this small.
        if state.current.len() < 4 {
            return true;
        }

        if let Some(max_iterations) = self.config.max_iterations {
            if state.iterations >= max_iterations {
                return true;
            }
        }

        if let Some(deadline) = state.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }

        false
    }
}
