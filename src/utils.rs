//! Progress records and run summaries handed to reporting code.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Relative gap to a reference optimum, in percent.
pub fn percentage_error(best: f64, reference: f64) -> f64 {
    (best - reference) / reference * 100.0
}

/// One observation in a run's progress record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub iteration: u32,
    /// Length of the current working tour
    pub current: f64,
    /// Length of the best tour found so far
    pub best: f64,
}

/// Append-only history of a run.
///
/// Holds the random start, the first local optimum, then one entry per
/// outer iteration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressRecord {
    observations: Vec<Observation>,
}

impl ProgressRecord {
    pub fn new() -> Self {
        ProgressRecord::default()
    }

    /// Append an observation; the iteration index is its position.
    pub fn push(&mut self, current: f64, best: f64) {
        let iteration = self.observations.len() as u32;
        self.observations.push(Observation {
            iteration,
            current,
            best,
        });
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Length of the random starting tour.
    pub fn initial_fitness(&self) -> Option<f64> {
        self.observations.first().map(|o| o.current)
    }
}

/// Outcome of one run, as reported to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub label: String,
    pub elapsed: Duration,
    pub iterations: u32,
    pub local_search_passes: u64,
    pub best_fitness: f64,
    /// Gap to the reference optimum, when one is known
    pub error_percent: Option<f64>,
}

impl RunSummary {
    /// Format the summary as a string.
    pub fn format(&self) -> String {
        let mut text = format!(
            "{}:
- Runtime: {} ({:.2}s)
- Iterations: {}
- Local search passes: {}
- Best tour length: {:.2}",
            self.label,
            format_duration(self.elapsed),
            self.elapsed.as_secs_f64(),
            self.iterations,
            self.local_search_passes,
            self.best_fitness
        );

        if let Some(error) = self.error_percent {
            text.push_str(&format!("\n- Error: {:.2}%", error));
        }

        text
    }
}
