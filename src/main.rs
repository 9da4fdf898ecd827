//! Command-line front end: load a TSPLIB instance and run ILS with one or
//! both acceptance criteria.

use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tsp_ils::acceptance::AcceptanceKind;
use tsp_ils::config::Config;
use tsp_ils::perturbation::PerturbationKind;
use tsp_ils::problem::Problem;
use tsp_ils::utils::{ProgressRecord, RunSummary};
use tsp_ils::IlsAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AcceptanceArg {
    Greedy,
    Probabilistic,
    /// Run both criteria concurrently from the same seed
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PerturbationArg {
    DoubleBridge,
    SegmentShuffle,
}

#[derive(Debug, Parser)]
#[command(name = "tsp_ils", version, about = "Iterated Local Search for the symmetric TSP")]
struct Cli {
    /// Path to a TSPLIB .tsp file
    instance: PathBuf,

    #[arg(long, value_enum, default_value_t = AcceptanceArg::Both)]
    acceptance: AcceptanceArg,

    #[arg(long, value_enum)]
    perturbation: Option<PerturbationArg>,

    /// Time budget per run, in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Cap on outer iterations per run
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Candidate list size
    #[arg(short = 'k', long)]
    neighbors: Option<usize>,

    /// Initial temperature for probabilistic acceptance
    #[arg(long)]
    temperature: Option<f64>,

    /// Geometric cooling factor
    #[arg(long)]
    cooling: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file; command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print summaries and progress records as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RunReport {
    summary: RunSummary,
    progress: ProgressRecord,
}

impl Cli {
    fn build_config(&self) -> tsp_ils::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::new(),
        };

        if let Some(seconds) = self.time_limit {
            config = config.with_time_limit(Duration::from_secs_f64(seconds.max(0.0)));
        }
        if let Some(iterations) = self.max_iterations {
            config = config.with_max_iterations(iterations);
        }
        if let Some(k) = self.neighbors {
            config = config.with_neighbor_count(k);
        }
        if let Some(temperature) = self.temperature {
            config = config.with_initial_temperature(temperature);
        }
        if let Some(cooling) = self.cooling {
            config = config.with_cooling_factor(cooling);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(perturbation) = self.perturbation {
            config = config.with_perturbation(match perturbation {
                PerturbationArg::DoubleBridge => PerturbationKind::DoubleBridge,
                PerturbationArg::SegmentShuffle => PerturbationKind::SegmentShuffle,
            });
        }

        config.validate()?;
        Ok(config)
    }

    fn acceptance_kinds(&self) -> Vec<AcceptanceKind> {
        match self.acceptance {
            AcceptanceArg::Greedy => vec![AcceptanceKind::SingleImprovement],
            AcceptanceArg::Probabilistic => vec![AcceptanceKind::Probabilistic],
            AcceptanceArg::Both => vec![
                AcceptanceKind::SingleImprovement,
                AcceptanceKind::Probabilistic,
            ],
        }
    }
}

fn run_one(problem: &Problem, config: Config) -> tsp_ils::Result<RunReport> {
    let mut algorithm = IlsAlgorithm::new(problem, config)?;
    let label = algorithm.acceptance.name();
    let result = algorithm.run();

    Ok(RunReport {
        summary: result.summary(label, problem.reference_optimum()),
        progress: result.progress,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.build_config()?;

    info!("Loading problem from: {}", cli.instance.display());
    let problem = Problem::from_file(&cli.instance)?;
    info!(
        "Loaded problem: {} with {} nodes",
        problem.name,
        problem.get_node_count()
    );

    // Independent runs share only the read-only problem.
    let reports = thread::scope(|scope| {
        let handles: Vec<_> = cli
            .acceptance_kinds()
            .into_iter()
            .map(|kind| {
                let config = config.clone().with_acceptance(kind);
                let problem = &problem;
                scope.spawn(move || run_one(problem, config))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("ILS run panicked"))
            .collect::<tsp_ils::Result<Vec<RunReport>>>()
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", report.summary.format());
        }
    }

    Ok(())
}
