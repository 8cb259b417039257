pub mod config;
pub mod csv_loader;
pub mod dot_loader;
pub mod error;
pub mod matrix_loader;
pub mod report;
pub mod runner;
pub mod simulator;
pub mod types;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgGroup, Parser};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use csv_loader::CsvLoader;
use dot_loader::DotLoader;
use error::Error;
use matrix_loader::MatrixLoader;
use simulator::GraphSimulator;
use types::{Algorithm, DataSource, GraphSource};

/// Classical graph algorithms over DOT, adjacency-matrix, CSV or simulated graphs.
#[derive(Debug, Parser)]
#[command(version, about)]
#[command(group(ArgGroup::new("input").args(["dot", "matrix", "csv", "sim"])))]
struct Cli {
    /// Algorithm to run.
    #[arg(value_enum)]
    algorithm: Algorithm,

    /// Read a DOT (`.gv`) file.
    #[arg(long, value_name = "PATH")]
    dot: Option<PathBuf>,

    /// Read a plain 0/1 adjacency matrix (`.gvm`) file.
    #[arg(long, value_name = "PATH")]
    matrix: Option<PathBuf>,

    /// Read a `from,to[,weight]` CSV edge list.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Generate a random graph from the `[simulator]` config (default input).
    #[arg(long)]
    sim: bool,

    /// Source node for Bellman-Ford and Prim; defaults to the first node in sorted order.
    #[arg(long, short)]
    source: Option<String>,

    /// Treat CSV or simulated edges as undirected.
    #[arg(long)]
    undirected: bool,

    /// Run Bellman-Ford from every node concurrently.
    #[arg(long)]
    all_sources: bool,

    /// Configuration file; defaults to `crates/executor/Config.toml` when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn data_source(&self) -> DataSource {
        if let Some(path) = &self.dot {
            DataSource::DOT(path.clone())
        } else if let Some(path) = &self.matrix {
            DataSource::MATRIX(path.clone())
        } else if let Some(path) = &self.csv {
            DataSource::CSV(path.clone())
        } else {
            DataSource::SIM
        }
    }
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

/// Builds the loader for the chosen input.
fn graph_source(
    source: &DataSource,
    config: &config::Config,
    undirected: bool,
) -> Box<dyn GraphSource> {
    let default_weight = config.graph.default_weight;
    match source {
        DataSource::SIM => {
            let mut sim_config = config.simulator.clone();
            if undirected {
                sim_config.directed = false;
            }
            Box::new(GraphSimulator::new(sim_config))
        }
        DataSource::DOT(path) => Box::new(DotLoader::new(path.clone(), default_weight)),
        DataSource::MATRIX(path) => Box::new(MatrixLoader::new(path.clone(), default_weight)),
        DataSource::CSV(path) => Box::new(CsvLoader::new(path.clone(), !undirected, default_weight)),
    }
}

fn run(cli: Cli) -> Result<String, Error> {
    let config = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };

    if cli.all_sources && cli.algorithm != Algorithm::BellmanFord {
        return Err(Error::InvalidArgument(
            "--all-sources only applies to bellman-ford".to_string(),
        ));
    }

    let source = cli.data_source();
    info!(?source, algorithm = ?cli.algorithm, "loading graph");

    let graph = Arc::new(graph_source(&source, &config, cli.undirected).load()?);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "graph loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.runner.worker_threads)
        .max_blocking_threads(config.runner.worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(runner::execute(
        cli.algorithm,
        graph,
        cli.source.as_deref(),
        cli.all_sources,
        &config,
    ))
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
