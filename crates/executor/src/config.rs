use config::{Config as ConfigLoader, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use super::error::Error;
use common::types::{DEFAULT_WEIGHT, Weight};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GraphConfig {
    pub default_weight: Weight,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub total_nodes: usize,
    pub edge_count: usize,
    pub min_weight: Weight,
    pub max_weight: Weight,
    pub directed: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReportConfig {
    pub show_adjacency: bool,
    pub show_matrix: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RunnerConfig {
    pub worker_threads: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub graph: GraphConfig,
    pub simulator: SimulatorConfig,
    pub report: ReportConfig,
    pub runner: RunnerConfig,
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, Error> {
    ConfigLoader::builder()
        .set_default("graph.default_weight", DEFAULT_WEIGHT)?
        .set_default("simulator.total_nodes", 8)?
        .set_default("simulator.edge_count", 16)?
        .set_default("simulator.min_weight", 1)?
        .set_default("simulator.max_weight", 10)?
        .set_default("simulator.directed", true)?
        .set_default("report.show_adjacency", true)?
        .set_default("report.show_matrix", false)?
        .set_default("runner.worker_threads", 4)
        .map_err(Error::from)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Config, Error> {
    let s = builder
        .add_source(
            Environment::with_prefix("EXECUTOR")
                .prefix_separator("__")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    if app_config.runner.worker_threads == 0 {
        return Err(Error::ConfigLoadError(
            "runner.worker_threads must be at least 1".to_string(),
        ));
    }

    Ok(app_config)
}

/// Loads configuration from `crates/executor/Config.toml` (if present),
/// built-in defaults and `EXECUTOR__SECTION__KEY` environment variables.
pub fn load_config() -> Result<Config, Error> {
    let base_path = env::current_dir().map_err(|e| {
        Error::ConfigLoadError(format!("Failed to determine current directory: {}", e))
    })?;

    let config_file_path: PathBuf = base_path
        .join("crates")
        .join("executor")
        .join("Config.toml");

    finish(defaults()?.add_source(File::from(config_file_path.as_path()).required(false)))
}

/// Loads configuration from an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, Error> {
    if !path.exists() {
        return Err(Error::ConfigLoadError(format!(
            "Configuration file not found at path: {}",
            path.display()
        )));
    }

    finish(defaults()?.add_source(File::from(path).required(true)))
}
