use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::path::Path;

use common::error::Error;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct DijkstraConfig {
    /// Stop a source-to-target query as soon as the target is settled.
    pub early_exit: bool,
}

impl Default for DijkstraConfig {
    fn default() -> Self {
        Self { early_exit: true }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct BellmanFordConfig {
    /// End relaxation after the first pass that changes nothing.
    pub early_termination: bool,
}

impl Default for BellmanFordConfig {
    fn default() -> Self {
        Self {
            early_termination: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SolverConfig {
    pub dijkstra: DijkstraConfig,
    pub bellman_ford: BellmanFordConfig,
}

/// Loads solver configuration from an optional TOML file and `PATHFIND_*` environment
/// variables. Missing keys fall back to their defaults.
///
/// Nested keys use a double underscore, e.g. `PATHFIND_DIJKSTRA__EARLY_EXIT=false`.
pub fn load_config(path: Option<&Path>) -> Result<SolverConfig, Error> {
    let mut builder = ConfigLoader::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(Error::ConfigLoad(format!(
                "Configuration file not found at path: {}",
                path.display()
            )));
        }
        builder = builder.add_source(File::from(path).required(true));
    }

    let s = builder
        .add_source(
            Environment::with_prefix("PATHFIND")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| Error::ConfigLoad(e.to_string()))?;

    let solver_config: SolverConfig = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoad(format!("Failed to deserialize config: {}", e)))?;

    tracing::debug!(?solver_config, "solver configuration loaded");
    Ok(solver_config)
}
