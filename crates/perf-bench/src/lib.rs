use config::{Config as ConfigLoader, ConfigError, Environment, File};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pathfind_core::Graph;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration load error: {0}")]
    ConfigLoadError(#[from] ConfigError),

    #[error("Tracing subscriber init error: {0}")]
    TracingInitError(#[from] TryInitError),

    #[error("Invalid benchmark configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphConfig {
    pub num_nodes: usize,
    pub edges_per_node: usize,
    pub max_weight: f64,
    pub seed: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    pub runs: usize,
    pub queries: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BenchConfig {
    pub graph: GraphConfig,
    pub bench: RunConfig,
}

impl BenchConfig {
    /// Rejects settings the generators cannot sample from.
    pub fn validate(&self) -> Result<(), Error> {
        if self.graph.num_nodes == 0 {
            return Err(Error::InvalidConfig("graph.num_nodes must be at least 1".into()));
        }
        if self.graph.max_weight.is_nan() || self.graph.max_weight <= 0.0 {
            return Err(Error::InvalidConfig("graph.max_weight must be positive".into()));
        }
        Ok(())
    }
}

/// Loads `Bench.toml` from the crate directory, then applies `BENCH_*` overrides
/// (e.g. `BENCH_GRAPH__NUM_NODES=500`).
pub fn load_config() -> Result<BenchConfig, Error> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Bench.toml");

    let s = ConfigLoader::builder()
        .add_source(File::from(path.as_path()).required(true))
        .add_source(
            Environment::with_prefix("BENCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: BenchConfig = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Installs a compact stderr subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

/// Random directed graph with `edges_per_node` outgoing edges per node and weights
/// drawn from `[min_weight, max_weight)`.
///
/// A ring `i -> i + 1` is always included so every node is reachable from node 0.
pub fn generate_graph(config: &GraphConfig, min_weight: f64) -> Graph<usize> {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let n = config.num_nodes;

    let ring = (0..n).map(|i| (i, (i + 1) % n, config.max_weight));
    let random: Vec<(usize, usize, f64)> = (0..n)
        .flat_map(|from| std::iter::repeat_n(from, config.edges_per_node))
        .map(|from| {
            let to = rng.random_range(0..n);
            let weight = rng.random_range(min_weight..config.max_weight);
            (from, to, weight)
        })
        .collect();

    Graph::with_nodes(0..n, ring.chain(random))
}

/// Deterministic query endpoints for path benchmarks.
pub fn generate_queries(config: &GraphConfig, count: usize) -> Vec<(usize, usize)> {
    let mut rng = SmallRng::seed_from_u64(config.seed.wrapping_add(1));
    (0..count)
        .map(|_| {
            (
                rng.random_range(0..config.num_nodes),
                rng.random_range(0..config.num_nodes),
            )
        })
        .collect()
}

/// Runs `f` `runs` times and returns the fastest wall-clock duration.
pub fn best_of<F: FnMut()>(runs: usize, mut f: F) -> Duration {
    (0..runs.max(1))
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .min()
        .unwrap_or_default()
}
