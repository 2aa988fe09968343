use super::graph::Graph;
use common::{
    error::Error,
    types::{Node, PathResult, ShortestPaths, WeightedCycle},
};

/// Single-source shortest-path engine.
pub trait ShortestPathSolver<N: Node> {
    /// Best distance and predecessor for every node of `graph` from `source`.
    fn shortest_paths(&self, graph: &Graph<N>, source: &N) -> Result<ShortestPaths<N>, Error>;

    /// Cheapest path from `source` to `target`.
    ///
    /// Returns `Error::NoPath` when `target` is unreachable.
    fn shortest_path(&self, graph: &Graph<N>, source: &N, target: &N)
    -> Result<PathResult<N>, Error>;
}

/// Trait for solvers capable of detecting negative cycles.
pub trait NegativeCycleDetector<N: Node> {
    /// Detects a negative cycle anywhere in `graph`.
    ///
    /// Returns `Ok(Some(cycle))` if a negative cycle is found,
    /// `Ok(None)` if none exists, or `Err(e)` on failure.
    fn find_negative_cycle(&self, graph: &Graph<N>) -> Result<Option<WeightedCycle<N>>, Error>;
}
