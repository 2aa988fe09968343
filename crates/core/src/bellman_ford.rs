use super::config::BellmanFordConfig;
use super::graph::Graph;
use super::path::{label_tables, reconstruct_path, trace_cycle, unknown_source_paths};
use super::traits::{NegativeCycleDetector, ShortestPathSolver};
use common::{
    error::Error,
    types::{Node, PathResult, ShortestPaths, Weight, WeightedCycle},
};
use tracing::{debug, warn};

/// Solver implementing Bellman-Ford for single-source shortest paths over graphs
/// with negative edge weights, and negative cycle detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellmanFordSolver {
    config: BellmanFordConfig,
}

impl BellmanFordSolver {
    pub fn new(config: BellmanFordConfig) -> Self {
        Self { config }
    }

    /// Relaxes every edge up to |V| - 1 times from `source`, then checks once more.
    ///
    /// # Errors
    /// `Error::NegativeCycle` if some edge still improves after the final pass. No
    /// partial distances are returned in that case.
    fn relax_from<N: Node>(
        &self,
        graph: &Graph<N>,
        source: usize,
    ) -> Result<(Vec<Weight>, Vec<Option<usize>>), Error> {
        let num_nodes = graph.num_nodes();
        let mut distance = vec![f64::INFINITY; num_nodes];
        let mut predecessors = vec![None; num_nodes];
        distance[source] = 0.0;

        for pass in 0..num_nodes.saturating_sub(1) {
            let mut updated = false;

            for (u, v, weight) in graph.edges() {
                if distance[u].is_infinite() {
                    continue;
                }
                if distance[u] + weight < distance[v] {
                    distance[v] = distance[u] + weight;
                    predecessors[v] = Some(u);
                    updated = true;
                }
            }

            if !updated && self.config.early_termination {
                debug!(passes = pass + 1, "relaxation converged");
                break;
            }
        }

        for (u, v, weight) in graph.edges() {
            if distance[u].is_finite() && distance[u] + weight < distance[v] {
                warn!(
                    from = ?graph.label(u),
                    to = ?graph.label(v),
                    "edge still relaxes after |V| - 1 passes"
                );
                return Err(Error::NegativeCycle);
            }
        }

        Ok((distance, predecessors))
    }
}

impl<N: Node> ShortestPathSolver<N> for BellmanFordSolver {
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(source = ?source, nodes = graph.num_nodes(), edges = graph.num_edges())
    )]
    fn shortest_paths(&self, graph: &Graph<N>, source: &N) -> Result<ShortestPaths<N>, Error> {
        let Some(src) = graph.index_of(source) else {
            debug!("source not in graph, nothing is reachable");
            return Ok(unknown_source_paths(graph, source));
        };

        let (distance, predecessors) = self.relax_from(graph, src)?;
        let (distances, predecessors) = label_tables(graph, &distance, &predecessors);

        Ok(ShortestPaths {
            source: source.clone(),
            distances,
            predecessors,
        })
    }

    #[tracing::instrument(level = "debug", skip_all, fields(source = ?source, target = ?target))]
    fn shortest_path(
        &self,
        graph: &Graph<N>,
        source: &N,
        target: &N,
    ) -> Result<PathResult<N>, Error> {
        let Some(src) = graph.index_of(source) else {
            if source == target {
                return Ok(PathResult {
                    distance: 0.0,
                    path: vec![source.clone()],
                });
            }
            return Err(Error::no_path(source, target));
        };

        // A reachable negative cycle poisons every answer, so relax before looking
        // at the target at all.
        let (distance, predecessors) = self.relax_from(graph, src)?;

        let dst = graph
            .index_of(target)
            .filter(|&dst| distance[dst].is_finite())
            .ok_or_else(|| Error::no_path(source, target))?;

        let path = reconstruct_path(graph, &predecessors, src, dst)?;
        Ok(PathResult {
            distance: distance[dst],
            path,
        })
    }
}

impl<N: Node> NegativeCycleDetector<N> for BellmanFordSolver {
    /// Finds a negative cycle anywhere in the graph, independent of any source.
    ///
    /// Every node starts at distance 0, which behaves like a virtual source joined to
    /// all nodes by zero-weight edges, so cycles in components no single node can
    /// reach are still found. All |V| - 1 passes always run; early termination does
    /// not apply here.
    ///
    /// # Returns
    /// - `Ok(Some(cycle))` → closed cycle whose weights sum below zero.
    /// - `Ok(None)` → no negative cycle, or an empty graph.
    /// - `Err(e)` → the predecessor chain could not be traced.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(nodes = graph.num_nodes(), edges = graph.num_edges())
    )]
    fn find_negative_cycle(&self, graph: &Graph<N>) -> Result<Option<WeightedCycle<N>>, Error> {
        let num_nodes = graph.num_nodes();
        if num_nodes == 0 {
            return Ok(None);
        }

        let mut distance = vec![0.0; num_nodes];
        let mut predecessors = vec![None; num_nodes];

        for _ in 0..num_nodes - 1 {
            for (u, v, weight) in graph.edges() {
                if distance[u] + weight < distance[v] {
                    distance[v] = distance[u] + weight;
                    predecessors[v] = Some(u);
                }
            }
        }

        let mut cycle_node = None;
        for (u, v, weight) in graph.edges() {
            if distance[u] + weight < distance[v] {
                // Apply the improving edge so `v` has a predecessor to walk from.
                distance[v] = distance[u] + weight;
                predecessors[v] = Some(u);
                cycle_node = Some(v);
                break;
            }
        }

        let Some(start) = cycle_node else {
            debug!("no negative cycle");
            return Ok(None);
        };

        let cycle = trace_cycle(graph, &predecessors, start)?;
        debug!(
            length = cycle.len(),
            total_weight = cycle.total_weight,
            "negative cycle found"
        );
        Ok(Some(cycle))
    }
}

/// Shortest distances from `source`, tolerating negative edge weights.
///
/// # Errors
/// `Error::NegativeCycle` if a negative cycle is reachable from `source`.
pub fn bellman_ford<N: Node>(graph: &Graph<N>, source: &N) -> Result<ShortestPaths<N>, Error> {
    BellmanFordSolver::default().shortest_paths(graph, source)
}

/// Shortest path from `source` to `target`, tolerating negative edge weights.
pub fn bellman_ford_path<N: Node>(
    graph: &Graph<N>,
    source: &N,
    target: &N,
) -> Result<PathResult<N>, Error> {
    BellmanFordSolver::default().shortest_path(graph, source, target)
}

/// Returns one negative cycle of `graph`, if any exists.
pub fn detect_negative_cycle<N: Node>(graph: &Graph<N>) -> Result<Option<WeightedCycle<N>>, Error> {
    BellmanFordSolver::default().find_negative_cycle(graph)
}
