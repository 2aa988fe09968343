use super::config::DijkstraConfig;
use super::graph::Graph;
use super::path::{label_tables, reconstruct_path, unknown_source_paths};
use super::queue::MinQueue;
use super::traits::ShortestPathSolver;
use common::{
    error::Error,
    types::{Node, PathResult, ShortestPaths, Weight},
};
use tracing::debug;

/// Dijkstra's algorithm with a lazy-deletion binary heap.
///
/// Edge weights must be non-negative. This is not checked; negative weights give
/// deterministic but possibly wrong answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraSolver {
    config: DijkstraConfig,
}

/// Index-level tables produced by one search.
pub(crate) struct SearchTables {
    pub distances: Vec<Weight>,
    pub predecessors: Vec<Option<usize>>,
}

impl DijkstraSolver {
    pub fn new(config: DijkstraConfig) -> Self {
        Self { config }
    }

    /// Greedy relaxation from `source`. With `target` set, stops the moment the
    /// target is settled; its distance is final at that point.
    ///
    /// A node is settled on its first pop. Later pops of the same node are stale
    /// copies left behind by a cheaper push and are skipped.
    pub(crate) fn search<N: Node>(
        graph: &Graph<N>,
        source: usize,
        target: Option<usize>,
    ) -> SearchTables {
        let num_nodes = graph.num_nodes();
        let mut distances = vec![f64::INFINITY; num_nodes];
        let mut predecessors = vec![None; num_nodes];
        let mut settled = vec![false; num_nodes];
        let mut queue = MinQueue::with_capacity(num_nodes);

        distances[source] = 0.0;
        queue.push(source, 0.0);

        while let Some((node, dist)) = queue.pop_min() {
            if settled[node] {
                continue;
            }
            settled[node] = true;

            if dist > distances[node] {
                continue;
            }

            if target == Some(node) {
                debug!(distance = dist, "target settled, stopping early");
                break;
            }

            for (neighbor, weight) in graph.neighbors(node) {
                let candidate = dist + weight;
                if candidate < distances[neighbor] {
                    distances[neighbor] = candidate;
                    predecessors[neighbor] = Some(node);
                    queue.push(neighbor, candidate);
                }
            }
        }

        SearchTables {
            distances,
            predecessors,
        }
    }
}

impl<N: Node> ShortestPathSolver<N> for DijkstraSolver {
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(source = ?source, nodes = graph.num_nodes())
    )]
    fn shortest_paths(&self, graph: &Graph<N>, source: &N) -> Result<ShortestPaths<N>, Error> {
        let Some(src) = graph.index_of(source) else {
            debug!("source not in graph, nothing is reachable");
            return Ok(unknown_source_paths(graph, source));
        };

        let tables = Self::search(graph, src, None);
        let (distances, predecessors) =
            label_tables(graph, &tables.distances, &tables.predecessors);

        Ok(ShortestPaths {
            source: source.clone(),
            distances,
            predecessors,
        })
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(source = ?source, target = ?target, early_exit = self.config.early_exit)
    )]
    fn shortest_path(
        &self,
        graph: &Graph<N>,
        source: &N,
        target: &N,
    ) -> Result<PathResult<N>, Error> {
        if source == target {
            return Ok(PathResult {
                distance: 0.0,
                path: vec![source.clone()],
            });
        }

        let (Some(src), Some(dst)) = (graph.index_of(source), graph.index_of(target)) else {
            return Err(Error::no_path(source, target));
        };

        let stop_at = self.config.early_exit.then_some(dst);
        let tables = Self::search(graph, src, stop_at);

        let distance = tables.distances[dst];
        if distance.is_infinite() {
            return Err(Error::no_path(source, target));
        }

        let path = reconstruct_path(graph, &tables.predecessors, src, dst)?;
        Ok(PathResult { distance, path })
    }
}

/// Shortest distances from `source` to every node. Unreached nodes stay at infinity.
pub fn dijkstra<N: Node>(graph: &Graph<N>, source: &N) -> Result<ShortestPaths<N>, Error> {
    DijkstraSolver::default().shortest_paths(graph, source)
}

/// Shortest path from `source` to `target`, stopping once `target` is settled.
pub fn dijkstra_path<N: Node>(
    graph: &Graph<N>,
    source: &N,
    target: &N,
) -> Result<PathResult<N>, Error> {
    DijkstraSolver::default().shortest_path(graph, source, target)
}

#[cfg(test)]
mod dijkstra_tests {
    use super::*;

    fn graph(edges: &[(&'static str, &'static str, f64)]) -> Graph<&'static str> {
        edges.iter().copied().collect()
    }

    #[test]
    fn simple_graph_distances() {
        let g = graph(&[
            ("A", "B", 4.0),
            ("A", "C", 2.0),
            ("B", "C", 1.0),
            ("B", "D", 5.0),
            ("C", "D", 8.0),
        ]);

        let result = dijkstra(&g, &"A").unwrap();

        assert_eq!(result.distance(&"A"), 0.0);
        assert_eq!(result.distance(&"B"), 4.0);
        assert_eq!(result.distance(&"C"), 2.0);
        assert_eq!(result.distance(&"D"), 9.0);
        assert_eq!(result.predecessor(&"D"), Some(&"B"));
        assert_eq!(result.predecessor(&"A"), None);
    }

    #[test]
    fn path_query_follows_cheapest_route() {
        let g = graph(&[
            ("A", "B", 1.0),
            ("A", "C", 4.0),
            ("B", "C", 2.0),
            ("B", "D", 5.0),
            ("C", "D", 1.0),
        ]);

        let result = dijkstra_path(&g, &"A", &"D").unwrap();

        assert_eq!(result.distance, 4.0);
        assert_eq!(result.path, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn unreachable_target_is_no_path() {
        let g = Graph::with_nodes(vec!["A", "B", "C"], vec![("A", "B", 1.0)]);

        let result = dijkstra_path(&g, &"A", &"C");

        assert_eq!(result, Err(Error::no_path(&"A", &"C")));
    }

    #[test]
    fn unreachable_nodes_keep_infinite_distance() {
        let g = Graph::with_nodes(vec!["A", "B", "C"], vec![("A", "B", 1.0)]);

        let result = dijkstra(&g, &"A").unwrap();

        assert!(result.distance(&"C").is_infinite());
        assert_eq!(result.predecessor(&"C"), None);
        assert_eq!(result.distances.len(), 3);
    }

    #[test]
    fn unknown_source_reaches_nothing() {
        let g = graph(&[("A", "B", 1.0)]);

        let result = dijkstra(&g, &"Z").unwrap();

        assert_eq!(result.distance(&"Z"), 0.0);
        assert!(result.distance(&"A").is_infinite());
        assert!(result.distance(&"B").is_infinite());
    }

    #[test]
    fn unknown_target_is_no_path() {
        let g = graph(&[("A", "B", 1.0)]);
        assert!(matches!(
            dijkstra_path(&g, &"A", &"Q"),
            Err(Error::NoPath { .. })
        ));
    }

    #[test]
    fn source_equals_target() {
        let g = graph(&[("A", "B", 1.0)]);

        let result = dijkstra_path(&g, &"B", &"B").unwrap();

        assert_eq!(result.distance, 0.0);
        assert_eq!(result.path, vec!["B"]);
    }

    #[test]
    fn stale_heap_entries_do_not_corrupt_result() {
        // C is pushed at 10 first, then improved to 3 via B; the stale 10 must be ignored.
        let g = graph(&[
            ("A", "C", 10.0),
            ("A", "B", 1.0),
            ("B", "C", 2.0),
            ("C", "D", 1.0),
        ]);

        let result = dijkstra(&g, &"A").unwrap();

        assert_eq!(result.distance(&"C"), 3.0);
        assert_eq!(result.distance(&"D"), 4.0);
        assert_eq!(result.predecessor(&"C"), Some(&"B"));
    }

    #[test]
    fn self_loops_are_harmless() {
        let g = graph(&[("A", "A", 0.0), ("A", "B", 2.0), ("B", "B", 3.0)]);

        let result = dijkstra(&g, &"A").unwrap();

        assert_eq!(result.distance(&"A"), 0.0);
        assert_eq!(result.distance(&"B"), 2.0);
    }

    #[test]
    fn full_search_and_early_exit_agree() {
        let g = graph(&[
            ("A", "B", 1.0),
            ("A", "C", 4.0),
            ("B", "C", 2.0),
            ("B", "D", 5.0),
            ("C", "D", 1.0),
            ("D", "E", 3.0),
        ]);
        let eager = DijkstraSolver::new(DijkstraConfig { early_exit: true });
        let full = DijkstraSolver::new(DijkstraConfig { early_exit: false });

        assert_eq!(
            eager.shortest_path(&g, &"A", &"D").unwrap(),
            full.shortest_path(&g, &"A", &"D").unwrap()
        );
    }

    #[test]
    fn integer_labels_work() {
        let g: Graph<u32> = vec![(0, 1, 1.5), (1, 2, 1.5), (0, 2, 4.0)].into_iter().collect();

        let result = dijkstra_path(&g, &0, &2).unwrap();

        assert_eq!(result.distance, 3.0);
        assert_eq!(result.path, vec![0, 1, 2]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let g = graph(&[("A", "B", 0.1), ("A", "C", 0.2), ("B", "C", 0.1), ("C", "D", 0.7)]);

        assert_eq!(dijkstra(&g, &"A").unwrap(), dijkstra(&g, &"A").unwrap());
    }
}
