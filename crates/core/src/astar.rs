use super::graph::Graph;
use super::path::reconstruct_path;
use super::queue::MinQueue;
use common::{
    error::Error,
    types::{Node, PathResult, Weight},
};
use tracing::debug;

/// Heuristic that estimates nothing. Turns A* into Dijkstra's path query.
pub fn zero_heuristic<N>(_node: &N, _goal: &N) -> Weight {
    0.0
}

/// Goal-directed search: Dijkstra's queue discipline keyed by `f = g + h(node, goal)`.
///
/// The heuristic must be admissible (never overestimate the remaining cost) for the
/// returned path to be optimal. This is the caller's responsibility and is not checked.
/// Consistency is not required: a settled node whose cost later drops is reopened
/// and expanded again, so its descendants never keep costs from a stale route.
pub struct AStarSolver<H> {
    heuristic: H,
}

impl<H> AStarSolver<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }

    /// Finds the cheapest path from `start` to `goal`, returning as soon as `goal`
    /// is popped from the queue.
    ///
    /// # Errors
    /// `Error::NoPath` if the frontier empties without reaching `goal`.
    #[tracing::instrument(level = "debug", skip_all, fields(start = ?start, goal = ?goal))]
    pub fn find_path<N>(
        &self,
        graph: &Graph<N>,
        start: &N,
        goal: &N,
    ) -> Result<PathResult<N>, Error>
    where
        N: Node,
        H: Fn(&N, &N) -> Weight,
    {
        if start == goal {
            return Ok(PathResult {
                distance: 0.0,
                path: vec![start.clone()],
            });
        }

        let (Some(src), Some(dst)) = (graph.index_of(start), graph.index_of(goal)) else {
            return Err(Error::no_path(start, goal));
        };

        let num_nodes = graph.num_nodes();
        // None means "no cost known yet", never a numeric placeholder.
        let mut g_score: Vec<Option<Weight>> = vec![None; num_nodes];
        let mut predecessors = vec![None; num_nodes];
        let mut settled = vec![false; num_nodes];
        let mut queue = MinQueue::with_capacity(num_nodes);

        g_score[src] = Some(0.0);
        queue.push(src, (self.heuristic)(start, goal));

        while let Some((node, _f)) = queue.pop_min() {
            if node == dst {
                let distance = g_score[dst].ok_or_else(|| Error::broken_chain(goal))?;
                let path = reconstruct_path(graph, &predecessors, src, dst)?;
                debug!(distance, hops = path.len() - 1, "goal reached");
                return Ok(PathResult { distance, path });
            }

            if settled[node] {
                continue;
            }
            settled[node] = true;

            let Some(g) = g_score[node] else {
                continue;
            };

            for (neighbor, weight) in graph.neighbors(node) {
                let tentative = g + weight;
                let improves = g_score[neighbor].is_none_or(|known| tentative < known);

                if improves {
                    if settled[neighbor] {
                        debug!(node = ?graph.label(neighbor), "reopening settled node");
                        settled[neighbor] = false;
                    }
                    g_score[neighbor] = Some(tentative);
                    predecessors[neighbor] = Some(node);
                    let f = tentative + (self.heuristic)(graph.label(neighbor), goal);
                    queue.push(neighbor, f);
                }
            }
        }

        Err(Error::no_path(start, goal))
    }
}

/// A* search from `start` to `goal` guided by `heuristic(node, goal)`.
pub fn astar<N, H>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
    heuristic: H,
) -> Result<PathResult<N>, Error>
where
    N: Node,
    H: Fn(&N, &N) -> Weight,
{
    AStarSolver::new(heuristic).find_path(graph, start, goal)
}
