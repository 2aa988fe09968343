use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Edge weight / path cost.
pub type Weight = f64;

/// Type alias for a single labelled edge: (from, to, weight)
pub type Edge<N> = (N, N, Weight);

/// Bound shared by every node label: hashable, comparable, cheap enough to clone,
/// and printable for error messages.
pub trait Node: Eq + Hash + Clone + Debug {}

impl<T> Node for T where T: Eq + Hash + Clone + Debug {}

/// Single-source result: best distance and immediate predecessor for every node.
///
/// Unreached nodes map to `f64::INFINITY` and a `None` predecessor, as does the
/// source itself (with distance `0.0`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPaths<N: Node> {
    pub source: N,
    pub distances: HashMap<N, Weight>,
    pub predecessors: HashMap<N, Option<N>>,
}

impl<N: Node> ShortestPaths<N> {
    /// Distance to `node`, `INFINITY` when unknown or unreached.
    pub fn distance(&self, node: &N) -> Weight {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, node: &N) -> bool {
        self.distance(node).is_finite()
    }

    pub fn predecessor(&self, node: &N) -> Option<&N> {
        self.predecessors.get(node).and_then(Option::as_ref)
    }
}

/// Source-to-target answer: total cost and the node sequence, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult<N> {
    pub distance: Weight,
    pub path: Vec<N>,
}

impl<N> PathResult<N> {
    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Represents a negative cycle found in a weighted directed graph.
///
/// Fields:
/// - `nodes`: The cycle in traversal order, closed: the first node is repeated as the last.
/// - `total_weight`: Sum of edge weights around the cycle; always negative for a witness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedCycle<N> {
    pub nodes: Vec<N>,
    pub total_weight: Weight,
}

impl<N> WeightedCycle<N> {
    /// Number of distinct edges in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consecutive `(from, to)` pairs around the cycle.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.nodes.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}
