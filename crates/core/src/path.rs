//! Predecessor-chain walks shared by every engine.

use crate::graph::Graph;
use common::{
    error::Error,
    types::{Node, ShortestPaths, Weight, WeightedCycle},
};
use std::collections::HashMap;

/// Walks `predecessors` from `target` back to `source` and returns the labels in
/// source-to-target order.
///
/// # Errors
/// Returns `Error::BrokenPathReconstruction` if the chain hits `None` before reaching
/// `source`, or runs longer than the graph has nodes (a predecessor loop).
pub fn reconstruct_path<N: Node>(
    graph: &Graph<N>,
    predecessors: &[Option<usize>],
    source: usize,
    target: usize,
) -> Result<Vec<N>, Error> {
    let mut path = vec![graph.label(target).clone()];
    let mut current = target;

    while current != source {
        if path.len() > graph.num_nodes() {
            return Err(Error::broken_chain(graph.label(current)));
        }
        current = predecessors[current].ok_or_else(|| Error::broken_chain(graph.label(current)))?;
        path.push(graph.label(current).clone());
    }

    path.reverse();
    Ok(path)
}

/// Reconstructs a negative cycle from a predecessor table left behind by a
/// relaxation that failed to converge.
///
/// `start` is the node whose distance still improved on the detection pass. It may
/// sit downstream of the cycle rather than on it, so the walk first steps back
/// `num_nodes` times, which is guaranteed to land inside the cycle, then traces
/// predecessors until that node comes around again.
///
/// # Returns
/// The closed cycle in forward order (first node repeated last) with its weight sum.
///
/// # Errors
/// Returns `Error::BrokenPathReconstruction` if a predecessor is missing along the
/// way or an edge of the traced cycle is not in the graph.
pub fn trace_cycle<N: Node>(
    graph: &Graph<N>,
    predecessors: &[Option<usize>],
    start: usize,
) -> Result<WeightedCycle<N>, Error> {
    let num_nodes = graph.num_nodes();

    // Trace backwards `num_nodes` steps to reach a node inside the cycle.
    let mut trace_node = start;
    for _ in 0..num_nodes {
        trace_node = predecessors[trace_node]
            .ok_or_else(|| Error::broken_chain(graph.label(trace_node)))?;
    }

    let cycle_start_node = trace_node;
    let mut cycle = vec![cycle_start_node];
    let mut current = cycle_start_node;

    loop {
        current =
            predecessors[current].ok_or_else(|| Error::broken_chain(graph.label(current)))?;
        cycle.push(current);

        if current == cycle_start_node {
            break;
        }
        if cycle.len() > num_nodes + 1 {
            return Err(Error::broken_chain(graph.label(cycle_start_node)));
        }
    }

    cycle.reverse();

    let mut total_weight: Weight = 0.0;
    for pair in cycle.windows(2) {
        let (u, v) = (pair[0], pair[1]);
        let weight = graph
            .neighbors(u)
            .find(|&(target, _)| target == v)
            .map(|(_, w)| w)
            .ok_or_else(|| Error::broken_chain(graph.label(v)))?;
        total_weight += weight;
    }

    Ok(WeightedCycle {
        nodes: cycle.into_iter().map(|i| graph.label(i).clone()).collect(),
        total_weight,
    })
}

/// Translates index-based tables into the label-keyed maps exposed in results.
pub(crate) fn label_tables<N: Node>(
    graph: &Graph<N>,
    distances: &[Weight],
    predecessors: &[Option<usize>],
) -> (HashMap<N, Weight>, HashMap<N, Option<N>>) {
    let distance_map = graph
        .nodes()
        .iter()
        .cloned()
        .zip(distances.iter().copied())
        .collect();
    let predecessor_map = graph
        .nodes()
        .iter()
        .cloned()
        .zip(
            predecessors
                .iter()
                .map(|pred| pred.map(|p| graph.label(p).clone())),
        )
        .collect();

    (distance_map, predecessor_map)
}

/// Result for a source label the graph does not contain: the source sits at zero
/// and every known node is unreached.
pub(crate) fn unknown_source_paths<N: Node>(graph: &Graph<N>, source: &N) -> ShortestPaths<N> {
    let mut distances: HashMap<N, Weight> = graph
        .nodes()
        .iter()
        .map(|node| (node.clone(), f64::INFINITY))
        .collect();
    let mut predecessors: HashMap<N, Option<N>> =
        graph.nodes().iter().map(|node| (node.clone(), None)).collect();

    distances.insert(source.clone(), 0.0);
    predecessors.insert(source.clone(), None);

    ShortestPaths {
        source: source.clone(),
        distances,
        predecessors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph<&'static str> {
        Graph::from_edges(vec![("A", "B", 1.0), ("B", "C", 2.0), ("C", "D", 3.0)])
    }

    #[test]
    fn reconstruct_path_walks_back_and_reverses() {
        let graph = chain();
        let preds = vec![None, Some(0), Some(1), Some(2)];

        let path = reconstruct_path(&graph, &preds, 0, 3).unwrap();
        assert_eq!(path, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn reconstruct_path_source_equals_target() {
        let graph = chain();
        let preds = vec![None; 4];

        assert_eq!(reconstruct_path(&graph, &preds, 2, 2).unwrap(), vec!["C"]);
    }

    #[test]
    fn reconstruct_path_reports_missing_predecessor() {
        let graph = chain();
        let preds = vec![None, Some(0), None, Some(2)];

        let err = reconstruct_path(&graph, &preds, 0, 3).unwrap_err();
        assert_eq!(
            err,
            Error::BrokenPathReconstruction {
                node: "\"C\"".to_string()
            }
        );
    }

    #[test]
    fn reconstruct_path_detects_predecessor_loop() {
        let graph = chain();
        // B and C point at each other and never reach A.
        let preds = vec![None, Some(2), Some(1), Some(2)];

        let result = reconstruct_path(&graph, &preds, 0, 3);
        assert!(matches!(result, Err(Error::BrokenPathReconstruction { .. })));
    }

    #[test]
    fn trace_cycle_small_graph() {
        let graph = Graph::from_edges(vec![("A", "B", 1.0), ("B", "C", -3.0), ("C", "A", 1.0)]);
        let preds = vec![Some(2), Some(0), Some(1)];

        let cycle = trace_cycle(&graph, &preds, 0).unwrap();

        assert_eq!(cycle.nodes.len(), 4);
        assert_eq!(cycle.nodes.first(), cycle.nodes.last());
        assert_eq!(cycle.total_weight, -1.0);
    }

    #[test]
    fn trace_cycle_starting_downstream_lands_on_cycle() {
        // X -> Y <-> Z, with X only leading into the cycle.
        let graph = Graph::from_edges(vec![("Y", "Z", -2.0), ("Z", "Y", 1.0), ("Z", "X", 0.0)]);
        let y = graph.index_of(&"Y").unwrap();
        let z = graph.index_of(&"Z").unwrap();
        let x = graph.index_of(&"X").unwrap();
        let mut preds = vec![None; 3];
        preds[y] = Some(z);
        preds[z] = Some(y);
        preds[x] = Some(z);

        let cycle = trace_cycle(&graph, &preds, x).unwrap();

        assert!(!cycle.nodes.contains(&"X"));
        assert_eq!(cycle.len(), 2);
        assert_eq!(cycle.total_weight, -1.0);
    }

    #[test]
    fn trace_cycle_missing_predecessor_is_an_error() {
        let graph = chain();
        let preds = vec![None, Some(0), Some(1), Some(2)];

        assert!(trace_cycle(&graph, &preds, 3).is_err());
    }
}
