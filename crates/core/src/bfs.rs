//! Breadth-first search: fewest-hop paths, ignoring edge weights.

use super::graph::Graph;
use super::path::reconstruct_path;
use common::{error::Error, types::Node};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Hop count from `source` to every node it reaches. Unreached nodes are absent.
#[tracing::instrument(level = "debug", skip_all, fields(source = ?source))]
pub fn bfs<N: Node>(graph: &Graph<N>, source: &N) -> HashMap<N, usize> {
    let mut hops = HashMap::new();
    let Some(src) = graph.index_of(source) else {
        hops.insert(source.clone(), 0);
        return hops;
    };

    hops.extend(
        hop_depths(graph, src)
            .into_iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (graph.label(i).clone(), d))),
    );
    hops
}

/// Fewest-hop path from `source` to `target`, returned as `(hops, path)`.
///
/// # Errors
/// `Error::NoPath` if `target` is unreachable.
#[tracing::instrument(level = "debug", skip_all, fields(source = ?source, target = ?target))]
pub fn bfs_path<N: Node>(
    graph: &Graph<N>,
    source: &N,
    target: &N,
) -> Result<(usize, Vec<N>), Error> {
    if source == target {
        return Ok((0, vec![source.clone()]));
    }

    let (Some(src), Some(dst)) = (graph.index_of(source), graph.index_of(target)) else {
        return Err(Error::no_path(source, target));
    };

    let num_nodes = graph.num_nodes();
    let mut seen = vec![false; num_nodes];
    let mut predecessors = vec![None; num_nodes];
    let mut queue = VecDeque::with_capacity(num_nodes);
    seen[src] = true;
    queue.push_back(src);

    while let Some(u) = queue.pop_front() {
        if u == dst {
            break;
        }
        for (v, _) in graph.neighbors(u) {
            if !seen[v] {
                seen[v] = true;
                predecessors[v] = Some(u);
                queue.push_back(v);
            }
        }
    }

    if !seen[dst] {
        return Err(Error::no_path(source, target));
    }

    let path = reconstruct_path(graph, &predecessors, src, dst)?;
    Ok((path.len() - 1, path))
}

/// Every fewest-hop path from `source` to `target`, at most `max_paths` of them, in
/// breadth-first discovery order.
///
/// Returns `[[source]]` when `source == target` and an empty list when `target` is
/// unreachable or unknown.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(source = ?source, target = ?target, max_paths = max_paths)
)]
pub fn bfs_all_paths<N: Node>(
    graph: &Graph<N>,
    source: &N,
    target: &N,
    max_paths: usize,
) -> Vec<Vec<N>> {
    if source == target {
        return vec![vec![source.clone()]];
    }

    let (Some(src), Some(dst)) = (graph.index_of(source), graph.index_of(target)) else {
        return Vec::new();
    };

    let depth = hop_depths(graph, src);
    let Some(target_depth) = depth[dst] else {
        return Vec::new();
    };

    // Only edges that step exactly one level deeper can lie on a fewest-hop path.
    let mut paths = Vec::new();
    let mut partial = VecDeque::from([vec![src]]);
    while paths.len() < max_paths {
        let Some(path) = partial.pop_front() else {
            break;
        };
        let Some(&last) = path.last() else {
            continue;
        };

        if last == dst {
            paths.push(path);
            continue;
        }
        if path.len() - 1 >= target_depth {
            continue;
        }

        let next_depth = depth[last].map(|d| d + 1);
        for (v, _) in graph.neighbors(last) {
            if depth[v] == next_depth {
                let mut extended = path.clone();
                extended.push(v);
                partial.push_back(extended);
            }
        }
    }

    debug!(found = paths.len(), hops = target_depth, "collected fewest-hop paths");
    paths
        .into_iter()
        .map(|path| path.into_iter().map(|i| graph.label(i).clone()).collect())
        .collect()
}

/// Groups nodes by what a breadth-first sweep reaches from each still-unvisited node,
/// taken in graph index order.
///
/// Edges are followed in their stored direction only. Store both directions to get
/// the components of an undirected graph. Each group lists its nodes in discovery
/// order, starting from the node that opened it.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = graph.num_nodes()))]
pub fn connected_components<N: Node>(graph: &Graph<N>) -> Vec<Vec<N>> {
    let num_nodes = graph.num_nodes();
    let mut visited = vec![false; num_nodes];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for root in 0..num_nodes {
        if visited[root] {
            continue;
        }

        visited[root] = true;
        queue.push_back(root);
        let mut component = Vec::new();

        while let Some(u) = queue.pop_front() {
            component.push(graph.label(u).clone());
            for (v, _) in graph.neighbors(u) {
                if !visited[v] {
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }

        components.push(component);
    }

    debug!(components = components.len(), "components collected");
    components
}

/// Hop depth of every node from `src`; `None` for unreached nodes.
fn hop_depths<N: Node>(graph: &Graph<N>, src: usize) -> Vec<Option<usize>> {
    let mut depth: Vec<Option<usize>> = vec![None; graph.num_nodes()];
    let mut queue = VecDeque::with_capacity(graph.num_nodes());
    depth[src] = Some(0);
    queue.push_back(src);

    while let Some(u) = queue.pop_front() {
        let next = depth[u].map_or(0, |d| d + 1);
        for (v, _) in graph.neighbors(u) {
            if depth[v].is_none() {
                depth[v] = Some(next);
                queue.push_back(v);
            }
        }
    }

    depth
}
