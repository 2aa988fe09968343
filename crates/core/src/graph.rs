use common::types::{Edge, Node, Weight};
use std::collections::HashMap;

/// Immutable weighted directed graph in Compressed Sparse Row (CSR) format.
///
/// Node labels are interned into dense indices `0..num_nodes` in first-seen order;
/// the engines work on indices and translate back to labels only when building results.
///
/// CSR format stores outgoing edges of each node contiguously in memory:
/// - `node_pointers[u]..node_pointers[u+1]` → edges from node `u`
/// - `edge_targets[i]` -> target node of edge `i`
/// - `edge_weights[i]` -> weight of edge `i`
/// - `edge_source_by_index[i]` -> source node of edge `i`
///
/// A node that only ever appears as an edge target is still interned and simply has
/// an empty edge range.
#[derive(Debug, Clone)]
pub struct Graph<N: Node> {
    labels: Vec<N>,
    index: HashMap<N, usize>,
    node_pointers: Vec<usize>,
    edge_targets: Vec<usize>,
    edge_weights: Vec<Weight>,
    edge_source_by_index: Vec<usize>,
}

impl<N: Node> Graph<N> {
    /// Creates a graph from labelled edges `(src, dst, weight)`.
    ///
    /// Edges keep their input order within each source block. When the same
    /// `(src, dst)` pair is given more than once, the last weight wins.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge<N>>,
    {
        Self::with_nodes(std::iter::empty(), edges)
    }

    /// Like [`Graph::from_edges`], but registers `nodes` first so that isolated
    /// nodes are part of the graph and indices follow the given order.
    pub fn with_nodes<V, I>(nodes: V, edges: I) -> Self
    where
        V: IntoIterator<Item = N>,
        I: IntoIterator<Item = Edge<N>>,
    {
        let mut labels = Vec::new();
        let mut index = HashMap::new();

        for node in nodes {
            intern(&mut labels, &mut index, node);
        }

        let mut raw: Vec<(usize, usize, Weight)> = Vec::new();
        let mut position: HashMap<(usize, usize), usize> = HashMap::new();

        for (src, dst, weight) in edges {
            let u = intern(&mut labels, &mut index, src);
            let v = intern(&mut labels, &mut index, dst);

            match position.get(&(u, v)) {
                Some(&slot) => raw[slot].2 = weight,
                None => {
                    position.insert((u, v), raw.len());
                    raw.push((u, v, weight));
                }
            }
        }

        let (node_pointers, edge_targets, edge_weights, edge_source_by_index) =
            Self::build_csr_from_edges(labels.len(), &raw);

        Self {
            labels,
            index,
            node_pointers,
            edge_targets,
            edge_weights,
            edge_source_by_index,
        }
    }

    /// Builds a graph from the nested `{node: {neighbor: weight}}` adjacency form.
    ///
    /// Every key becomes a node even when its neighbor map is empty.
    pub fn from_adjacency(adjacency: HashMap<N, HashMap<N, Weight>>) -> Self {
        let nodes: Vec<N> = adjacency.keys().cloned().collect();
        let edges = adjacency.into_iter().flat_map(|(src, neighbors)| {
            neighbors
                .into_iter()
                .map(move |(dst, weight)| (src.clone(), dst, weight))
        });

        Self::with_nodes(nodes, edges)
    }

    /// Two-pass counting construction of the CSR arrays from index triples.
    ///
    /// A stable counting sort by source keeps each node's edges in input order.
    fn build_csr_from_edges(
        num_nodes: usize,
        edges: &[(usize, usize, Weight)],
    ) -> (Vec<usize>, Vec<usize>, Vec<Weight>, Vec<usize>) {
        let m = edges.len();
        let mut node_pointers = vec![0; num_nodes + 1];

        for &(u, _, _) in edges {
            node_pointers[u + 1] += 1;
        }

        for i in 1..=num_nodes {
            node_pointers[i] += node_pointers[i - 1];
        }

        let mut edge_targets = vec![0; m];
        let mut edge_weights = vec![0.0; m];
        let mut edge_source_by_index = vec![0; m];

        let mut cursor = node_pointers.clone();

        for &(u, v, weight) in edges {
            let pos = cursor[u];
            edge_weights[pos] = weight;
            edge_targets[pos] = v;
            edge_source_by_index[pos] = u;

            cursor[u] += 1;
        }

        (
            node_pointers,
            edge_targets,
            edge_weights,
            edge_source_by_index,
        )
    }

    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// Label of node `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= num_nodes()`; indices only come from this graph.
    pub fn label(&self, idx: usize) -> &N {
        &self.labels[idx]
    }

    /// Node labels in index order.
    pub fn nodes(&self) -> &[N] {
        &self.labels
    }

    /// Outgoing `(target, weight)` pairs of node `u`.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = (usize, Weight)> {
        let range = self.node_pointers[u]..self.node_pointers[u + 1];
        self.edge_targets[range.clone()]
            .iter()
            .copied()
            .zip(self.edge_weights[range].iter().copied())
    }

    /// Every edge `(u, v, weight)` in CSR order (grouped by source index).
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Weight)> {
        self.edge_source_by_index
            .iter()
            .zip(&self.edge_targets)
            .zip(&self.edge_weights)
            .map(|((&u, &v), &w)| (u, v, w))
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn weight(&self, from: &N, to: &N) -> Option<Weight> {
        let u = self.index_of(from)?;
        let v = self.index_of(to)?;
        self.neighbors(u)
            .find(|&(target, _)| target == v)
            .map(|(_, w)| w)
    }

    /// O(1) lookup for the source node of a given edge index.
    pub fn edge_source(&self, edge_idx: usize) -> Option<usize> {
        self.edge_source_by_index.get(edge_idx).copied()
    }
}

impl<N: Node> From<HashMap<N, HashMap<N, Weight>>> for Graph<N> {
    fn from(adjacency: HashMap<N, HashMap<N, Weight>>) -> Self {
        Self::from_adjacency(adjacency)
    }
}

impl<N: Node> FromIterator<Edge<N>> for Graph<N> {
    fn from_iter<I: IntoIterator<Item = Edge<N>>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

fn intern<N: Node>(labels: &mut Vec<N>, index: &mut HashMap<N, usize>, node: N) -> usize {
    if let Some(&idx) = index.get(&node) {
        return idx;
    }
    let idx = labels.len();
    index.insert(node.clone(), idx);
    labels.push(node);
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_edges_creates_correct_csr_for_small_graph() {
        let graph = Graph::from_edges(vec![("C", "B", 0.99), ("A", "C", 1.1), ("A", "B", 0.9)]);

        // Interned in first-seen order: C=0, B=1, A=2
        assert_eq!(graph.nodes(), &["C", "B", "A"]);
        assert_eq!(graph.node_pointers, vec![0, 1, 1, 3]);
        assert_eq!(graph.edge_targets, vec![1, 0, 1]);
        assert_eq!(graph.edge_weights, vec![0.99, 1.1, 0.9]);
        assert_eq!(graph.edge_source_by_index, vec![0, 2, 2]);
    }

    #[test]
    fn target_only_nodes_have_no_outgoing_edges() {
        let graph = Graph::from_edges(vec![(0u32, 2u32, 1.0)]);
        let sink = graph.index_of(&2).unwrap();

        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.neighbors(sink).count(), 0);
    }

    #[test]
    fn with_nodes_keeps_isolated_nodes() {
        let graph = Graph::with_nodes(vec!["A", "B", "C"], vec![("A", "B", 1.0)]);

        assert_eq!(graph.num_nodes(), 3);
        assert!(graph.contains(&"C"));
        assert_eq!(graph.index_of(&"C"), Some(2));
    }

    #[test]
    fn empty_graph() {
        let graph: Graph<&str> = Graph::from_edges(vec![]);

        assert!(graph.is_empty());
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(graph.node_pointers, vec![0]);
    }

    #[test]
    fn duplicate_edge_keeps_latest_weight() {
        let graph = Graph::from_edges(vec![("A", "B", 1.0), ("A", "B", 2.0)]);

        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.weight(&"A", &"B"), Some(2.0));
    }

    #[test]
    fn from_adjacency_registers_empty_keys() {
        let mut adjacency = HashMap::new();
        adjacency.insert("A", HashMap::from([("B", -1.0), ("C", 4.0)]));
        adjacency.insert("C", HashMap::new());
        let graph = Graph::from(adjacency);

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.weight(&"A", &"B"), Some(-1.0));
        assert_eq!(graph.weight(&"C", &"A"), None);
    }

    #[test]
    fn edges_and_edge_source_agree() {
        let graph: Graph<&str> =
            vec![("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 5.0)].into_iter().collect();

        for (i, (u, _, _)) in graph.edges().enumerate() {
            assert_eq!(graph.edge_source(i), Some(u));
        }
        assert_eq!(graph.edge_source(graph.num_edges()), None);
    }

    #[test]
    fn self_loop_is_stored() {
        let graph = Graph::from_edges(vec![("A", "A", 0.0)]);
        let a = graph.index_of(&"A").unwrap();

        assert_eq!(graph.neighbors(a).collect::<Vec<_>>(), vec![(a, 0.0)]);
    }

    #[test]
    fn builds_from_edge_list() {
        let edges: Vec<Edge<String>> = vec![
            ("x".to_string(), "y".to_string(), 1.5),
            ("y".to_string(), "z".to_string(), 2.5),
        ];

        let graph = Graph::with_nodes(Vec::new(), edges);

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.weight(&"y".to_string(), &"z".to_string()), Some(2.5));
    }
}
