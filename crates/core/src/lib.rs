//! Single-source shortest paths over immutable weighted directed graphs:
//! Dijkstra, A*, Bellman-Ford with negative-cycle extraction, and BFS.
//!
//! ```
//! use pathfind_core::{Graph, dijkstra_path};
//!
//! let graph: Graph<&str> = vec![("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 4.0)]
//!     .into_iter()
//!     .collect();
//!
//! let result = dijkstra_path(&graph, &"A", &"C").unwrap();
//! assert_eq!(result.distance, 3.0);
//! assert_eq!(result.path, vec!["A", "B", "C"]);
//! ```

pub mod astar;
pub mod bellman_ford;
pub mod bfs;
pub mod config;
pub mod dijkstra;
pub mod graph;
pub mod path;
pub mod queue;
pub mod traits;

pub use astar::{AStarSolver, astar, zero_heuristic};
pub use bellman_ford::{
    BellmanFordSolver, bellman_ford, bellman_ford_path, detect_negative_cycle,
};
pub use bfs::{bfs, bfs_all_paths, bfs_path, connected_components};
pub use dijkstra::{DijkstraSolver, dijkstra, dijkstra_path};
pub use graph::Graph;
pub use traits::{NegativeCycleDetector, ShortestPathSolver};
