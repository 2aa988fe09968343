use std::hint::black_box;

use pathfind_core::{astar, dijkstra, dijkstra_path, zero_heuristic};
use perf_bench::*;
use tracing::info;

fn main() -> Result<(), Error> {
    init_tracing()?;
    let config = load_config()?;

    let graph = generate_graph(&config.graph, 0.0);
    let queries = generate_queries(&config.graph, config.bench.queries);
    info!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        queries = queries.len(),
        "graph generated"
    );

    let full = best_of(config.bench.runs, || {
        black_box(dijkstra(&graph, &0).ok());
    });

    let mut dijkstra_total = 0.0;
    let dijkstra_time = best_of(config.bench.runs, || {
        dijkstra_total = queries
            .iter()
            .filter_map(|(s, t)| dijkstra_path(&graph, s, t).ok())
            .map(|p| p.distance)
            .sum();
    });

    let mut astar_total = 0.0;
    let astar_time = best_of(config.bench.runs, || {
        astar_total = queries
            .iter()
            .filter_map(|(s, t)| astar(&graph, s, t, zero_heuristic).ok())
            .map(|p| p.distance)
            .sum();
    });

    println!("--- Dijkstra Benchmark Results ({} Nodes) ---", graph.num_nodes());
    println!("Single-source (all nodes): {:?}", full);
    println!("Dijkstra path queries:     {:?}", dijkstra_time);
    println!("A* (zero heuristic):       {:?}", astar_time);
    println!(
        "Checksum: {:.6} / {:.6}",
        black_box(dijkstra_total),
        black_box(astar_total)
    );

    Ok(())
}
