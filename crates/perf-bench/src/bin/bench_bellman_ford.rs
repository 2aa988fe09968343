use std::hint::black_box;

use pathfind_core::{bellman_ford, detect_negative_cycle, dijkstra};
use perf_bench::*;
use tracing::{info, warn};

fn main() -> Result<(), Error> {
    init_tracing()?;
    let mut config = load_config()?;
    // Bellman-Ford is O(VE); keep the graph small enough to finish.
    config.graph.num_nodes = config.graph.num_nodes.min(2_000);

    let graph = generate_graph(&config.graph, 0.0);
    info!(nodes = graph.num_nodes(), edges = graph.num_edges(), "graph generated");

    let bf_time = best_of(config.bench.runs, || {
        black_box(bellman_ford(&graph, &0).ok());
    });
    let dijkstra_time = best_of(config.bench.runs, || {
        black_box(dijkstra(&graph, &0).ok());
    });

    // Allow a slice of negative weights so cycles can appear.
    let negative = generate_graph(&config.graph, -0.1 * config.graph.max_weight);
    let mut found = None;
    let detect_time = best_of(config.bench.runs, || match detect_negative_cycle(&negative) {
        Ok(cycle) => found = cycle,
        Err(e) => warn!(error = %e, "cycle extraction failed"),
    });

    println!("--- Bellman-Ford Benchmark Results ({} Nodes) ---", graph.num_nodes());
    println!("Bellman-Ford (non-negative): {:?}", bf_time);
    println!("Dijkstra (same graph):       {:?}", dijkstra_time);
    println!("Negative-cycle detection:    {:?}", detect_time);
    match found {
        Some(cycle) => println!(
            "Cycle: {} edges, total weight {:.6}",
            cycle.len(),
            cycle.total_weight
        ),
        None => println!("Cycle: none"),
    }

    Ok(())
}
