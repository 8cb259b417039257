use std::hint::black_box;
use std::time::Instant;

use graph_solver_core::bellman_ford;
use perf_bench::*;

fn main() {
    let graph = generate_chain(CHAIN_NODES);

    let start_time = Instant::now();
    let result = bellman_ford(&graph, &0);
    let elapsed_time = start_time.elapsed();

    let checksum: i128 = match black_box(result) {
        Ok(paths) => paths.dist.values().filter_map(|d| d.finite()).sum(),
        Err(e) => {
            eprintln!("bellman-ford failed: {}", e);
            return;
        }
    };

    println!(
        "--- Bellman-Ford Benchmark Results ({} Nodes, {} Edges) ---",
        graph.node_count(),
        graph.edge_count()
    );
    println!("Checksum: {}", checksum);
    println!("Elapsed Time: {:?}", elapsed_time);
}
