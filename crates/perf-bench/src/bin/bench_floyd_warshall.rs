use std::hint::black_box;
use std::time::Instant;

use graph_solver_core::floyd_warshall;
use perf_bench::*;

fn main() {
    let graph = generate_dense(DENSE_NODES);
    let adjacency = graph.weighted_adjacency();

    let start_time = Instant::now();
    let result = black_box(floyd_warshall(&adjacency));
    let elapsed_time = start_time.elapsed();

    // Sum over the finite entries so the whole table is observed.
    let checksum: i128 = result
        .matrix()
        .iter()
        .flatten()
        .filter_map(|d| d.finite())
        .sum();

    println!(
        "--- Floyd-Warshall Benchmark Results ({} Nodes, {} Edges) ---",
        graph.node_count(),
        graph.edge_count()
    );
    println!("Checksum: {}", checksum);
    println!("Elapsed Time: {:?}", elapsed_time);
}
