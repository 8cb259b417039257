// ----------------------------
// Benchmark graph shapes
// ----------------------------

use common::types::{Edge, Weight};
use graph_solver_core::Graph;

pub const CHAIN_NODES: usize = 2_000;
pub const DENSE_NODES: usize = 150;

/// Weight for edge `i -> j` in a graph of `n` nodes, varied by index so the
/// relaxations cannot be folded away.
///
/// Forward edges may be `-1`, but any cycle needs a backward edge costing at
/// least `n`, so no cycle is ever negative.
fn weight_for(i: usize, j: usize, n: usize) -> Weight {
    let w = ((i * 31 + j * 17) % 23) as Weight;
    if j > i { w - 1 } else { w + n as Weight }
}

/// A directed path `0 -> 1 -> ... -> n-1` with its edges listed back to front.
///
/// Listing the edges in reverse is the worst case for Bellman-Ford: each pass
/// only settles one more node, so every one of the `n - 1` passes is needed.
pub fn generate_chain(n: usize) -> Graph<usize> {
    let edges = (1..n)
        .rev()
        .map(|i| Edge::new(i - 1, i, weight_for(i - 1, i, n)))
        .collect();
    Graph::from_edges(true, edges)
}

/// A complete directed graph on `n` nodes.
pub fn generate_dense(n: usize) -> Graph<usize> {
    let mut edges = Vec::with_capacity(n * n.saturating_sub(1));
    for i in 0..n {
        for j in 0..n {
            if i != j {
                edges.push(Edge::new(i, j, weight_for(i, j, n)));
            }
        }
    }
    Graph::from_edges(true, edges)
}
