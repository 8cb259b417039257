use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::graph::Graph;
use common::{
    distance::Distance,
    error::Error,
    types::{DistanceMap, NodeId, PredecessorMap, Weight},
};
use tracing::debug;

/// Result of growing a minimum spanning tree from one source.
///
/// Only the component containing the source is spanned. Nodes outside it
/// keep an infinite key and no parent, and are excluded from `total_cost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningTree<N> {
    /// Sum of the tree edge weights, widened so it cannot overflow.
    pub total_cost: i128,
    pub pred: PredecessorMap<N>,
    pub key: DistanceMap<N>,
}

impl<N: NodeId> SpanningTree<N> {
    /// `true` when every node of the graph was reached from the source.
    pub fn is_spanning(&self) -> bool {
        self.key.values().all(|k| k.is_finite())
    }

    /// Nodes that joined the tree, in node order.
    pub fn reached(&self) -> Vec<N> {
        self.key
            .iter()
            .filter(|(_, k)| k.is_finite())
            .map(|(n, _)| n.clone())
            .collect()
    }

    /// Tree edges as `(parent, child, weight)`, in child order.
    pub fn edges(&self) -> Vec<(N, N, Weight)> {
        self.pred
            .iter()
            .filter_map(|(child, parent)| {
                let parent = parent.as_ref()?;
                let weight = Weight::try_from(self.key.get(child)?.finite()?).ok()?;
                Some((parent.clone(), child.clone(), weight))
            })
            .collect()
    }
}

/// Prim's algorithm with a lazy-deletion binary heap.
///
/// Edges are traversable in both directions whatever the graph's
/// directedness flag. There is no decrease-key: an improved key pushes a new
/// heap entry, and entries for nodes already in the tree are discarded on pop.
///
/// # Errors
/// Returns `Error::UnknownNode` if `source` is not in the graph.
pub fn prim<N: NodeId>(graph: &Graph<N>, source: &N) -> Result<SpanningTree<N>, Error> {
    let src = graph.require(source)?;
    let num_nodes = graph.node_count();
    let adjacency = graph.symmetric_csr();

    let mut key = vec![Distance::Infinite; num_nodes];
    let mut pred: Vec<Option<usize>> = vec![None; num_nodes];
    let mut in_tree = vec![false; num_nodes];
    let mut heap = BinaryHeap::with_capacity(num_nodes);

    key[src] = Distance::ZERO;
    heap.push(Reverse((Distance::ZERO, src)));

    let mut stale = 0usize;

    while let Some(Reverse((_, u))) = heap.pop() {
        if in_tree[u] {
            stale += 1;
            continue;
        }
        in_tree[u] = true;

        for (v, weight) in adjacency.neighbors(u) {
            let candidate = Distance::from(weight);
            if !in_tree[v] && candidate < key[v] {
                key[v] = candidate;
                pred[v] = Some(u);
                heap.push(Reverse((candidate, v)));
            }
        }
    }

    // Keys are single edge weights, so at most |V| i64 values are summed.
    let total_cost: i128 = key.iter().filter_map(|k| k.finite()).sum();

    debug!(
        reached = in_tree.iter().filter(|&&t| t).count(),
        nodes = num_nodes,
        stale,
        total_cost,
        "prim finished"
    );

    let nodes = graph.nodes();
    Ok(SpanningTree {
        total_cost,
        pred: nodes
            .iter()
            .cloned()
            .zip(pred.into_iter().map(|p| p.map(|i| nodes[i].clone())))
            .collect(),
        key: nodes.iter().cloned().zip(key).collect(),
    })
}
