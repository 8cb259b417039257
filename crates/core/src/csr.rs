use common::types::Weight;

/// Index-based adjacency in Compressed Sparse Row (CSR) format.
///
/// CSR format stores outgoing edges of each node contiguously in memory:
/// - `node_pointers[u]..node_pointers[u+1]` → edges from node `u`
/// - `edge_targets[i]` -> target node of edge `i`
/// - `edge_weights[i]` -> weight of edge `i`
///
/// Within one node's block, edges keep the order in which they were supplied,
/// so traversals that depend on neighbour order stay reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Csr {
    pub num_nodes: usize,
    pub node_pointers: Vec<usize>,
    pub edge_targets: Vec<usize>,
    pub edge_weights: Vec<Weight>,
}

impl Csr {
    /// Builds the CSR arrays from `(src, dst, weight)` index triples.
    ///
    /// Uses the two-pass counting technique: first count out-degrees into
    /// `node_pointers`, prefix-sum them, then scatter every edge into the next
    /// free slot of its source block. The scatter walks `edges` in order, which
    /// makes the layout a stable sort by source.
    pub fn from_indexed_edges(num_nodes: usize, edges: &[(usize, usize, Weight)]) -> Self {
        let m = edges.len();
        let mut node_pointers = vec![0; num_nodes + 1];

        for &(u, _, _) in edges {
            node_pointers[u + 1] += 1;
        }

        for i in 1..=num_nodes {
            node_pointers[i] += node_pointers[i - 1];
        }

        let mut edge_targets = vec![0; m];
        let mut edge_weights = vec![0; m];

        let mut cursor = node_pointers.clone();

        for &(u, v, w) in edges {
            let pos = cursor[u]; // Get the next available position for node 'u'
            edge_targets[pos] = v;
            edge_weights[pos] = w;

            // Advance the cursor for node 'u' to point to the next free slot.
            cursor[u] += 1;
        }

        Self {
            num_nodes,
            node_pointers,
            edge_targets,
            edge_weights,
        }
    }

    /// Outgoing `(target, weight)` pairs of `u`, in insertion order.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = (usize, Weight)> + '_ {
        let start = self.node_pointers[u];
        let end = self.node_pointers[u + 1];
        self.edge_targets[start..end]
            .iter()
            .copied()
            .zip(self.edge_weights[start..end].iter().copied())
    }

    pub fn out_degree(&self, u: usize) -> usize {
        self.node_pointers[u + 1] - self.node_pointers[u]
    }

    pub fn num_edges(&self) -> usize {
        self.edge_targets.len()
    }
}
