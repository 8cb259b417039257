use std::collections::{BTreeMap, BTreeSet, HashMap};

use common::error::Error;
use common::types::{AdjacencyList, Edge, NodeId, Weight, WeightedAdjacency};

use super::csr::Csr;

/// Immutable snapshot of a weighted graph keyed by node labels.
///
/// Nodes are kept sorted and de-duplicated so every algorithm iterates them
/// in the same order. Edges keep the order they were supplied in; parallel
/// edges are not collapsed. The directedness flag does not change storage:
/// an undirected edge is stored once and expanded to both directions by the
/// adjacency builders.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    directed: bool,
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    edges: Vec<Edge<N>>,
}

impl<N: NodeId> Graph<N> {
    /// Creates a graph from an explicit node set and edge list.
    ///
    /// # Errors
    /// Returns `Error::UnknownNode` if an edge endpoint is missing from `nodes`.
    pub fn new(
        directed: bool,
        nodes: impl IntoIterator<Item = N>,
        edges: Vec<Edge<N>>,
    ) -> Result<Self, Error> {
        let nodes: Vec<N> = nodes
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let index: HashMap<N, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();

        for edge in &edges {
            for endpoint in [&edge.source, &edge.target] {
                if !index.contains_key(endpoint) {
                    return Err(Error::unknown_node(endpoint));
                }
            }
        }

        Ok(Self {
            directed,
            nodes,
            index,
            edges,
        })
    }

    /// Creates a graph whose node set is the union of all edge endpoints.
    pub fn from_edges(directed: bool, edges: Vec<Edge<N>>) -> Self {
        let nodes: BTreeSet<N> = edges
            .iter()
            .flat_map(|e| [e.source.clone(), e.target.clone()])
            .collect();

        let nodes: Vec<N> = nodes.into_iter().collect();
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();

        Self {
            directed,
            nodes,
            index,
            edges,
        }
    }

    /// Nodes in sorted order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Edges in the order they were supplied.
    pub fn edges(&self) -> &[Edge<N>] {
        &self.edges
    }

    /// Weight of an edge. Labels were already resolved to integers at
    /// construction, with unparsable ones defaulted.
    pub fn weight_of(&self, edge: &Edge<N>) -> Weight {
        edge.weight
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Position of `node` in [`Graph::nodes`].
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// Resolves a node to its index or fails with `Error::UnknownNode`.
    pub fn require(&self, node: &N) -> Result<usize, Error> {
        self.index_of(node).ok_or_else(|| Error::unknown_node(node))
    }

    /// Node -> sorted neighbour list. Undirected edges appear in both lists.
    pub fn adjacency_list(&self) -> AdjacencyList<N> {
        let mut adj: AdjacencyList<N> = self
            .nodes
            .iter()
            .map(|n| (n.clone(), Vec::new()))
            .collect();

        for edge in &self.edges {
            if let Some(list) = adj.get_mut(&edge.source) {
                list.push(edge.target.clone());
            }
            if !self.directed {
                if let Some(list) = adj.get_mut(&edge.target) {
                    list.push(edge.source.clone());
                }
            }
        }

        for list in adj.values_mut() {
            list.sort();
        }

        adj
    }

    /// |V|×|V| presence matrix in node order: 1 where an edge exists, 0 otherwise.
    pub fn adjacency_matrix(&self) -> Vec<Vec<u8>> {
        let n = self.nodes.len();
        let mut matrix = vec![vec![0u8; n]; n];

        for (u, v, _) in self.indexed_edges() {
            matrix[u][v] = 1;
        }

        matrix
    }

    /// Dense weight table for the all-pairs engine.
    ///
    /// Every node is a key. Parallel edges keep the smallest weight.
    pub fn weighted_adjacency(&self) -> WeightedAdjacency<N> {
        let mut table: WeightedAdjacency<N> = self
            .nodes
            .iter()
            .map(|n| (n.clone(), BTreeMap::new()))
            .collect();

        for (u, v, w) in self.indexed_edges() {
            let row = table.entry(self.nodes[u].clone()).or_default();
            row.entry(self.nodes[v].clone())
                .and_modify(|current| *current = (*current).min(w))
                .or_insert(w);
        }

        table
    }

    /// Edges as `(src, dst, weight)` index triples in supplied order,
    /// expanded to both directions when the graph is undirected.
    pub fn indexed_edges(&self) -> Vec<(usize, usize, Weight)> {
        let capacity = if self.directed {
            self.edges.len()
        } else {
            self.edges.len() * 2
        };
        let mut out = Vec::with_capacity(capacity);

        for edge in &self.edges {
            let u = self.index[&edge.source];
            let v = self.index[&edge.target];
            let w = self.weight_of(edge);
            out.push((u, v, w));
            if !self.directed && u != v {
                out.push((v, u, w));
            }
        }

        out
    }

    /// CSR view where every edge is traversable in both directions,
    /// regardless of the directedness flag.
    pub(crate) fn symmetric_csr(&self) -> Csr {
        let mut triples = Vec::with_capacity(self.edges.len() * 2);
        for edge in &self.edges {
            let u = self.index[&edge.source];
            let v = self.index[&edge.target];
            let w = self.weight_of(edge);
            triples.push((u, v, w));
            triples.push((v, u, w));
        }
        Csr::from_indexed_edges(self.nodes.len(), &triples)
    }
}
