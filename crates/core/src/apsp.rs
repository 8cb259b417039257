use std::collections::{BTreeMap, BTreeSet};

use common::{
    distance::Distance,
    types::{NodeId, WeightedAdjacency},
};
use tracing::debug;

/// All-pairs distance table produced by [`floyd_warshall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllPairs<N> {
    nodes: Vec<N>,
    dist: Vec<Vec<Distance>>,
}

impl<N: NodeId> AllPairs<N> {
    /// Nodes in sorted order; row/column order of [`AllPairs::matrix`].
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn matrix(&self) -> &[Vec<Distance>] {
        &self.dist
    }

    /// Shortest distance `from -> to`, `None` if either node is unknown.
    pub fn distance(&self, from: &N, to: &N) -> Option<Distance> {
        let i = self.nodes.binary_search(from).ok()?;
        let j = self.nodes.binary_search(to).ok()?;
        Some(self.dist[i][j])
    }

    /// A negative diagonal entry means some node lies on a negative cycle,
    /// and the distances through it are not meaningful.
    pub fn has_negative_cycle(&self) -> bool {
        (0..self.nodes.len()).any(|i| self.dist[i][i] < Distance::ZERO)
    }

    /// The full `Node -> Node -> distance` table.
    pub fn table(&self) -> BTreeMap<N, BTreeMap<N, Distance>> {
        self.nodes
            .iter()
            .zip(&self.dist)
            .map(|(from, row)| {
                let row = self.nodes.iter().cloned().zip(row.iter().copied()).collect();
                (from.clone(), row)
            })
            .collect()
    }
}

/// Floyd-Warshall over a dense weight table.
///
/// The node universe is every key plus every neighbour key. Self-distance
/// starts at 0 (lower if a negative self-loop is given), direct entries seed
/// their weight and every other pair starts at infinity. Each intermediate
/// node `k` then relaxes `dist[i][j]` against `dist[i][k] + dist[k][j]`.
pub fn floyd_warshall<N: NodeId>(adjacency: &WeightedAdjacency<N>) -> AllPairs<N> {
    let nodes: Vec<N> = adjacency
        .iter()
        .flat_map(|(u, row)| std::iter::once(u).chain(row.keys()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let n = nodes.len();
    let position = |node: &N| nodes.binary_search(node).ok();

    let mut dist = vec![vec![Distance::Infinite; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = Distance::ZERO;
    }

    for (u, row) in adjacency {
        let Some(i) = position(u) else { continue };
        for (v, &w) in row {
            let Some(j) = position(v) else { continue };
            if i == j {
                dist[i][i] = dist[i][i].min(Distance::from(w));
            } else {
                dist[i][j] = Distance::from(w);
            }
        }
    }

    let mut updates = 0usize;
    for k in 0..n {
        for i in 0..n {
            if !dist[i][k].is_finite() {
                continue;
            }
            for j in 0..n {
                let through_k = dist[i][k] + dist[k][j];
                if through_k < dist[i][j] {
                    dist[i][j] = through_k;
                    updates += 1;
                }
            }
        }
    }

    debug!(nodes = n, updates, "floyd-warshall finished");

    AllPairs { nodes, dist }
}

#[cfg(test)]
mod floyd_warshall_tests {
    use super::*;
    use common::types::Weight;

    fn table(entries: &[(&'static str, &'static str, Weight)]) -> WeightedAdjacency<&'static str> {
        let mut adj = WeightedAdjacency::new();
        for &(u, v, w) in entries {
            adj.entry(u).or_insert_with(BTreeMap::new).insert(v, w);
        }
        adj
    }

    #[test]
    fn relaxes_through_intermediate_nodes() {
        let adj = table(&[("A", "B", 1), ("B", "C", 2), ("A", "C", 5)]);

        let result = floyd_warshall(&adj);

        assert_eq!(result.distance(&"A", &"C"), Some(Distance::Finite(3)));
        assert_eq!(result.distance(&"A", &"B"), Some(Distance::Finite(1)));
        assert_eq!(result.distance(&"C", &"A"), Some(Distance::Infinite));
        assert!(!result.has_negative_cycle());
    }

    #[test]
    fn self_distance_is_zero() {
        let adj = table(&[("A", "B", 4), ("B", "A", 4)]);

        let result = floyd_warshall(&adj);

        assert_eq!(result.distance(&"A", &"A"), Some(Distance::ZERO));
        assert_eq!(result.distance(&"B", &"B"), Some(Distance::ZERO));
    }

    #[test]
    fn neighbour_only_nodes_are_part_of_the_table() {
        let adj = table(&[("A", "Z", 2)]);

        let result = floyd_warshall(&adj);

        assert_eq!(result.nodes(), &["A", "Z"]);
        assert_eq!(result.distance(&"Z", &"Z"), Some(Distance::ZERO));
        assert_eq!(result.distance(&"Z", &"A"), Some(Distance::Infinite));
    }

    #[test]
    fn disconnected_pairs_stay_infinite() {
        let mut adj = table(&[("A", "B", 1)]);
        adj.insert("C", BTreeMap::new());

        let result = floyd_warshall(&adj).table();

        assert_eq!(result[&"A"][&"C"], Distance::Infinite);
        assert_eq!(result[&"C"][&"B"], Distance::Infinite);
        assert_eq!(result[&"A"][&"B"], Distance::Finite(1));
    }

    #[test]
    fn negative_edges_without_cycles() {
        let adj = table(&[("A", "B", 4), ("A", "C", 1), ("C", "B", -2), ("B", "D", 1)]);

        let result = floyd_warshall(&adj);

        assert_eq!(result.distance(&"A", &"B"), Some(Distance::Finite(-1)));
        assert_eq!(result.distance(&"A", &"D"), Some(Distance::Finite(0)));
        assert!(!result.has_negative_cycle());
    }

    #[test]
    fn negative_cycle_shows_on_the_diagonal() {
        let adj = table(&[("A", "B", 1), ("B", "A", -3)]);

        assert!(floyd_warshall(&adj).has_negative_cycle());
    }

    #[test]
    fn negative_self_loop_lowers_the_diagonal() {
        let adj = table(&[("A", "A", -1)]);

        let result = floyd_warshall(&adj);
        assert!(result.has_negative_cycle());
        assert!(result.distance(&"A", &"A").unwrap() < Distance::ZERO);
    }

    #[test]
    fn empty_table() {
        let result = floyd_warshall(&WeightedAdjacency::<&str>::new());
        assert!(result.nodes().is_empty());
        assert!(result.table().is_empty());
    }
}
