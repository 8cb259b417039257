use super::graph::Graph;
use super::traits::ShortestPathSolver;
use common::{
    distance::Distance,
    error::Error,
    types::{DistanceMap, NodeId, PredecessorMap, Weight},
};
use tracing::{debug, warn};

/// Outcome of a single-source shortest-path run.
///
/// When `ok` is `false` a negative cycle is reachable from the source and
/// `dist`/`pred` hold the state after the last regular pass; they are not
/// minimal distances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths<N> {
    pub source: N,
    pub ok: bool,
    pub dist: DistanceMap<N>,
    pub pred: PredecessorMap<N>,
    /// One negative cycle in forward order, present only when `ok` is `false`.
    pub negative_cycle: Option<Vec<N>>,
}

impl<N: NodeId> ShortestPaths<N> {
    pub fn distance(&self, node: &N) -> Option<Distance> {
        self.dist.get(node).copied()
    }

    /// Rebuilds the source -> `target` path by following predecessors.
    ///
    /// Returns `None` for unreachable targets, unknown nodes, or when a
    /// negative cycle was detected.
    pub fn path_to(&self, target: &N) -> Option<Vec<N>> {
        if !self.ok || !self.distance(target)?.is_finite() {
            return None;
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while let Some(Some(parent)) = self.pred.get(current) {
            // Guards against a malformed predecessor chain.
            if path.len() > self.pred.len() {
                return None;
            }
            path.push(parent.clone());
            current = parent;
        }
        path.reverse();

        (path.first() == Some(&self.source)).then_some(path)
    }
}

/// Bellman-Ford: relaxes every edge |V|-1 times in supplied order, then runs
/// one more pass to detect negative cycles.
pub struct BellmanFordSolver;

impl BellmanFordSolver {
    /// Recovers one negative cycle after detection.
    ///
    /// Replays one more full relaxation pass on working copies of `dist` and
    /// `pred`, takes the last node it relaxed and walks back |V| predecessor
    /// steps, which is guaranteed to land on the cycle. The cycle is then
    /// collected and returned in forward order.
    ///
    /// # Errors
    /// Returns `Error::CycleReconstructionFailed` if the predecessor chain breaks.
    pub fn reconstruct_cycle(
        &self,
        num_nodes: usize,
        edges: &[(usize, usize, Weight)],
        dist: &[Distance],
        pred: &[Option<usize>],
    ) -> Result<Vec<usize>, Error> {
        let mut dist = dist.to_vec();
        let mut pred = pred.to_vec();
        let mut last_relaxed = None;

        for &(u, v, w) in edges {
            if let Some(candidate) = dist[u].relaxes(w, dist[v]) {
                dist[v] = candidate;
                pred[v] = Some(u);
                last_relaxed = Some(v);
            }
        }

        let mut trace_node = last_relaxed.ok_or(Error::CycleReconstructionFailed)?;
        for _ in 0..num_nodes {
            trace_node = pred[trace_node].ok_or(Error::CycleReconstructionFailed)?;
        }

        let cycle_start_node = trace_node;
        let mut cycle = vec![cycle_start_node];
        let mut current_node = pred[cycle_start_node].ok_or(Error::CycleReconstructionFailed)?;

        while current_node != cycle_start_node {
            if cycle.len() > num_nodes {
                return Err(Error::CycleReconstructionFailed);
            }
            cycle.push(current_node);
            current_node = pred[current_node].ok_or(Error::CycleReconstructionFailed)?;
        }

        cycle.reverse();
        Ok(cycle)
    }
}

impl<N: NodeId> ShortestPathSolver<N> for BellmanFordSolver {
    fn shortest_paths(&self, graph: &Graph<N>, source: &N) -> Result<ShortestPaths<N>, Error> {
        let src = graph.require(source)?;
        let num_nodes = graph.node_count();

        let mut dist = vec![Distance::Infinite; num_nodes];
        let mut pred: Vec<Option<usize>> = vec![None; num_nodes];
        dist[src] = Distance::ZERO;

        // Weighted edge list is built once; undirected edges are expanded.
        let edges = graph.indexed_edges();

        for pass in 0..num_nodes.saturating_sub(1) {
            let mut updated = false;

            for &(u, v, w) in &edges {
                if let Some(candidate) = dist[u].relaxes(w, dist[v]) {
                    dist[v] = candidate;
                    pred[v] = Some(u);
                    updated = true;
                }
            }

            // A pass without updates is a fixed point; later passes cannot change anything.
            if !updated {
                debug!(pass, "bellman-ford converged early");
                break;
            }
        }

        let ok = !edges
            .iter()
            .any(|&(u, v, w)| dist[u].relaxes(w, dist[v]).is_some());

        let negative_cycle = if ok {
            None
        } else {
            let cycle = self.reconstruct_cycle(num_nodes, &edges, &dist, &pred);
            cycle_labels(graph, source, cycle)
        };

        let nodes = graph.nodes();
        Ok(ShortestPaths {
            source: source.clone(),
            ok,
            dist: nodes.iter().cloned().zip(dist).collect(),
            pred: nodes
                .iter()
                .cloned()
                .zip(pred.into_iter().map(|p| p.map(|i| nodes[i].clone())))
                .collect(),
            negative_cycle,
        })
    }
}

/// Maps a reconstructed cycle back to node labels.
///
/// Detection already set `ok = false`; a failed reconstruction only drops the
/// cycle from the result.
fn cycle_labels<N: NodeId>(
    graph: &Graph<N>,
    source: &N,
    cycle: Result<Vec<usize>, Error>,
) -> Option<Vec<N>> {
    match cycle {
        Ok(cycle) => {
            warn!(
                source = ?source,
                cycle_len = cycle.len(),
                "negative cycle reachable from source"
            );
            Some(cycle.into_iter().map(|i| graph.nodes()[i].clone()).collect())
        }
        Err(e) => {
            warn!(source = ?source, error = %e, "negative cycle detected but not recovered");
            None
        }
    }
}

/// Single-source shortest paths with negative-cycle detection.
///
/// # Errors
/// Returns `Error::UnknownNode` if `source` is not in the graph.
pub fn bellman_ford<N: NodeId>(graph: &Graph<N>, source: &N) -> Result<ShortestPaths<N>, Error> {
    BellmanFordSolver.shortest_paths(graph, source)
}

#[cfg(test)]
mod bellman_ford_tests {
    use super::*;
    use common::types::Edge;

    fn build_graph(edges: &[(&'static str, &'static str, Weight)]) -> Graph<&'static str> {
        Graph::from_edges(
            true,
            edges
                .iter()
                .map(|&(u, v, w)| Edge::new(u, v, w))
                .collect(),
        )
    }

    #[test]
    fn shortest_paths_on_small_dag() {
        let graph = build_graph(&[("A", "B", 1), ("B", "C", 2), ("A", "C", 5)]);

        let result = bellman_ford(&graph, &"A").unwrap();

        assert!(result.ok);
        assert_eq!(result.dist[&"A"], Distance::Finite(0));
        assert_eq!(result.dist[&"B"], Distance::Finite(1));
        assert_eq!(result.dist[&"C"], Distance::Finite(3));
        assert_eq!(result.pred[&"A"], None);
        assert_eq!(result.pred[&"B"], Some("A"));
        assert_eq!(result.pred[&"C"], Some("B"));
        assert_eq!(result.negative_cycle, None);
        assert_eq!(result.path_to(&"C"), Some(vec!["A", "B", "C"]));
    }

    #[test]
    fn detects_two_node_negative_cycle() {
        let graph = build_graph(&[("A", "B", 1), ("B", "A", -3)]);

        let result = bellman_ford(&graph, &"A").unwrap();

        assert!(!result.ok);
        let cycle = result.negative_cycle.clone().expect("cycle must be reconstructed");
        assert_eq!(cycle.len(), 2);
        assert!(cycle.contains(&"A") && cycle.contains(&"B"));
        assert_eq!(result.path_to(&"B"), None);
    }

    #[test]
    fn negative_self_loop_is_a_cycle() {
        let graph = build_graph(&[("A", "B", 2), ("B", "B", -1)]);

        let result = bellman_ford(&graph, &"A").unwrap();

        assert!(!result.ok);
        assert_eq!(result.negative_cycle, Some(vec!["B"]));
    }

    #[test]
    fn extreme_weights_do_not_hide_a_negative_self_loop() {
        let graph = build_graph(&[("A", "B", i64::MIN), ("B", "B", -1)]);

        let result = bellman_ford(&graph, &"A").unwrap();

        assert!(!result.ok);
        assert_eq!(result.negative_cycle, Some(vec!["B"]));
    }

    #[test]
    fn extreme_weights_along_a_path_are_exact() {
        let graph = build_graph(&[("A", "B", i64::MIN), ("B", "C", i64::MIN), ("C", "D", i64::MAX)]);

        let result = bellman_ford(&graph, &"A").unwrap();

        assert!(result.ok);
        assert_eq!(result.dist[&"C"], Distance::Finite(2 * i128::from(i64::MIN)));
        assert_eq!(result.dist[&"D"], Distance::Finite(i128::from(i64::MIN) - 1));
    }

    #[test]
    fn failed_cycle_recovery_keeps_the_flag_only() {
        let graph = build_graph(&[("A", "B", 1)]);

        assert_eq!(
            cycle_labels(&graph, &"A", Err(Error::CycleReconstructionFailed)),
            None
        );
        assert_eq!(cycle_labels(&graph, &"A", Ok(vec![1, 0])), Some(vec!["B", "A"]));
    }

    #[test]
    fn broken_predecessor_chain_fails_reconstruction() {
        let dist = [Distance::ZERO, Distance::Finite(5)];
        let pred = [None, None];

        let result = BellmanFordSolver.reconstruct_cycle(2, &[(0, 1, -1)], &dist, &pred);

        assert!(matches!(result, Err(Error::CycleReconstructionFailed)));
    }

    #[test]
    fn unreachable_negative_cycle_is_not_reported() {
        let graph = build_graph(&[("A", "B", 1), ("C", "D", -5), ("D", "C", 1)]);

        let result = bellman_ford(&graph, &"A").unwrap();

        assert!(result.ok);
        assert_eq!(result.dist[&"C"], Distance::Infinite);
        assert_eq!(result.dist[&"D"], Distance::Infinite);
    }

    #[test]
    fn unreachable_nodes_keep_infinite_distance_and_no_parent() {
        let graph = build_graph(&[("A", "B", 4), ("C", "A", 1)]);

        let result = bellman_ford(&graph, &"A").unwrap();

        assert_eq!(result.dist[&"C"], Distance::Infinite);
        assert_eq!(result.pred[&"C"], None);
        assert_eq!(result.path_to(&"C"), None);
    }

    #[test]
    fn single_node_graph() {
        let graph = Graph::new(true, ["solo"], vec![]).unwrap();

        let result = bellman_ford(&graph, &"solo").unwrap();

        assert!(result.ok);
        assert_eq!(result.dist[&"solo"], Distance::ZERO);
        assert_eq!(result.path_to(&"solo"), Some(vec!["solo"]));
    }

    #[test]
    fn unknown_source_is_rejected() {
        let graph = build_graph(&[("A", "B", 1)]);

        let result = bellman_ford(&graph, &"Z");
        assert!(matches!(result, Err(Error::UnknownNode(_))));
    }

    #[test]
    fn negative_edges_without_cycle() {
        let graph = build_graph(&[("S", "A", 4), ("S", "B", 5), ("B", "A", -3), ("A", "C", 2)]);

        let result = bellman_ford(&graph, &"S").unwrap();

        assert!(result.ok);
        assert_eq!(result.dist[&"A"], Distance::Finite(2));
        assert_eq!(result.dist[&"C"], Distance::Finite(4));
        assert_eq!(result.path_to(&"C"), Some(vec!["S", "B", "A", "C"]));
    }

    #[test]
    fn undirected_negative_edge_forms_a_cycle() {
        let graph = Graph::from_edges(false, vec![Edge::new("A", "B", -1)]);

        let result = bellman_ford(&graph, &"A").unwrap();
        assert!(!result.ok);
    }

    #[test]
    fn equal_cost_ties_keep_first_supplied_predecessor() {
        let graph = build_graph(&[("A", "B", 1), ("A", "C", 1), ("B", "D", 1), ("C", "D", 1)]);

        let result = bellman_ford(&graph, &"A").unwrap();

        assert_eq!(result.dist[&"D"], Distance::Finite(2));
        assert_eq!(result.pred[&"D"], Some("B"));
    }

    #[test]
    fn reruns_are_identical() {
        let graph = build_graph(&[("A", "B", 3), ("B", "C", -1), ("A", "C", 4), ("C", "D", 2)]);

        let first = bellman_ford(&graph, &"A").unwrap();
        let second = bellman_ford(&graph, &"A").unwrap();
        assert_eq!(first, second);
    }

    // ----------------------------
    // Stress and edge-case tests
    // ----------------------------

    #[test]
    fn large_linear_graph_no_cycle() {
        let n = 500usize;
        let edges: Vec<Edge<usize>> = (0..n - 1).map(|i| Edge::new(i, i + 1, 1)).collect();
        let graph = Graph::from_edges(true, edges);

        let result = bellman_ford(&graph, &0).unwrap();

        assert!(result.ok);
        assert_eq!(result.dist[&(n - 1)], Distance::Finite((n - 1) as i128));
    }

    #[test]
    fn large_circular_graph_negative_cycle() {
        let n = 300usize;
        let edges: Vec<Edge<usize>> = (0..n).map(|i| Edge::new(i, (i + 1) % n, -1)).collect();
        let graph = Graph::from_edges(true, edges);

        let result = bellman_ford(&graph, &0).unwrap();

        assert!(!result.ok);
        let cycle = result.negative_cycle.unwrap();
        assert_eq!(cycle.len(), n);
    }

    #[test]
    fn reconstructed_cycle_is_closed_and_negative() {
        let graph = build_graph(&[
            ("S", "A", 1),
            ("A", "B", 2),
            ("B", "C", -4),
            ("C", "A", 1),
            ("C", "D", 1),
        ]);

        let result = bellman_ford(&graph, &"S").unwrap();
        assert!(!result.ok);

        let cycle = result.negative_cycle.unwrap();
        let weight_of = |u: &str, v: &str| {
            graph
                .edges()
                .iter()
                .find(|e| e.source == u && e.target == v)
                .map(|e| e.weight)
                .expect("consecutive cycle nodes must be joined by an edge")
        };

        let total: Weight = (0..cycle.len())
            .map(|i| weight_of(cycle[i], cycle[(i + 1) % cycle.len()]))
            .sum();
        assert!(total < 0, "cycle {:?} has weight {}", cycle, total);
    }
}
