use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::SimulatorConfig;
use super::error::Error;
use super::types::{GraphSource, LabelGraph};
use common::types::Edge;
use graph_solver_core::Graph;
use tracing::info;

/// Produces random weighted graphs for trying the algorithms without input files.
///
/// Nodes are labelled `v0`, `v1`, ... zero-padded so that their sorted order
/// matches their numeric order. Self-loops are never generated; parallel
/// edges may be.
pub struct GraphSimulator {
    config: SimulatorConfig,
}

impl GraphSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        GraphSimulator { config }
    }

    fn node_labels(&self) -> Vec<String> {
        let total = self.config.total_nodes;
        let width = total.saturating_sub(1).to_string().len();
        (0..total).map(|i| format!("v{:0width$}", i)).collect()
    }
}

impl GraphSource for GraphSimulator {
    fn load(&self) -> Result<LabelGraph, Error> {
        let SimulatorConfig {
            total_nodes,
            edge_count,
            min_weight,
            max_weight,
            directed,
            seed,
        } = self.config;

        if min_weight > max_weight {
            return Err(Error::ConfigLoadError(format!(
                "simulator.min_weight ({}) exceeds simulator.max_weight ({})",
                min_weight, max_weight
            )));
        }

        let mut rng: SmallRng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let nodes = self.node_labels();
        let weight_range = min_weight..=max_weight;
        let node_range = 0..total_nodes;

        // Without two distinct nodes every candidate edge would be a self-loop.
        let edges: Vec<Edge<String>> = if total_nodes < 2 {
            Vec::new()
        } else {
            let mut edges = Vec::with_capacity(edge_count);
            while edges.len() < edge_count {
                let from = rng.random_range(node_range.clone());
                let to = rng.random_range(node_range.clone());
                if from == to {
                    continue;
                }
                let weight = rng.random_range(weight_range.clone());
                edges.push(Edge::new(nodes[from].clone(), nodes[to].clone(), weight));
            }
            edges
        };

        info!(
            nodes = total_nodes,
            edges = edges.len(),
            seed = ?seed,
            "simulated graph generated"
        );

        Ok(Graph::new(directed, nodes, edges)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: Option<u64>) -> SimulatorConfig {
        SimulatorConfig {
            total_nodes: 12,
            edge_count: 40,
            min_weight: -3,
            max_weight: 7,
            directed: true,
            seed,
        }
    }

    /// GraphSimulator generates the configured number of nodes and edges.
    #[test]
    fn test_sizes_match_config() {
        let graph = GraphSimulator::new(config(Some(1))).load().unwrap();

        assert_eq!(graph.node_count(), 12);
        assert_eq!(graph.edge_count(), 40);
        assert!(graph.is_directed());
    }

    /// All generated weights are within bounds and no self-loops appear.
    #[test]
    fn test_weights_in_bounds_and_no_self_loops() {
        let graph = GraphSimulator::new(config(None)).load().unwrap();

        for edge in graph.edges() {
            assert!((-3..=7).contains(&edge.weight), "weight out of bounds");
            assert!(!edge.is_self_loop(), "self-loop generated");
        }
    }

    /// A fixed seed reproduces the same graph.
    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = GraphSimulator::new(config(Some(7))).load().unwrap();
        let b = GraphSimulator::new(config(Some(7))).load().unwrap();

        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_labels_sort_numerically() {
        let graph = GraphSimulator::new(config(Some(3))).load().unwrap();

        assert_eq!(graph.nodes()[0], "v00");
        assert_eq!(graph.nodes()[2], "v02");
        assert_eq!(graph.nodes()[11], "v11");
    }

    #[test]
    fn test_single_node_graph_has_no_edges() {
        let mut cfg = config(Some(1));
        cfg.total_nodes = 1;

        let graph = GraphSimulator::new(cfg).load().unwrap();
        assert_eq!(graph.nodes(), &["v0"]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_inverted_weight_range_is_rejected() {
        let mut cfg = config(Some(1));
        cfg.min_weight = 5;
        cfg.max_weight = 1;

        assert!(matches!(
            GraphSimulator::new(cfg).load(),
            Err(Error::ConfigLoadError(_))
        ));
    }
}
