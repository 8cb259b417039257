use std::sync::Arc;

use tracing::{debug, info};

use super::config::Config;
use super::error::Error;
use super::report;
use super::types::{Algorithm, SharedGraph};
use graph_solver_core::{
    BellmanFordSolver, ShortestPathSolver, ShortestPaths, floyd_warshall, paint_dsatur, prim,
    validate_coloring,
};

/// Runs a shortest-path solver from every node of a shared graph.
///
/// Each source gets its own blocking task on the runtime's blocking pool;
/// the graph is shared read-only through the `Arc`, and every task owns its
/// working state. Results come back in node order.
pub struct SourceSweeper<S> {
    solver: Arc<S>,
    graph: SharedGraph,
}

impl<S> SourceSweeper<S>
where
    S: ShortestPathSolver<String> + Send + Sync + 'static,
{
    pub fn new(graph: SharedGraph, solver: S) -> Self {
        SourceSweeper {
            solver: Arc::new(solver),
            graph,
        }
    }

    pub async fn sweep(&self) -> Result<Vec<ShortestPaths<String>>, Error> {
        info!(sources = self.graph.node_count(), "starting all-sources sweep");

        let handles: Vec<_> = self
            .graph
            .nodes()
            .iter()
            .cloned()
            .map(|source| {
                let graph = Arc::clone(&self.graph);
                let solver = Arc::clone(&self.solver);
                tokio::task::spawn_blocking(move || solver.shortest_paths(&graph, &source))
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle.await??;
            debug!(source = %result.source, ok = result.ok, "source finished");
            results.push(result);
        }

        Ok(results)
    }
}

/// Picks the source node: the requested one, or the first node in sorted order.
pub fn resolve_source(graph: &SharedGraph, requested: Option<&str>) -> Result<String, Error> {
    match requested {
        Some(name) => {
            let name = name.to_string();
            graph.require(&name)?;
            Ok(name)
        }
        None => graph
            .nodes()
            .first()
            .cloned()
            .ok_or_else(|| Error::GraphError(common::error::Error::EmptyGraph)),
    }
}

/// Runs one algorithm over the graph and renders its report.
pub async fn execute(
    algorithm: Algorithm,
    graph: SharedGraph,
    source: Option<&str>,
    all_sources: bool,
    config: &Config,
) -> Result<String, Error> {
    let mut out = report::describe(&graph, &config.report);
    out.push('\n');

    let section = match algorithm {
        Algorithm::Describe => String::new(),
        Algorithm::BellmanFord if all_sources => {
            let sweeper = SourceSweeper::new(Arc::clone(&graph), BellmanFordSolver);
            report::sweep_summary(&sweeper.sweep().await?)
        }
        Algorithm::BellmanFord => {
            let source = resolve_source(&graph, source)?;
            let result = BellmanFordSolver.shortest_paths(&graph, &source)?;
            report::shortest_paths(&result)
        }
        Algorithm::Prim => {
            let source = resolve_source(&graph, source)?;
            let tree = prim(&graph, &source)?;
            report::spanning_tree(&source, &tree)
        }
        Algorithm::FloydWarshall => report::all_pairs(&floyd_warshall(&graph.weighted_adjacency())),
        Algorithm::Coloring => {
            let adjacency = graph.adjacency_list();
            let coloring = paint_dsatur(&adjacency);
            let (valid, errors) = validate_coloring(&adjacency, &coloring);
            report::coloring(&coloring, valid, &errors)
        }
    };

    out.push_str(&section);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GraphConfig, ReportConfig, RunnerConfig, SimulatorConfig};
    use common::distance::Distance;
    use common::types::Edge;
    use graph_solver_core::{Graph, bellman_ford};

    fn shared(directed: bool, edges: &[(&str, &str, i64)]) -> SharedGraph {
        Arc::new(Graph::from_edges(
            directed,
            edges
                .iter()
                .map(|&(u, v, w)| Edge::new(u.to_string(), v.to_string(), w))
                .collect(),
        ))
    }

    fn test_config() -> Config {
        Config {
            graph: GraphConfig { default_weight: 1 },
            simulator: SimulatorConfig {
                total_nodes: 4,
                edge_count: 4,
                min_weight: 1,
                max_weight: 3,
                directed: true,
                seed: Some(1),
            },
            report: ReportConfig {
                show_adjacency: false,
                show_matrix: false,
            },
            runner: RunnerConfig { worker_threads: 2 },
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn sweep_matches_sequential_runs() {
        let graph = shared(true, &[("A", "B", 2), ("B", "C", -1), ("C", "A", 4), ("A", "D", 7)]);

        let results = SourceSweeper::new(Arc::clone(&graph), BellmanFordSolver)
            .sweep()
            .await
            .unwrap();

        assert_eq!(results.len(), 4);
        for (result, source) in results.iter().zip(graph.nodes()) {
            assert_eq!(&result.source, source);
            assert_eq!(result, &bellman_ford(&graph, source).unwrap());
        }
        assert_eq!(results[0].dist[&"C".to_string()], Distance::Finite(1));
    }

    #[tokio::test]
    async fn sweep_reports_cycles_per_source() {
        let graph = shared(true, &[("A", "B", 1), ("B", "A", -2), ("C", "A", 0)]);

        let results = SourceSweeper::new(graph, BellmanFordSolver).sweep().await.unwrap();

        assert!(results.iter().all(|r| !r.ok));
    }

    #[test]
    fn resolve_source_defaults_to_first_node() {
        let graph = shared(true, &[("B", "C", 1), ("A", "B", 1)]);

        assert_eq!(resolve_source(&graph, None).unwrap(), "A");
        assert_eq!(resolve_source(&graph, Some("C")).unwrap(), "C");
        assert!(matches!(
            resolve_source(&graph, Some("Z")),
            Err(Error::GraphError(common::error::Error::UnknownNode(_)))
        ));
    }

    #[test]
    fn resolve_source_on_empty_graph() {
        let graph = shared(true, &[]);
        assert!(matches!(
            resolve_source(&graph, None),
            Err(Error::GraphError(common::error::Error::EmptyGraph))
        ));
    }

    #[tokio::test]
    async fn execute_renders_each_algorithm() {
        let graph = shared(false, &[("A", "B", 1), ("B", "C", 2), ("A", "C", 2)]);
        let config = test_config();

        let text = execute(Algorithm::Prim, Arc::clone(&graph), None, false, &config)
            .await
            .unwrap();
        assert!(text.contains("Total cost: 3"));

        let text = execute(Algorithm::Coloring, Arc::clone(&graph), None, false, &config)
            .await
            .unwrap();
        assert!(text.contains("Colors used: 3"));

        let text = execute(Algorithm::BellmanFord, Arc::clone(&graph), Some("B"), false, &config)
            .await
            .unwrap();
        assert!(text.contains("Bellman-Ford from B"));

        let text = execute(Algorithm::FloydWarshall, Arc::clone(&graph), None, false, &config)
            .await
            .unwrap();
        assert!(text.contains("Floyd-Warshall"));

        let text = execute(Algorithm::BellmanFord, graph, None, true, &config)
            .await
            .unwrap();
        assert!(text.contains("from every source"));
    }
}
