use std::path::PathBuf;
use std::sync::Arc;

use super::error::Error;
use graph_solver_core::Graph;

/// Graphs handled by the executor are keyed by their textual labels.
pub type LabelGraph = Graph<String>;

/// Read-only graph shared across worker tasks.
pub type SharedGraph = Arc<LabelGraph>;

/// A trait defining the contract for anything that can produce a graph
/// snapshot for the algorithms: on-disk formats or the simulator.
pub trait GraphSource {
    fn load(&self) -> Result<LabelGraph, Error>;
}

/// Where the graph comes from, as chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    SIM,
    DOT(PathBuf),
    MATRIX(PathBuf),
    CSV(PathBuf),
}

/// Algorithm selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Algorithm {
    /// Print the graph: nodes, edges, adjacency list/matrix.
    Describe,
    /// Single-source shortest paths with negative-cycle detection.
    BellmanFord,
    /// Minimum spanning tree grown from the source.
    Prim,
    /// All-pairs shortest distances.
    FloydWarshall,
    /// DSATUR coloring followed by validation.
    Coloring,
}
