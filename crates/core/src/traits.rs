use super::graph::Graph;
use super::solver::ShortestPaths;
use common::{error::Error, types::NodeId};

/// Trait for single-source shortest-path solvers that can flag negative cycles.
pub trait ShortestPathSolver<N: NodeId> {
    /// Computes distances and predecessors from `source`.
    ///
    /// A negative cycle reachable from `source` is not an error: it is
    /// reported through `ShortestPaths::ok`. Only an unknown `source` fails.
    fn shortest_paths(&self, graph: &Graph<N>, source: &N) -> Result<ShortestPaths<N>, Error>;
}
