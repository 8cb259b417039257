//! Graph algorithms over immutable, label-keyed graph snapshots.
//!
//! Every entry point is a pure function of its inputs: nothing here mutates
//! the graph or keeps state between calls, so independent calls may run on
//! separate threads over a shared `&Graph`.

pub mod apsp;
pub mod coloring;
pub mod csr;
pub mod graph;
pub mod mst;
pub mod solver;
pub mod traits;

pub use apsp::{AllPairs, floyd_warshall};
pub use coloring::{ColoringViolation, color_classes, color_count, paint_dsatur, validate_coloring};
pub use graph::Graph;
pub use mst::{SpanningTree, prim};
pub use solver::{BellmanFordSolver, ShortestPaths, bellman_ford};
pub use traits::ShortestPathSolver;
