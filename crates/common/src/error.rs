use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A node label (source node or edge endpoint) that is not part of the graph's node set.
    UnknownNode(String),

    /// An algorithm that needs at least one node was handed an empty graph.
    EmptyGraph,

    /// Failed to trace the full cycle path, usually due to broken predecessor chains.
    CycleReconstructionFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnknownNode(node) => write!(f, "Node {} is not part of the graph.", node),

            Error::EmptyGraph => write!(f, "Graph has no nodes."),

            Error::CycleReconstructionFailed => write!(
                f,
                "Cycle path reconstruction failed due to broken predecessor chain."
            ),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Builds an `UnknownNode` from any debuggable label.
    pub fn unknown_node<N: fmt::Debug>(node: &N) -> Self {
        Error::UnknownNode(format!("{:?}", node))
    }
}
