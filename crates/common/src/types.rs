use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::distance::Distance;

/// Integer edge weight.
pub type Weight = i64;

/// Weight assigned to an edge whose label is missing or not an integer.
pub const DEFAULT_WEIGHT: Weight = 1;

/// Anything usable as a node label: comparable, hashable and printable.
///
/// Labels carry no attributes beyond identity. A blanket impl covers
/// `String`, `&str`, integers and any user type with the same bounds.
pub trait NodeId: Clone + Ord + Hash + Debug {}

impl<T: Clone + Ord + Hash + Debug> NodeId for T {}

/// A directed, weighted edge as stored by the graph.
///
/// Undirected graphs store each edge once; adjacency builders expand it to
/// both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<N> {
    pub source: N,
    pub target: N,
    pub weight: Weight,
}

impl<N> Edge<N> {
    pub fn new(source: N, target: N, weight: Weight) -> Self {
        Edge {
            source,
            target,
            weight,
        }
    }

    /// Edge with the weight taken from a raw label, see [`parse_weight`].
    pub fn with_label(source: N, target: N, label: Option<&str>) -> Self {
        Edge::new(source, target, parse_weight(label))
    }

    /// Returns `true` when both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool
    where
        N: PartialEq,
    {
        self.source == self.target
    }
}

/// Node -> tentative or final distance. Unreachable nodes map to [`Distance::Infinite`].
pub type DistanceMap<N> = BTreeMap<N, Distance>;

/// Node -> parent. `None` marks the source or a node that was never reached.
pub type PredecessorMap<N> = BTreeMap<N, Option<N>>;

/// Node -> color id.
pub type Coloring<N> = BTreeMap<N, usize>;

/// Node -> sorted neighbour list.
pub type AdjacencyList<N> = BTreeMap<N, Vec<N>>;

/// Dense weight table: node -> neighbour -> weight.
pub type WeightedAdjacency<N> = BTreeMap<N, BTreeMap<N, Weight>>;

/// Parses an edge label into a weight, falling back to [`DEFAULT_WEIGHT`].
///
/// Unparsable labels are not an error: a label like `"road"` simply yields
/// the default.
pub fn parse_weight(raw: Option<&str>) -> Weight {
    parse_weight_or(raw, DEFAULT_WEIGHT)
}

/// Same as [`parse_weight`] with a caller-supplied fallback.
pub fn parse_weight_or(raw: Option<&str>, default: Weight) -> Weight {
    raw.map(|s| s.trim().trim_matches('"').trim())
        .and_then(|s| s.parse::<Weight>().ok())
        .unwrap_or(default)
}
