use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use common::types::{AdjacencyList, Coloring, NodeId};
use tracing::debug;

/// Treats every stored `u -> v` as an undirected conflict `u -- v`.
///
/// Nodes that only appear as neighbours become keys too. Self-loops are
/// dropped: a node never conflicts with itself.
fn symmetric_adjacency<N: NodeId>(adjacency: &AdjacencyList<N>) -> BTreeMap<N, BTreeSet<N>> {
    let mut sym: BTreeMap<N, BTreeSet<N>> = BTreeMap::new();

    for (u, neighbors) in adjacency {
        sym.entry(u.clone()).or_default();
        for v in neighbors {
            if u == v {
                continue;
            }
            sym.entry(u.clone()).or_default().insert(v.clone());
            sym.entry(v.clone()).or_default().insert(u.clone());
        }
    }

    sym
}

/// Picks the uncolored node with the highest saturation, then highest
/// degree. Scans in node order, so the first candidate wins remaining ties.
fn select_node(uncolored: &[bool], saturation: &[BTreeSet<usize>], degree: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, (usize, usize))> = None;

    for (v, _) in uncolored.iter().enumerate().filter(|(_, open)| **open) {
        let score = (saturation[v].len(), degree[v]);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((v, score)),
        }
    }

    best.map(|(v, _)| v)
}

/// DSATUR greedy coloring.
///
/// Directed input is symmetrized first. Each step colors the most saturated
/// uncolored node (ties: larger degree, then node order) with the smallest
/// color id absent from its saturation set, then records that color on its
/// uncolored neighbours. The result is always proper; it is not guaranteed
/// to use the minimum number of colors.
pub fn paint_dsatur<N: NodeId>(adjacency: &AdjacencyList<N>) -> Coloring<N> {
    let sym = symmetric_adjacency(adjacency);
    let nodes: Vec<N> = sym.keys().cloned().collect();

    let neighbors: Vec<Vec<usize>> = sym
        .values()
        .map(|set| {
            set.iter()
                .filter_map(|v| nodes.binary_search(v).ok())
                .collect()
        })
        .collect();

    let degree: Vec<usize> = neighbors.iter().map(Vec::len).collect();
    let mut saturation: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); nodes.len()];
    let mut uncolored = vec![true; nodes.len()];
    let mut colors: Vec<usize> = vec![0; nodes.len()];

    debug!(nodes = nodes.len(), "starting dsatur");

    while let Some(u) = select_node(&uncolored, &saturation, &degree) {
        uncolored[u] = false;

        let mut color = 0;
        while saturation[u].contains(&color) {
            color += 1;
        }
        colors[u] = color;

        for &v in &neighbors[u] {
            if uncolored[v] {
                saturation[v].insert(color);
            }
        }
    }

    let coloring: Coloring<N> = nodes.into_iter().zip(colors).collect();
    debug!(colors = color_count(&coloring), "dsatur finished");
    coloring
}

/// A reason a coloring is not valid for a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColoringViolation<N> {
    /// Nodes of the graph with no color assigned.
    Uncolored(Vec<N>),

    /// Two adjacent nodes sharing a color. `a < b`.
    Conflict { a: N, b: N, color: usize },
}

impl<N: fmt::Debug> fmt::Display for ColoringViolation<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColoringViolation::Uncolored(nodes) => {
                write!(f, "Nodes without an assigned color: {:?}", nodes)
            }
            ColoringViolation::Conflict { a, b, color } => write!(
                f,
                "Conflict: nodes {:?} and {:?} are adjacent and share color {}",
                a, b, color
            ),
        }
    }
}

/// Checks that `coloring` is complete and proper for `adjacency`.
///
/// Completeness covers the adjacency keys. Conflicts are reported once per
/// unordered pair; self-loops are ignored. Returns `(valid, violations)`.
pub fn validate_coloring<N: NodeId>(
    adjacency: &AdjacencyList<N>,
    coloring: &Coloring<N>,
) -> (bool, Vec<ColoringViolation<N>>) {
    let mut errors = Vec::new();

    let missing: Vec<N> = adjacency
        .keys()
        .filter(|n| !coloring.contains_key(*n))
        .cloned()
        .collect();
    if !missing.is_empty() {
        errors.push(ColoringViolation::Uncolored(missing));
    }

    let mut seen: BTreeSet<(N, N)> = BTreeSet::new();

    for (u, neighbors) in adjacency {
        let Some(&color_u) = coloring.get(u) else {
            continue;
        };

        for v in neighbors {
            if u == v {
                continue;
            }
            let Some(&color_v) = coloring.get(v) else {
                continue;
            };

            if color_u == color_v {
                let pair = if u < v {
                    (u.clone(), v.clone())
                } else {
                    (v.clone(), u.clone())
                };

                if seen.insert(pair.clone()) {
                    errors.push(ColoringViolation::Conflict {
                        a: pair.0,
                        b: pair.1,
                        color: color_u,
                    });
                }
            }
        }
    }

    (errors.is_empty(), errors)
}

/// Number of distinct colors used.
pub fn color_count<N>(coloring: &Coloring<N>) -> usize {
    coloring.values().collect::<BTreeSet<_>>().len()
}

/// Nodes grouped by color id, each group sorted.
pub fn color_classes<N: NodeId>(coloring: &Coloring<N>) -> BTreeMap<usize, Vec<N>> {
    let mut classes: BTreeMap<usize, Vec<N>> = BTreeMap::new();
    for (node, &color) in coloring {
        classes.entry(color).or_default().push(node.clone());
    }
    classes
}
