//! Console rendering of graphs and algorithm results.
//!
//! Every function returns the text instead of printing it, so the binary
//! decides where it goes and tests can inspect it.

use std::fmt::Write;

use super::config::ReportConfig;
use super::types::LabelGraph;
use common::types::{AdjacencyList, Coloring};
use graph_solver_core::{AllPairs, ColoringViolation, ShortestPaths, SpanningTree, color_classes};

pub fn describe(graph: &LabelGraph, config: &ReportConfig) -> String {
    let mut out = String::new();

    let kind = if graph.is_directed() { "digraph" } else { "graph" };
    let _ = writeln!(out, "Graph type: {}", kind);
    let _ = writeln!(out, "Nodes ({}): {}", graph.node_count(), graph.nodes().join(", "));

    let _ = writeln!(out, "Edges ({}):", graph.edge_count());
    let op = if graph.is_directed() { "->" } else { "--" };
    for edge in graph.edges() {
        let _ = writeln!(out, "  {} {} {} (w={})", edge.source, op, edge.target, edge.weight);
    }

    if config.show_adjacency {
        out.push_str(&adjacency_list(&graph.adjacency_list()));
    }

    if config.show_matrix {
        let _ = writeln!(out, "Adjacency matrix:");
        for row in graph.adjacency_matrix() {
            let cells: Vec<String> = row.iter().map(u8::to_string).collect();
            let _ = writeln!(out, "  {}", cells.join(" "));
        }
    }

    out
}

pub fn adjacency_list(adjacency: &AdjacencyList<String>) -> String {
    let mut out = String::from("Adjacency list:\n");
    for (node, neighbors) in adjacency {
        let _ = writeln!(out, "  {}: [{}]", node, neighbors.join(", "));
    }
    out
}

pub fn shortest_paths(result: &ShortestPaths<String>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Bellman-Ford from {} ---", result.source);

    if !result.ok {
        let _ = writeln!(
            out,
            "Negative-weight cycle detected! Shortest paths are undefined."
        );
        if let Some(cycle) = &result.negative_cycle {
            let mut closed = cycle.clone();
            if let Some(first) = cycle.first() {
                closed.push(first.clone());
            }
            let _ = writeln!(out, "Cycle: {}", closed.join(" -> "));
        }
        return out;
    }

    for (node, dist) in &result.dist {
        match (dist.finite(), result.pred.get(node).and_then(Option::as_ref)) {
            (None, _) => {
                let _ = writeln!(out, "  {}: unreachable", node);
            }
            (Some(d), Some(parent)) => {
                let _ = writeln!(out, "  {}: distance = {}, predecessor = {}", node, d, parent);
            }
            (Some(d), None) => {
                let _ = writeln!(out, "  {}: distance = {}, predecessor = -", node, d);
            }
        }
    }

    out
}

/// One line per source for an all-sources sweep.
pub fn sweep_summary(results: &[ShortestPaths<String>]) -> String {
    let mut out = String::from("--- Bellman-Ford from every source ---\n");
    for result in results {
        if !result.ok {
            let _ = writeln!(out, "  {}: negative cycle reachable", result.source);
            continue;
        }
        let reachable = result.dist.values().filter(|d| d.is_finite()).count();
        let farthest = result.dist.values().filter_map(|d| d.finite()).max();
        let _ = writeln!(
            out,
            "  {}: reaches {}/{} nodes, farthest distance {}",
            result.source,
            reachable,
            result.dist.len(),
            farthest.map_or_else(|| "-".to_string(), |d| d.to_string())
        );
    }
    out
}

pub fn spanning_tree(source: &str, tree: &SpanningTree<String>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Prim from {} ---", source);

    for (parent, child, weight) in tree.edges() {
        let _ = writeln!(out, "  {} -- {} (w={})", parent, child, weight);
    }
    let _ = writeln!(out, "Total cost: {}", tree.total_cost);

    if !tree.is_spanning() {
        let unreached: Vec<&str> = tree
            .key
            .iter()
            .filter(|(_, k)| !k.is_finite())
            .map(|(n, _)| n.as_str())
            .collect();
        let _ = writeln!(
            out,
            "Graph is disconnected: not reached from {}: {}",
            source,
            unreached.join(", ")
        );
    }

    out
}

pub fn all_pairs(result: &AllPairs<String>) -> String {
    let mut out = String::from("--- Floyd-Warshall ---\n");
    let nodes = result.nodes();

    let width = nodes
        .iter()
        .map(|n| n.chars().count())
        .chain(result.matrix().iter().flatten().map(|d| d.to_string().chars().count()))
        .max()
        .unwrap_or(1);

    let _ = write!(out, "{:>width$}", "");
    for node in nodes {
        let _ = write!(out, " {:>width$}", node);
    }
    out.push('\n');

    for (node, row) in nodes.iter().zip(result.matrix()) {
        let _ = write!(out, "{:>width$}", node);
        for dist in row {
            let _ = write!(out, " {:>width$}", dist.to_string());
        }
        out.push('\n');
    }

    if result.has_negative_cycle() {
        out.push_str("Warning: negative cycle present; distances through it are not meaningful.\n");
    }

    out
}

pub fn coloring(
    coloring: &Coloring<String>,
    valid: bool,
    errors: &[ColoringViolation<String>],
) -> String {
    let mut out = String::from("--- DSATUR ---\n");
    let classes = color_classes(coloring);

    let _ = writeln!(out, "Colors used: {}", classes.len());
    for (color, nodes) in &classes {
        let _ = writeln!(out, "  Color {}: [{}]", color, nodes.join(", "));
    }

    if valid {
        out.push_str("Coloring is valid: no conflicts found.\n");
    } else {
        out.push_str("Coloring is INVALID:\n");
        for error in errors {
            let _ = writeln!(out, "  - {}", error);
        }
    }

    out
}
