use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use super::error::Error;
use super::types::{GraphSource, LabelGraph};
use common::types::{Edge, Weight};
use graph_solver_core::Graph;

/// Builds a directed graph from a plain 0/1 adjacency matrix.
///
/// Row `i`, column `j` set to `1` adds the edge `i+1 -> j+1`; nodes are
/// labelled `"1"..="n"`. Blank lines are skipped, self-loops and repeated
/// entries are dropped. A symmetric matrix yields both directions, which is
/// what an undirected graph looks like to every algorithm.
pub fn graph_from_matrix(input: &str, default_weight: Weight) -> Result<LabelGraph, Error> {
    let rows: Vec<(usize, Vec<&str>)> = input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, cells)| !cells.is_empty())
        .collect();

    let n = rows.len();
    let nodes: Vec<String> = (1..=n).map(|i| i.to_string()).collect();

    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for (row, (line, cells)) in rows.iter().enumerate() {
        if cells.len() != n {
            return Err(Error::parse(
                *line,
                format!("expected {} columns, found {}", n, cells.len()),
            ));
        }

        for (col, cell) in cells.iter().enumerate() {
            match *cell {
                "0" => {}
                "1" => {
                    if row != col && seen.insert((row, col)) {
                        edges.push(Edge::new(
                            nodes[row].clone(),
                            nodes[col].clone(),
                            default_weight,
                        ));
                    }
                }
                other => {
                    return Err(Error::parse(
                        *line,
                        format!("matrix entries must be 0 or 1, found '{}'", other),
                    ));
                }
            }
        }
    }

    Ok(Graph::new(true, nodes, edges)?)
}

/// Loads a graph from a `.gvm` adjacency-matrix file.
pub struct MatrixLoader {
    path: PathBuf,
    default_weight: Weight,
}

impl MatrixLoader {
    pub fn new(path: PathBuf, default_weight: Weight) -> Self {
        MatrixLoader {
            path,
            default_weight,
        }
    }
}

impl GraphSource for MatrixLoader {
    fn load(&self) -> Result<LabelGraph, Error> {
        let text = fs::read_to_string(&self.path)?;
        graph_from_matrix(&text, self.default_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SQUARE: &str = "\
0 1 0 0
1 0 1 1

0 1 0 1
0 1 1 0
";

    #[test]
    fn symmetric_matrix_gives_both_directions() {
        let graph = graph_from_matrix(SQUARE, 1).unwrap();

        assert!(graph.is_directed());
        assert_eq!(graph.nodes(), &["1", "2", "3", "4"]);
        assert_eq!(graph.edge_count(), 8);

        let adjacency = graph.adjacency_list();
        assert_eq!(adjacency["2"], vec!["1", "3", "4"]);
    }

    #[test]
    fn diagonal_entries_are_ignored() {
        let graph = graph_from_matrix("1 1\n0 1\n", 1).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges()[0], Edge::new("1".to_string(), "2".to_string(), 1));
    }

    #[test]
    fn isolated_nodes_are_kept() {
        let graph = graph_from_matrix("0 0 0\n0 0 0\n0 0 0\n", 1).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn ragged_rows_are_rejected_with_line_number() {
        let result = graph_from_matrix("0 1\n\n1\n", 1);

        match result {
            Err(Error::ParseError { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other.err()),
        }
    }

    #[test]
    fn non_binary_entries_are_rejected() {
        assert!(matches!(
            graph_from_matrix("0 2\n1 0\n", 1),
            Err(Error::ParseError { line: 1, .. })
        ));
    }

    #[test]
    fn loader_reads_from_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(SQUARE.as_bytes())
            .expect("Failed to write mock content");

        let graph = MatrixLoader::new(file.path().to_path_buf(), 3).load().unwrap();
        assert!(graph.edges().iter().all(|e| e.weight == 3));
    }
}
