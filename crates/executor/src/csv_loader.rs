use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use super::error::Error;
use super::types::{GraphSource, LabelGraph};
use common::types::{Edge, Weight, parse_weight_or};
use graph_solver_core::Graph;
use tracing::{debug, error};

// Helper struct for CSV parsing
#[derive(Debug, Deserialize, Default)]
pub struct CsvRecord {
    #[serde(rename = "from")]
    pub from_node: String,

    #[serde(rename = "to")]
    pub to_node: String,

    #[serde(rename = "weight", default)]
    pub weight: Option<String>,
}

/// Loads an edge list from CSV with a `from,to[,weight]` header.
///
/// Extra columns are ignored. Missing or unparsable weights fall back to the
/// configured default, like DOT labels do.
pub struct CsvLoader {
    path: PathBuf,
    directed: bool,
    default_weight: Weight,
}

impl CsvLoader {
    pub fn new(path: PathBuf, directed: bool, default_weight: Weight) -> Self {
        CsvLoader {
            path,
            directed,
            default_weight,
        }
    }

    fn parse_csv_to_edges<R: Read>(&self, reader: R) -> Result<Vec<Edge<String>>, Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut edges = Vec::new();

        for result in rdr.deserialize() {
            let record: CsvRecord = result?;
            edges.push(Edge::new(
                record.from_node,
                record.to_node,
                parse_weight_or(record.weight.as_deref(), self.default_weight),
            ));
        }
        Ok(edges)
    }
}

impl GraphSource for CsvLoader {
    fn load(&self) -> Result<LabelGraph, Error> {
        let file = File::open(&self.path).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to open csv file");
            Error::IoError(e)
        })?;

        let edges = self.parse_csv_to_edges(file)?;
        debug!(edges = edges.len(), "csv edge list parsed");

        Ok(Graph::from_edges(self.directed, edges))
    }
}
