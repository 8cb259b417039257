use thiserror::Error;

use common::error::Error as GraphSolverError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Graph processing error: {0}")]
    GraphError(#[from] GraphSolverError),

    #[error("Worker task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::ParseError {
            line,
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::ConfigLoadError(e.to_string())
    }
}
