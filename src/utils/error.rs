use std::path::PathBuf;
use thiserror::Error;

/// Failures at the edges of the crate. Extraction itself never fails; these
/// cover reading inputs, parsing configuration and writing documents.
#[derive(Debug, Error)]
pub enum DocfillError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config error in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Field mapping error: {0}")]
    Mapping(#[from] serde_json::Error),
    #[error("Could not render the JSON report: {0}")]
    Report(#[source] serde_json::Error),
    #[error("Template error: {0}")]
    Template(String),
}

impl DocfillError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocfillError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocfillError>;
