use std::path::PathBuf;
use thiserror::Error;

/// Fatal startup errors. Anything recoverable (empty filter result,
/// insufficient density data) is modeled as a sentinel value instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("data source not found: {}", .0.display())]
    MissingSource(PathBuf),
    #[error("failed to read data source: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse geometry source: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed geometry source: {0}")]
    Geometry(String),
}
