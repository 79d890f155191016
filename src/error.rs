use std::path::PathBuf;
use thiserror::Error;

/// Fatal setup problems. Any of these aborts the run with exit code 1.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Neither the SKU nor name column sets matched; carries the headers that
    /// were actually present so the operator can fix the spreadsheet.
    #[error("could not resolve required columns in headers {0:?}")]
    ColumnsUnresolved(Vec<String>),

    #[error("{0}")]
    Sheet(String),

    #[error("failed to create output directory: {0}")]
    OutputDir(std::io::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

/// Problems scoped to a single product row. The driver logs these and moves
/// on to the next row; they never abort the run.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("could not find vqd token for search query")]
    TokenNotFound,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed search response: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("could not read row: {0}")]
    Row(#[from] csv::Error),

    #[error("could not write image file: {0}")]
    Write(#[from] std::io::Error),
}
