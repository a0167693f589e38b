use std::path::PathBuf;
use thiserror::Error;

/// Failures while talking to the catalog.
///
/// None of these are fatal: the worker logs them and keeps the previous
/// result list, the favorites resolver drops the affected favorite.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request for {path} failed: {reason}")]
    Transport { path: String, reason: String },

    #[error("HTTP {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("malformed JSON from {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing `{field}` in response from {path}")]
    MissingField { path: String, field: &'static str },
}

/// Failures reading or writing the favorites and notes files
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid notes file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistError::Io { path: path.into(), source }
    }
}
