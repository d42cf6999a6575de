// src/error.rs
use thiserror::Error;

/// Errors returned by the fallible parts of the crate.
///
/// Queries (`suggest`, `candidates`, `classify`) never fail; this type only
/// covers loading, persistence, configuration and the analysis collaborator.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("vocabulary snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no text provided")]
    EmptyInput,

    #[error("AI assistant is not available: {0}")]
    AnalysisUnavailable(String),

    #[error("analysis service returned no text")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, Error>;
