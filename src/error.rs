// src/error.rs
use std::io;
use thiserror::Error;

/// Failures outside the extraction engine. The engine itself degrades
/// instead of failing, so only fetching, IO and setup end up here.
#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for the exporter
pub type Result<T> = std::result::Result<T, ExporterError>;

impl ExporterError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ExporterError::Config(msg.into())
    }

    /// True when the page could not be retrieved at all.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, ExporterError::Http(_) | ExporterError::Status { .. })
    }
}
