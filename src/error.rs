//! Error handling and custom error types
//!
//! Provides unified error handling across the exporter using thiserror.
//! The image rewriting path never produces these; only I/O collaborators do.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Qiita API error: {0}")]
    Api(String),

    #[error("Image download error: {0}")]
    Download(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
