// src/error.rs
use navtree_core::{FormatError, NavError, SourceError};
use thiserror::Error;

/// The error type for building and querying a [`Navigator`](crate::Navigator).
#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("Navigation data error: {0}")]
    Nav(#[from] NavError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<FormatError> for NavigatorError {
    fn from(e: FormatError) -> Self {
        NavigatorError::Nav(NavError::Format(e))
    }
}

impl From<SourceError> for NavigatorError {
    fn from(e: SourceError) -> Self {
        NavigatorError::Nav(NavError::Source(e))
    }
}
