//! Error types for sitewrap-core

use thiserror::Error;

/// Result type alias using sitewrap-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sitewrap-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The embedded web surface rejected an operation
    #[error("Web surface error: {0}")]
    Surface(String),

    /// Handing a URL to an external application failed
    #[error("External launch failed: {0}")]
    Launch(String),
}
