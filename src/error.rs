//! Error types for radixmap
//!
//! The tree itself never fails; these cover the mapping I/O and route
//! parsing built on top of it.

use thiserror::Error;

/// Result type alias for radixmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in radixmap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Invalid prefix: {0}")]
    InvalidPrefix(String),

    #[error("Invalid mapping file: {0}")]
    InvalidFile(String),
}
