//! Error types for deadlink-audit.
//!
//! This module defines the error types returned by audit operations.
//! Finding no dead links is not an error; it yields a report with empty lists.

/// Error type for audit operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is empty or could not be parsed into an HTML tree.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The fetched body is not an HTML or text document.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Character encoding detection or conversion failed.
    #[error("Encoding detection failed: {0}")]
    EncodingError(String),

    /// Reading the page body failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for audit operations.
pub type Result<T> = std::result::Result<T, Error>;
