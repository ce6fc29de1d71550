//! Error types for Playlist Converter core operations.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Playlist Converter core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The cookie jar could not be read or written.
    #[error("Cookie access failed: {0}")]
    CookieAccess(String),

    /// A URL could not be parsed or built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
