//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
///
/// Protocol outcomes such as an unsent kmail are not errors; they are
/// reported through the return values of the services.
#[derive(Debug, Error)]
pub enum Error {
    /// Protocol-level decoding failed.
    #[error("Protocol error: {0}")]
    Protocol(#[from] kolmail_protocol::Error),

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Server returned status {code} for {path}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Requested path.
        path: String,
    },

    /// URL construction failed.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
