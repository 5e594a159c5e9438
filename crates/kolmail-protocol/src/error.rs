//! Error types for kmail protocol handling.

/// Result type alias for protocol operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Protocol error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A raw record had a field that could not be interpreted.
    #[error("Malformed kmail record: field `{field}` has value {value:?}")]
    MalformedRecord {
        /// Name of the offending field.
        field: &'static str,
        /// Raw value received.
        value: String,
    },

    /// Recipient string was empty.
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

impl Error {
    /// Creates a malformed-record error.
    #[must_use]
    pub fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field,
            value: value.into(),
        }
    }
}
