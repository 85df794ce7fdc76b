//! Error types for trade-chat operations

use thiserror::Error;

/// Trade chat errors
#[derive(Debug, Error)]
pub enum ChatError {
    /// The analysis service answered with a non-success status
    #[error("Service returned HTTP {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage I/O error
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Portfolio identifier rejected
    #[error("Invalid portfolio ID: {0}")]
    InvalidPortfolioId(String),

    /// User command could not be parsed
    #[error("Command error: {0}")]
    Command(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// Whether the failure happened before a usable reply reached us
    /// (connection, timeout, or non-success status).
    pub fn is_transport(&self) -> bool {
        matches!(self, ChatError::Status { .. } | ChatError::Http(_))
    }
}

/// Result type alias for trade-chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChatError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Service returned HTTP 502: bad gateway");

        let err = ChatError::InvalidPortfolioId("empty".to_string());
        assert_eq!(err.to_string(), "Invalid portfolio ID: empty");
    }

    #[test]
    fn test_transport_classification() {
        let status = ChatError::Status {
            status: 500,
            body: String::new(),
        };
        assert!(status.is_transport());
        assert!(!ChatError::Decode("missing field".to_string()).is_transport());
        assert!(!ChatError::Other("boom".to_string()).is_transport());
    }

    #[test]
    fn test_json_conversion() {
        let err: ChatError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ChatError::Json(_)));
    }
}
