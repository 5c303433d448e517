use std::time::Duration;

use thiserror::Error;

/// Result type alias for DNSpector operations
pub type Result<T> = std::result::Result<T, DnspectorError>;

/// Errors that can occur across the DNSpector crates
#[derive(Error, Debug)]
pub enum DnspectorError {
    /// Input failed syntax validation before any network call
    #[error("{0}")]
    Validation(String),

    /// Remote endpoint returned a non-success status
    #[error("HTTP {code} from {url}")]
    Status {
        /// HTTP status code
        code: u16,
        /// URL that was requested
        url: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// WHOIS lookup failed
    #[error("WHOIS lookup failed: {0}")]
    Whois(String),

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// Zone transfer could not be attempted
    #[error("zone transfer failed: {0}")]
    ZoneTransfer(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl DnspectorError {
    /// Returns true if the error came from the network rather than from input
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Http(_) | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns the HTTP status code if the remote answered with an error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_expose_their_code() {
        let err = DnspectorError::Status {
            code: 503,
            url: "https://crt.sh/?q=%.example.com".into(),
        };
        assert_eq!(err.status_code(), Some(503));
        assert!(err.is_network());
        assert_eq!(err.to_string(), "HTTP 503 from https://crt.sh/?q=%.example.com");
    }

    #[test]
    fn sub_second_timeouts_keep_their_duration() {
        let err = DnspectorError::Timeout(Duration::from_millis(250));
        assert!(err.is_network());
        assert_eq!(err.to_string(), "request timed out after 250ms");
    }

    #[test]
    fn validation_is_not_network() {
        let err = DnspectorError::Validation("bad".into());
        assert!(!err.is_network());
        assert_eq!(err.status_code(), None);
    }
}
