use std::time::Duration;

use dnspector_core::DnspectorError;
use thiserror::Error;

/// Result type alias for reconnaissance operations
pub type ReconResult<T> = std::result::Result<T, ReconError>;

/// Errors from reconnaissance operations.
///
/// DNS lookup outcomes such as NXDOMAIN are not errors; they are reported as
/// [`dnspector_core::QueryOutcome`] values.
#[derive(Error, Debug)]
pub enum ReconError {
    /// Target domain failed validation
    #[error("Invalid domain name: {0}")]
    InvalidDomain(String),

    /// Nameserver override failed validation
    #[error("Invalid nameserver: {0}")]
    InvalidNameserver(String),

    /// The requested record types were all unrecognized
    #[error("No valid DNS record types provided.")]
    NoValidRecordTypes,

    /// DNS setup error (e.g. a nameserver hostname that does not resolve)
    #[error("DNS error: {0}")]
    Dns(String),

    /// Zone transfer did not complete
    #[error("{0}")]
    Transfer(String),

    /// WHOIS lookup error
    #[error("WHOIS error: {0}")]
    Whois(String),

    /// Network I/O error
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    /// Timeout
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}

impl From<ReconError> for DnspectorError {
    fn from(err: ReconError) -> Self {
        match err {
            e @ (ReconError::InvalidDomain(_)
            | ReconError::InvalidNameserver(_)
            | ReconError::NoValidRecordTypes) => Self::Validation(e.to_string()),
            ReconError::Dns(msg) => Self::Dns(msg),
            ReconError::Transfer(msg) => Self::ZoneTransfer(msg),
            ReconError::Whois(msg) => Self::Whois(msg),
            ReconError::Network(e) => Self::Connection(e.to_string()),
            ReconError::Timeout(after) => Self::Timeout(after),
        }
    }
}
