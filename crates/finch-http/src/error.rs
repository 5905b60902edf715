//! Error types and classification

use thiserror::Error;

/// Errors surfaced by the request core.
///
/// A non-success HTTP response is not an error: a 401 or 404 comes back as
/// an ordinary `ApiResponse` with its status code recorded. The error
/// channel is reserved for exchanges that never completed and for
/// client-side misconfiguration.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never reached the server or the exchange did not
    /// complete (connection refused, DNS failure, timeout, connection
    /// dropped mid-body)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Malformed base URL, caught at build time
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Client-side misconfiguration, e.g. an authenticated endpoint called
    /// without credentials
    #[error("configuration error: {0}")]
    Config(String),

    /// Response payload could not be decoded by a caller-facing helper
    #[error("response error: {0}")]
    Response(String),

    /// JSON helper failed to parse the payload
    #[error("JSON error: {0}")]
    Json(String),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error category for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection-related errors (DNS, TCP, TLS)
    Connection,
    /// Timeout errors
    Timeout,
    /// Invalid request construction or configuration
    Request,
    /// Response payload decoding errors
    Response,
    /// Unknown/other errors
    Other,
}

impl Error {
    /// Categorize the error for reporting
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Transport(e) => {
                if e.is_connect() {
                    ErrorCategory::Connection
                } else if e.is_timeout() {
                    ErrorCategory::Timeout
                } else if e.is_request() || e.is_builder() {
                    ErrorCategory::Request
                } else {
                    ErrorCategory::Other
                }
            }
            Error::InvalidUrl(_) | Error::Config(_) => ErrorCategory::Request,
            Error::Response(_) | Error::Json(_) => ErrorCategory::Response,
        }
    }

    /// True when the exchange failed before a response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_category() {
        let err = Error::Config("credentials required".into());
        assert_eq!(err.category(), ErrorCategory::Request);
        assert!(!err.is_transport());
    }

    #[test]
    fn test_invalid_url_category() {
        let err = Error::from("not a url".parse::<url::Url>().unwrap_err());
        assert_eq!(err.category(), ErrorCategory::Request);
    }

    #[test]
    fn test_response_error_category() {
        assert_eq!(
            Error::Response("bad utf-8".into()).category(),
            ErrorCategory::Response
        );
        assert_eq!(
            Error::Json("unexpected eof".into()).category(),
            ErrorCategory::Response
        );
    }
}
