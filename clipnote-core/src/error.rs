//! Error types for the clipnote core
//!
//! Provides typed classification of transport, feed, and storage failures
//! using thiserror for proper error trait implementations.

use thiserror::Error;

/// Transport and server errors from the comment API
///
/// Classification happens at the HTTP boundary so callers match on variants
/// instead of probing status codes out of an untyped error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server responded with a non-success status
    #[error("server rejected the request with status {status}")]
    Status {
        /// HTTP status code of the response
        status: u16,
        /// Explanation extracted from the response body, when one was sent
        message: Option<String>,
    },

    /// The server could not be reached (connection refused or timed out)
    #[error("could not reach the server")]
    Unreachable,

    /// The request never completed (no response at all)
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Classify a reqwest failure that carries no HTTP response.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ApiError::Unreachable
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Errors surfaced by comment feed operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// A page fetch or submission failed at the API
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The operation exists as a stub only
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

/// Result type alias for comment feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Credential storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to initialize storage: {0}")]
    InitFailed(String),

    #[error("failed to read from storage")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write to storage")]
    WriteFailed(#[source] std::io::Error),

    #[error("corrupted storage data")]
    CorruptedData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_code() {
        let err = ApiError::Status {
            status: 400,
            message: Some("bad request".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "server rejected the request with status 400"
        );
    }

    #[test]
    fn feed_error_wraps_api_error_transparently() {
        let err = FeedError::from(ApiError::Unreachable);
        assert_eq!(err.to_string(), "could not reach the server");
    }

    #[test]
    fn unimplemented_names_the_operation() {
        let err = FeedError::Unimplemented("comment deletion");
        assert_eq!(err.to_string(), "comment deletion is not implemented");
    }
}
