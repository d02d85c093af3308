//! Error types shared by the resource client, snapshot builders and the
//! streaming layer.

use std::time::Duration;

/// Boxed error used to carry client-specific failures without leaking their types
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure while fetching or projecting cluster resources
///
/// Not-found and transport failures are kept apart so they can be logged
/// differently, but every variant is handled the same way by the stream loop.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("error fetching {what}: {source}")]
    Request {
        what: String,
        #[source]
        source: BoxError,
    },

    #[error("malformed {what}: {reason}")]
    Malformed { what: String, reason: String },

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<FetchError>,
    },
}

impl FetchError {
    pub fn request(what: impl Into<String>, source: impl Into<BoxError>) -> Self {
        FetchError::Request {
            what: what.into(),
            source: source.into(),
        }
    }

    /// Wrap this error with a description of the step that failed
    pub fn context(self, context: impl Into<String>) -> Self {
        FetchError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True if the innermost cause is a missing resource
    pub fn is_not_found(&self) -> bool {
        match self {
            FetchError::NotFound(_) => true,
            FetchError::Context { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Result type for resource fetches and snapshot builds
pub type FetchResult<T> = Result<T, FetchError>;

/// Failure inside a single connection's stream loop
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("snapshot fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("send failed: {0}")]
    Send(String),

    #[error("send deadline of {0:?} exceeded")]
    SendTimeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_survives_context() {
        let err = FetchError::NotFound("ClusterQueue cq-a".to_string())
            .context("error fetching cluster queue cq-a");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "error fetching cluster queue cq-a: ClusterQueue cq-a not found"
        );
    }

    #[test]
    fn test_request_is_not_not_found() {
        let err = FetchError::request("nodes", "connection refused");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "error fetching nodes: connection refused");
    }
}
