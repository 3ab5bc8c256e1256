use thiserror::Error;

/// Errors raised by object store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The object does not exist.
    #[error("object not found: {uri}")]
    NotFound { uri: String },

    /// A string could not be parsed as an `s3://bucket/key` URI.
    #[error("invalid object URI {0:?}")]
    InvalidUri(String),

    /// The backend rejected the request.
    #[error("{operation} {uri} failed: {message}")]
    Backend {
        operation: &'static str,
        uri: String,
        message: String,
    },

    /// Local filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A tag sidecar file is not valid JSON.
    #[error("invalid tag set: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = StoreError::NotFound {
            uri: "s3://b/k".into(),
        };
        assert_eq!(err.to_string(), "object not found: s3://b/k");

        let err = StoreError::Backend {
            operation: "PutObjectTagging",
            uri: "s3://b/k".into(),
            message: "AccessDenied".into(),
        };
        assert_eq!(err.to_string(), "PutObjectTagging s3://b/k failed: AccessDenied");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
