//! KV store error types

use thiserror::Error;

/// Errors that can occur while talking to a key-value store
///
/// Callers treat these as opaque reasons; the variants only exist so the
/// store implementations can attach their cause.
#[derive(Debug, Error)]
pub enum KvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message() {
        let err = KvError::Backend("connection refused".to_string());
        assert_eq!(err.to_string(), "Store backend error: connection refused");
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: KvError = io.into();
        assert!(err.to_string().contains("denied"));
    }
}
