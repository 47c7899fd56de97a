//! Error types for Larder

use thiserror::Error;

/// Top-level error type for Larder
#[derive(Debug, Error)]
pub enum LarderError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by document store implementations
///
/// Store failures are never retried or recovered by the core; they
/// propagate unchanged to the caller of the operation that hit them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Subscription closed")]
    SubscriptionClosed,
}

/// Result type alias for Larder operations
pub type LarderResult<T> = Result<T, LarderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Io("disk full".to_string());
        assert!(format!("{}", err).contains("disk full"));

        let err = StoreError::Serialization("bad json".to_string());
        assert!(format!("{}", err).contains("bad json"));

        assert!(format!("{}", StoreError::SubscriptionClosed).contains("closed"));
    }

    #[test]
    fn test_error_conversions() {
        let store_err = StoreError::SubscriptionClosed;
        let larder_err: LarderError = store_err.into();
        assert!(matches!(larder_err, LarderError::Store(_)));
    }

    #[test]
    fn test_larder_error_display() {
        let err: LarderError = StoreError::Io("timeout".to_string()).into();
        let msg = format!("{}", err);
        assert!(msg.contains("Store error"));
        assert!(msg.contains("timeout"));
    }
}
