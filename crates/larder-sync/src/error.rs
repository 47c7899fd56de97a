//! Error types for the sync layer

use larder_core::StoreError;
use thiserror::Error;

/// Errors raised by the mirror and the mutation operations
///
/// Everything here is a store failure surfacing unchanged; the sync layer
/// adds no retries and no recovery. A missing item in `update_item` is
/// logged and swallowed, not reported through this type.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_conversion() {
        let err: SyncError = StoreError::SubscriptionClosed.into();
        assert!(matches!(err, SyncError::Store(_)));
        assert!(format!("{}", err).contains("Store error"));
    }
}
