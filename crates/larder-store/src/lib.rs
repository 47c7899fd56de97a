//! # Larder Store
//!
//! Document store abstraction for the Larder inventory system.
//!
//! The backing collection is a schemaless key-value document store: point
//! reads, full-document replace writes, deletes, and a push-based
//! subscription that delivers the complete current collection contents on
//! establishment and after every change, from any writer.
//!
//! ## Features
//!
//! - **DocumentStore trait**: the store interface the sync layer consumes
//! - **InMemoryDocumentStore**: in-memory implementation for testing/local use
//! - **PersistentDocumentStore**: append-log-backed implementation for durability
//! - **Subscription**: live snapshot feed with idempotent `unsubscribe`
//!
//! ## Example
//!
//! ```rust,ignore
//! use larder_store::{DocumentStore, InMemoryDocumentStore};
//! use larder_core::ItemDocument;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = InMemoryDocumentStore::new();
//!     let mut sub = store.subscribe().await.unwrap();
//!
//!     // Initial snapshot arrives immediately
//!     assert!(sub.recv().await.unwrap().is_empty());
//!
//!     store.set("milk", ItemDocument::with_quantity(1)).await.unwrap();
//!
//!     // Every mutation re-delivers the full collection
//!     let snapshot = sub.recv().await.unwrap();
//!     assert_eq!(snapshot.len(), 1);
//! }
//! ```

pub mod memory;
pub mod persistent;
pub mod subscription;

// Re-exports
pub use memory::InMemoryDocumentStore;
pub use persistent::PersistentDocumentStore;
pub use subscription::Subscription;

// Re-export the store error from larder-core for convenience
pub use larder_core::StoreError;

use async_trait::async_trait;
use larder_core::ItemDocument;

/// Interface to the inventory document collection
///
/// Implementations hold the sole authoritative copy of the data; everything
/// the sync layer keeps in memory is a disposable cache rebuilt from
/// subscription notifications.
///
/// No operation here is transactional. Read-modify-write sequences built on
/// top of this trait race under concurrent writers and resolve as last
/// write wins at document granularity.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read of a single document.
    ///
    /// Returns `None` when no document exists under `name`.
    async fn get(&self, name: &str) -> Result<Option<ItemDocument>, StoreError>;

    /// Full-replace write of a single document.
    ///
    /// Creates the document if absent. Any previous body is dropped
    /// entirely; this is a replace, not a merge.
    async fn set(&self, name: &str, doc: ItemDocument) -> Result<(), StoreError>;

    /// Delete a single document. Deleting an absent document is a no-op.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;

    /// Open a live subscription to the collection.
    ///
    /// The current full snapshot is delivered immediately, and the full
    /// (never incremental) snapshot is re-delivered after every subsequent
    /// mutation from any writer. Snapshot ordering is unspecified.
    async fn subscribe(&self) -> Result<Subscription, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The sync layer holds the store as a trait object
    fn _assert_object_safe(_: &dyn DocumentStore) {}

    #[tokio::test]
    async fn test_trait_object_usage() {
        use std::sync::Arc;

        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
        store
            .set("rice", ItemDocument::with_quantity(2))
            .await
            .unwrap();

        let doc = store.get("rice").await.unwrap().unwrap();
        assert_eq!(doc.quantity, Some(2));
    }
}
