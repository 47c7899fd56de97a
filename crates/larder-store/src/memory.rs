//! In-memory document store
//!
//! This module provides an in-memory implementation of [`DocumentStore`],
//! suitable for tests and local single-process use.

use async_trait::async_trait;
use dashmap::DashMap;
use larder_core::{InventoryItem, ItemDocument, Snapshot, StoreError};
use tracing::trace;

use crate::DocumentStore;
use crate::subscription::{SnapshotPublisher, Subscription};

/// In-memory implementation of [`DocumentStore`]
///
/// Uses `DashMap` for the collection, so snapshot ordering is unspecified,
/// matching the contract. Every mutation publishes the full post-mutation
/// snapshot to all live subscribers.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    documents: DashMap<String, ItemDocument>,
    publisher: SnapshotPublisher,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            publisher: SnapshotPublisher::new(),
        }
    }

    /// Number of documents in the collection
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.publisher.subscriber_count()
    }

    fn current_snapshot(&self) -> Snapshot {
        self.documents
            .iter()
            .map(|entry| InventoryItem::new(entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, name: &str) -> Result<Option<ItemDocument>, StoreError> {
        Ok(self.documents.get(name).map(|doc| doc.clone()))
    }

    async fn set(&self, name: &str, doc: ItemDocument) -> Result<(), StoreError> {
        trace!(item = name, quantity = ?doc.quantity, "Writing document");
        self.documents.insert(name.to_string(), doc);
        self.publisher.publish(&self.current_snapshot());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        if self.documents.remove(name).is_some() {
            trace!(item = name, "Deleted document");
            self.publisher.publish(&self.current_snapshot());
        }
        Ok(())
    }

    async fn subscribe(&self) -> Result<Subscription, StoreError> {
        Ok(self.publisher.subscribe(self.current_snapshot()))
    }
}
