//! Inventory mutation operations
//!
//! Each operation is a read-modify-write sequence against the document
//! store: a point read followed by a dependent write or delete, with no
//! transaction around the pair. Concurrent operations on the same item
//! race and resolve as last write wins at the store.
//!
//! The mirror is intentionally not consulted or updated here; every
//! visible effect arrives back through the store's subscription feed.

use std::sync::Arc;

use larder_core::ItemDocument;
use larder_store::DocumentStore;
use tracing::error;

use crate::error::SyncError;

/// Mutation operations over the inventory collection.
#[derive(Clone)]
pub struct Inventory {
    store: Arc<dyn DocumentStore>,
}

impl Inventory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Increment an item's quantity, creating it at 1 if absent.
    ///
    /// A present document with a missing or zero quantity counts as zero
    /// before the increment.
    pub async fn add_item(&self, name: &str) -> Result<(), SyncError> {
        match self.store.get(name).await? {
            Some(doc) => {
                let quantity = doc.quantity.unwrap_or(0) + 1;
                self.store
                    .set(name, ItemDocument::with_quantity(quantity))
                    .await?;
            }
            None => {
                self.store.set(name, ItemDocument::with_quantity(1)).await?;
            }
        }
        Ok(())
    }

    /// Decrement an item's quantity, deleting it when it stands at exactly 1.
    ///
    /// Absent items are silently left alone. The delete branch is taken
    /// only on `quantity == 1`; a zero or missing quantity is coerced to 1
    /// before the subtraction, so such documents are rewritten with an
    /// explicit quantity of 0 rather than deleted. That asymmetry is
    /// inherited behavior and is kept as is (pinned by
    /// `test_remove_item_missing_quantity_writes_zero`).
    pub async fn remove_item(&self, name: &str) -> Result<(), SyncError> {
        let Some(doc) = self.store.get(name).await? else {
            return Ok(());
        };

        if doc.quantity == Some(1) {
            self.store.delete(name).await?;
        } else {
            let base = match doc.quantity {
                Some(0) | None => 1,
                Some(quantity) => quantity,
            };
            self.store
                .set(name, ItemDocument::with_quantity(base - 1))
                .await?;
        }
        Ok(())
    }

    /// Rename an item and/or replace its quantity.
    ///
    /// `quantity_text` is parsed as a base-10 integer; empty or unparsable
    /// input coerces to 0. When the name changes, the new document is
    /// created before the old one is deleted; the two writes are
    /// independent, so a failure in between leaves both documents present.
    /// A missing source item is logged and otherwise ignored.
    pub async fn update_item(
        &self,
        old_name: &str,
        new_name: &str,
        quantity_text: &str,
    ) -> Result<(), SyncError> {
        if self.store.get(old_name).await?.is_none() {
            error!(item = old_name, "Cannot update: item does not exist");
            return Ok(());
        }

        let quantity = parse_quantity(quantity_text);

        if old_name != new_name {
            self.store
                .set(new_name, ItemDocument::with_quantity(quantity))
                .await?;
            self.store.delete(old_name).await?;
        } else {
            self.store
                .set(old_name, ItemDocument::with_quantity(quantity))
                .await?;
        }
        Ok(())
    }
}

/// Base-10 quantity parse with failure coerced to zero.
fn parse_quantity(text: &str) -> u64 {
    text.trim().parse().unwrap_or(0)
}
