//! Inventory data model
//!
//! Documents in the backing collection are schemaless: an item written by
//! an older client may lack the `quantity` field entirely. The model keeps
//! that distinction (`Option<u64>`) and coerces missing to zero only at
//! read sites, via [`InventoryItem::quantity`].

use serde::{Deserialize, Serialize};

/// The document body stored in the inventory collection.
///
/// The item name is the document key and is not repeated inside the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    /// Stock count. Absent on documents written without the field;
    /// absent is treated as zero for display and arithmetic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

impl ItemDocument {
    /// Create a document with an explicit quantity.
    pub fn with_quantity(quantity: u64) -> Self {
        Self {
            quantity: Some(quantity),
        }
    }

    /// Create a document without a quantity field.
    pub fn without_quantity() -> Self {
        Self { quantity: None }
    }
}

/// One entry of a collection snapshot: document key plus document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Item name, the unique document key. Storage is case-sensitive;
    /// search is case-insensitive.
    pub name: String,
    /// Raw quantity field as stored. Prefer [`InventoryItem::quantity`]
    /// for reads.
    pub quantity: Option<u64>,
}

impl InventoryItem {
    /// Build a snapshot entry from a document key and body.
    pub fn new(name: impl Into<String>, doc: ItemDocument) -> Self {
        Self {
            name: name.into(),
            quantity: doc.quantity,
        }
    }

    /// Quantity with the missing field coerced to zero.
    pub fn quantity(&self) -> u64 {
        self.quantity.unwrap_or(0)
    }

    /// The document body for this entry.
    pub fn document(&self) -> ItemDocument {
        ItemDocument {
            quantity: self.quantity,
        }
    }
}

/// Full contents of the inventory collection at a point in time, as
/// delivered by a subscription notification. Ordering is whatever the
/// store yields; it is not guaranteed to be stable between snapshots.
pub type Snapshot = Vec<InventoryItem>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_quantity_reads_as_zero() {
        let item = InventoryItem::new("milk", ItemDocument::without_quantity());
        assert_eq!(item.quantity, None);
        assert_eq!(item.quantity(), 0);
    }

    #[test]
    fn test_explicit_quantity() {
        let item = InventoryItem::new("eggs", ItemDocument::with_quantity(12));
        assert_eq!(item.quantity(), 12);
    }

    #[test]
    fn test_document_round_trips_through_item() {
        let doc = ItemDocument::with_quantity(3);
        let item = InventoryItem::new("flour", doc.clone());
        assert_eq!(item.document(), doc);
    }

    #[test]
    fn test_missing_quantity_field_is_omitted_from_json() {
        let json = serde_json::to_string(&ItemDocument::without_quantity()).unwrap();
        assert_eq!(json, "{}");

        let json = serde_json::to_string(&ItemDocument::with_quantity(2)).unwrap();
        assert_eq!(json, r#"{"quantity":2}"#);
    }

    #[test]
    fn test_document_deserializes_without_quantity() {
        let doc: ItemDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.quantity, None);
    }
}
