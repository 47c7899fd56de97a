//! # Larder Core
//!
//! Core data model and error types for the Larder inventory system.
//!
//! The inventory is a schemaless document collection keyed by item name.
//! This crate defines the document shape stored in the collection
//! ([`ItemDocument`]), the snapshot entry delivered to consumers
//! ([`InventoryItem`]), and the error taxonomy shared by the store and
//! sync layers.

pub mod error;
pub mod item;

// Re-exports
pub use error::{LarderError, LarderResult, StoreError};
pub use item::{InventoryItem, ItemDocument, Snapshot};
