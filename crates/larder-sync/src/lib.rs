//! # Larder Sync
//!
//! Client-side state synchronization for the Larder inventory system.
//!
//! Data flows one way: a mutation writes to the document store, the store
//! pushes a fresh full snapshot to every subscriber, and the
//! [`InventoryMirror`] replaces its local copy wholesale. The mirror is a
//! disposable cache with no authority of its own; it is never written back
//! except through the mutation operations on [`Inventory`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use larder_store::InMemoryDocumentStore;
//! use larder_sync::{filter_items, Inventory, InventoryMirror};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), larder_sync::SyncError> {
//!     let store = Arc::new(InMemoryDocumentStore::new());
//!     let mirror = InventoryMirror::start(store.clone()).await?;
//!     let inventory = Inventory::new(store);
//!
//!     inventory.add_item("milk").await?;
//!
//!     let mut feed = mirror.watch();
//!     feed.changed().await.ok();
//!     let visible = filter_items(&mirror.snapshot(), "mi");
//!     assert_eq!(visible.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod filter;
pub mod mirror;
pub mod ops;

// Re-exports
pub use error::SyncError;
pub use filter::filter_items;
pub use mirror::InventoryMirror;
pub use ops::Inventory;
