//! Inventory mirror
//!
//! The mirror subscribes to the document store once and keeps an in-memory
//! copy of the collection, replaced wholesale on every notification. There
//! is no diffing and no partial update; each delivery is the complete
//! collection contents and the previous local state is discarded.

use std::sync::Arc;

use larder_core::Snapshot;
use larder_store::DocumentStore;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::SyncError;

/// Live in-memory mirror of the inventory collection.
///
/// Created with [`InventoryMirror::start`], which establishes the store
/// subscription and waits for the initial snapshot, so [`snapshot`] is
/// populated as soon as `start` returns. A background pump task then
/// replaces the mirrored state on every subsequent delivery.
///
/// The mirror is single-writer (the pump) and multiple-reader; readers use
/// [`snapshot`] for a point-in-time copy or [`watch`] for a change feed.
///
/// [`snapshot`]: InventoryMirror::snapshot
/// [`watch`]: InventoryMirror::watch
#[derive(Debug)]
pub struct InventoryMirror {
    snapshot_rx: watch::Receiver<Snapshot>,
    pump: Option<JoinHandle<()>>,
}

impl InventoryMirror {
    /// Subscribe to the store and start mirroring.
    ///
    /// Returns once the initial snapshot has been received. Fails only if
    /// the subscription cannot be established or closes before delivering
    /// the initial snapshot.
    pub async fn start(store: Arc<dyn DocumentStore>) -> Result<Self, SyncError> {
        let mut subscription = store.subscribe().await?;

        let initial = subscription
            .recv()
            .await
            .ok_or(larder_core::StoreError::SubscriptionClosed)?;
        debug!(items = initial.len(), "Mirror received initial snapshot");

        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let pump = tokio::spawn(async move {
            while let Some(snapshot) = subscription.recv().await {
                debug!(items = snapshot.len(), "Replacing mirrored snapshot");
                if snapshot_tx.send(snapshot).is_err() {
                    break;
                }
            }
            debug!("Subscription ended, mirror pump exiting");
        });

        Ok(Self {
            snapshot_rx,
            pump: Some(pump),
        })
    }

    /// Point-in-time copy of the mirrored collection.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Change feed over the mirrored collection.
    ///
    /// Presentation layers await `changed()` on the returned receiver and
    /// re-render from `borrow()` instead of polling.
    pub fn watch(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    /// Detach from the store and stop mirroring.
    ///
    /// Aborting the pump drops the subscription, which removes it from the
    /// store's registry. Calling `stop` again is a no-op; the last
    /// mirrored snapshot stays readable.
    pub fn stop(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
            debug!("Mirror stopped");
        }
    }

    /// Whether the mirror is still attached to the store.
    pub fn is_running(&self) -> bool {
        self.pump.as_ref().is_some_and(|pump| !pump.is_finished())
    }
}

impl Drop for InventoryMirror {
    fn drop(&mut self) {
        self.stop();
    }
}
