//! Live snapshot subscriptions
//!
//! A store keeps a registry of subscriber channels and pushes the complete
//! collection contents through every one of them after each mutation. The
//! payload is always the full snapshot, never a diff; subscribers rebuild
//! their state wholesale from each delivery.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use larder_core::Snapshot;
use tokio::sync::mpsc;
use tracing::{debug, trace};

type SubscriberMap = DashMap<u64, mpsc::UnboundedSender<Snapshot>>;

/// Fan-out of collection snapshots to live subscribers.
///
/// Shared by the store implementations; each mutation calls
/// [`SnapshotPublisher::publish`] with the post-mutation snapshot.
#[derive(Debug)]
pub(crate) struct SnapshotPublisher {
    subscribers: Arc<SubscriberMap>,
    next_id: AtomicU64,
}

impl SnapshotPublisher {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a new subscriber and deliver `initial` as its first
    /// snapshot.
    pub(crate) fn subscribe(&self, initial: Snapshot) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        // Queue the initial snapshot before registering, so it is always
        // the first delivery this subscriber sees.
        let _ = tx.send(initial);
        self.subscribers.insert(id, tx);
        debug!(subscription = id, "Opened collection subscription");

        Subscription {
            id,
            rx,
            subscribers: Arc::clone(&self.subscribers),
            detached: false,
        }
    }

    /// Push a snapshot to every live subscriber, pruning closed channels.
    pub(crate) fn publish(&self, snapshot: &Snapshot) {
        self.subscribers.retain(|id, tx| {
            let alive = tx.send(snapshot.clone()).is_ok();
            if !alive {
                trace!(subscription = *id, "Pruning closed subscription");
            }
            alive
        });
    }

    /// Number of currently registered subscribers.
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Handle to a live collection subscription.
///
/// Receives the full snapshot on establishment and after every mutation.
/// Dropping the handle detaches it; [`Subscription::unsubscribe`] does the
/// same explicitly and is a no-op when called again.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<Snapshot>,
    subscribers: Arc<SubscriberMap>,
    detached: bool,
}

impl Subscription {
    /// Wait for the next snapshot delivery.
    ///
    /// Returns `None` once the subscription has been detached and all
    /// queued deliveries have been drained.
    pub async fn recv(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }

    /// Detach from the store. Idempotent; queued deliveries already in the
    /// channel can still be drained with [`Subscription::recv`].
    pub fn unsubscribe(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.subscribers.remove(&self.id);
        self.rx.close();
        debug!(subscription = self.id, "Closed collection subscription");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::{InventoryItem, ItemDocument};

    fn snapshot_of(names: &[&str]) -> Snapshot {
        names
            .iter()
            .map(|name| InventoryItem::new(*name, ItemDocument::with_quantity(1)))
            .collect()
    }

    #[tokio::test]
    async fn test_initial_snapshot_delivered_first() {
        let publisher = SnapshotPublisher::new();
        let mut sub = publisher.subscribe(snapshot_of(&["apple"]));

        let first = sub.recv().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name, "apple");
    }

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        let publisher = SnapshotPublisher::new();
        let mut sub_a = publisher.subscribe(Snapshot::new());
        let mut sub_b = publisher.subscribe(Snapshot::new());

        // Drain initial snapshots
        sub_a.recv().await.unwrap();
        sub_b.recv().await.unwrap();

        publisher.publish(&snapshot_of(&["apple", "banana"]));

        assert_eq!(sub_a.recv().await.unwrap().len(), 2);
        assert_eq!(sub_b.recv().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent() {
        let publisher = SnapshotPublisher::new();
        let mut sub = publisher.subscribe(Snapshot::new());
        assert_eq!(publisher.subscriber_count(), 1);

        sub.unsubscribe();
        sub.unsubscribe();
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_recv_ends_after_unsubscribe() {
        let publisher = SnapshotPublisher::new();
        let mut sub = publisher.subscribe(snapshot_of(&["apple"]));

        sub.unsubscribe();

        // The queued initial snapshot is still drained, then the feed ends
        assert!(sub.recv().await.is_some());
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_dropped_subscriber_is_pruned_on_publish() {
        let publisher = SnapshotPublisher::new();
        let sub = publisher.subscribe(Snapshot::new());
        drop(sub);

        publisher.publish(&Snapshot::new());
        assert_eq!(publisher.subscriber_count(), 0);
    }
}
