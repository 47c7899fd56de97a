//! Persistent document store
//!
//! File-backed implementation of [`DocumentStore`] using an append-only
//! JSONL log. The log is replayed on startup to reconstruct the in-memory
//! collection; reads and subscriptions are then served from memory while
//! every mutation is appended to the log before it becomes visible.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use larder_core::{InventoryItem, ItemDocument, Snapshot, StoreError};
use serde::{Deserialize, Serialize};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

use crate::DocumentStore;
use crate::subscription::{SnapshotPublisher, Subscription};

const LOG_FILE: &str = "inventory.log";

/// Entry type in the append-only log
#[derive(Debug, Clone, Serialize, Deserialize)]
enum LogEntry {
    /// Full-replace write of a document
    Set {
        /// Document key
        name: String,
        /// Document body
        doc: ItemDocument,
    },
    /// Removal of a document
    Delete {
        /// Document key
        name: String,
    },
}

/// Persistent implementation of [`DocumentStore`]
///
/// Uses an append-only log file for durability, with an in-memory DashMap
/// for fast access. The log is replayed on startup to reconstruct the
/// collection. Compaction is not performed; the log grows with every
/// mutation.
#[derive(Debug)]
pub struct PersistentDocumentStore {
    /// Path to the storage directory
    storage_path: PathBuf,
    /// In-memory view of the collection
    documents: DashMap<String, ItemDocument>,
    /// Snapshot fan-out to live subscribers
    publisher: SnapshotPublisher,
    /// Write handle for the append-only log
    writer: Mutex<BufWriter<File>>,
    /// Whether to sync writes immediately (durability vs performance)
    sync_writes: bool,
}

impl PersistentDocumentStore {
    /// Open (or create) a persistent store in the given directory,
    /// syncing every write.
    pub async fn new(storage_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::with_options(storage_path, true).await
    }

    /// Open (or create) a persistent store with explicit durability
    /// behavior.
    pub async fn with_options(
        storage_path: impl AsRef<Path>,
        sync_writes: bool,
    ) -> Result<Self, StoreError> {
        let storage_path = storage_path.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&storage_path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let log_path = storage_path.join(LOG_FILE);
        let documents = DashMap::new();

        if log_path.exists() {
            let replayed = Self::replay_log(&log_path, &documents).await?;
            info!(
                path = %log_path.display(),
                entries = replayed,
                documents = documents.len(),
                "Replayed inventory log"
            );
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(Self {
            storage_path,
            documents,
            publisher: SnapshotPublisher::new(),
            writer: Mutex::new(BufWriter::new(file)),
            sync_writes,
        })
    }

    /// Path to the storage directory
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Number of documents in the collection
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    async fn replay_log(
        log_path: &Path,
        documents: &DashMap<String, ItemDocument>,
    ) -> Result<usize, StoreError> {
        let file = File::open(log_path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        let mut lines = BufReader::new(file).lines();
        let mut replayed = 0usize;

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<LogEntry>(&line) {
                Ok(LogEntry::Set { name, doc }) => {
                    documents.insert(name, doc);
                    replayed += 1;
                }
                Ok(LogEntry::Delete { name }) => {
                    documents.remove(&name);
                    replayed += 1;
                }
                Err(e) => {
                    // A torn final line after a crash is expected; anything
                    // else in the middle of the log is worth surfacing.
                    warn!(error = %e, "Skipping unparsable log entry");
                }
            }
        }

        Ok(replayed)
    }

    async fn append(&self, entry: &LogEntry) -> Result<(), StoreError> {
        let line = serde_json::to_string(entry)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut writer = self.writer.lock().await;
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        if self.sync_writes {
            writer
                .get_mut()
                .sync_data()
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        Ok(())
    }

    fn current_snapshot(&self) -> Snapshot {
        self.documents
            .iter()
            .map(|entry| InventoryItem::new(entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

#[async_trait]
impl DocumentStore for PersistentDocumentStore {
    async fn get(&self, name: &str) -> Result<Option<ItemDocument>, StoreError> {
        Ok(self.documents.get(name).map(|doc| doc.clone()))
    }

    async fn set(&self, name: &str, doc: ItemDocument) -> Result<(), StoreError> {
        trace!(item = name, quantity = ?doc.quantity, "Writing document");
        self.append(&LogEntry::Set {
            name: name.to_string(),
            doc: doc.clone(),
        })
        .await?;

        self.documents.insert(name.to_string(), doc);
        self.publisher.publish(&self.current_snapshot());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        if !self.documents.contains_key(name) {
            return Ok(());
        }

        self.append(&LogEntry::Delete {
            name: name.to_string(),
        })
        .await?;

        self.documents.remove(name);
        debug!(item = name, "Deleted document");
        self.publisher.publish(&self.current_snapshot());
        Ok(())
    }

    async fn subscribe(&self) -> Result<Subscription, StoreError> {
        Ok(self.publisher.subscribe(self.current_snapshot()))
    }
}
