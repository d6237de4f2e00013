//! Storage backend selection.

use super::{CorruptPolicy, FileStore, MemoryStore, RegistrationRecord};
use crate::error::RegistrationError;
use std::path::PathBuf;
use tracing::{info, warn};

/// Storage backend for registrations.
#[derive(Debug)]
pub enum Store {
    /// JSON document on disk
    File(FileStore),
    /// In-memory only (no persistence)
    Memory(MemoryStore),
}

impl Store {
    /// Create a file-backed store.
    pub fn file(path: impl Into<PathBuf>, on_corrupt: CorruptPolicy) -> Self {
        let store = FileStore::with_policy(path, on_corrupt);
        info!(
            "Using registration document at {:?} (on_corrupt={:?})",
            store.path(),
            on_corrupt
        );
        Store::File(store)
    }

    /// Force memory store.
    pub fn memory() -> Self {
        warn!("Using in-memory storage (registrations will be lost on restart)");
        Store::Memory(MemoryStore::new())
    }

    /// Append one record, returning the new number of stored entries.
    pub async fn append(&self, record: RegistrationRecord) -> Result<usize, RegistrationError> {
        match self {
            Store::File(s) => s.append(&record).await,
            Store::Memory(s) => Ok(s.append(record).await),
        }
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Result<Vec<RegistrationRecord>, RegistrationError> {
        match self {
            Store::File(s) => s.list().await,
            Store::Memory(s) => Ok(s.list().await),
        }
    }

    /// Up to `limit` records, newest first.
    pub async fn recent(&self, limit: usize) -> Result<Vec<RegistrationRecord>, RegistrationError> {
        let mut records = self.list().await?;
        records.reverse();
        records.truncate(limit);
        Ok(records)
    }

    pub async fn count(&self) -> Result<usize, RegistrationError> {
        match self {
            Store::File(s) => s.count().await,
            Store::Memory(s) => Ok(s.count().await),
        }
    }
}
