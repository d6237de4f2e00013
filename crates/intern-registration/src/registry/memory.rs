//! In-memory registration storage.

use super::RegistrationRecord;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local store, used when persistence is disabled and in tests.
///
/// Records are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<RegistrationRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return the new number of records.
    pub async fn append(&self, record: RegistrationRecord) -> usize {
        let mut records = self.records.write().await;
        records.push(record);
        debug!("Memory store: {} registrations held", records.len());
        records.len()
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<RegistrationRecord> {
        self.records.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}
