//! JSON document storage for the registration list.

use super::RegistrationRecord;
use crate::error::RegistrationError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{ser::PrettyFormatter, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Indentation used when writing the document.
const INDENT: &[u8] = b"    ";

/// What to do when the stored document exists but is not a JSON array.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Treat the document as an empty list; the next write replaces it.
    #[default]
    Discard,
    /// Move the document aside and start from an empty list.
    Quarantine,
    /// Refuse to read or write until the document is repaired.
    Fail,
}

/// Registration list persisted as a single JSON array on disk.
///
/// Every operation holds the store lock for its whole read (and write), so
/// appends from concurrent requests are applied one after another.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    on_corrupt: CorruptPolicy,
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store for `path` using the default corrupt-document policy.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_policy(path, CorruptPolicy::default())
    }

    pub fn with_policy(path: impl Into<PathBuf>, on_corrupt: CorruptPolicy) -> Self {
        Self {
            path: path.into(),
            on_corrupt,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record to the end of the document.
    ///
    /// Returns the number of entries in the document after the write.
    pub async fn append(&self, record: &RegistrationRecord) -> Result<usize, RegistrationError> {
        let _guard = self.lock.lock().await;

        let mut document = self.read_document(true).await?;
        document.push(serde_json::to_value(record)?);
        self.write_document(&document).await?;

        debug!(
            "Appended registration to {:?} ({} entries)",
            self.path,
            document.len()
        );
        Ok(document.len())
    }

    /// Load all readable records in insertion order.
    ///
    /// Entries that do not decode as a registration are skipped here but are
    /// kept in the document on the next append.
    pub async fn list(&self) -> Result<Vec<RegistrationRecord>, RegistrationError> {
        let _guard = self.lock.lock().await;
        let document = self.read_document(false).await?;

        let records = document
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(index, error = %e, "Skipping unreadable registration entry");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    /// Number of entries in the document.
    pub async fn count(&self) -> Result<usize, RegistrationError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document(false).await?.len())
    }

    /// Read the raw entry list. `for_write` allows the quarantine policy to
    /// move a corrupt document aside.
    async fn read_document(&self, for_write: bool) -> Result<Vec<Value>, RegistrationError> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Registration document {:?} not found, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Value>(&data) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(other) => {
                let reason = format!("expected a JSON array, found {}", json_kind(&other));
                self.recover_corrupt(reason, for_write).await
            }
            Err(e) => self.recover_corrupt(e.to_string(), for_write).await,
        }
    }

    async fn recover_corrupt(
        &self,
        reason: String,
        for_write: bool,
    ) -> Result<Vec<Value>, RegistrationError> {
        match self.on_corrupt {
            CorruptPolicy::Fail => Err(RegistrationError::Storage(format!(
                "registration document {} is corrupt: {}",
                self.path.display(),
                reason
            ))),
            CorruptPolicy::Quarantine if for_write => {
                let target = self.quarantine_path();
                fs::rename(&self.path, &target).await?;
                warn!(
                    %reason,
                    "Corrupt registration document moved to {:?}, starting empty", target
                );
                Ok(Vec::new())
            }
            _ => {
                warn!(
                    %reason,
                    "Registration document {:?} is corrupt, treating it as empty", self.path
                );
                Ok(Vec::new())
            }
        }
    }

    fn quarantine_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "registrations".into());
        name.push(format!(".corrupt-{}", Local::now().format("%Y%m%d%H%M%S%.6f")));
        self.path.with_file_name(name)
    }

    /// Replace the whole document.
    async fn write_document(&self, document: &[Value]) -> Result<(), RegistrationError> {
        let mut data = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut data, PrettyFormatter::with_indent(INDENT));
        document.serialize(&mut serializer)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write atomically using temp file + rename
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.path).await?;

        info!(
            "Saved registration document ({} bytes) to {:?}",
            data.len(),
            self.path
        );
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
