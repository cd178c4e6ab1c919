use std::collections::HashMap;

use anyhow::Context as _;

use super::types::HistoryRecord;
use super::{HISTORY_KEY, push_capped};

/// Persistence contract for the calculation history.
///
/// Mutations take `&mut self`: the read-modify-write cycle is not atomic, so
/// there must never be two mutations in flight against the same storage.
pub trait HistoryStore {
    /// Every record, newest first. Missing or unreadable state yields an empty list.
    fn load_all(&self) -> Vec<HistoryRecord>;

    /// Insert `record` at the front, evicting from the tail past the cap.
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read or written;
    /// persisted state is then unchanged.
    fn append(&mut self, record: HistoryRecord) -> anyhow::Result<()>;

    /// Delete the record at `index`. Returns `Ok(None)` without writing when
    /// `index` is out of range.
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read or written.
    fn remove_at(&mut self, index: usize) -> anyhow::Result<Option<HistoryRecord>>;
}

/// A keyed string store holding one blob per key.
pub trait BlobBackend {
    /// # Errors
    /// Returns an error on an I/O failure. A missing key is `Ok(None)`.
    fn read(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// # Errors
    /// Returns an error on an I/O failure.
    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// [`HistoryStore`] keeping the whole history as one JSON array under a key.
#[derive(Debug)]
pub struct BlobHistoryStore<B> {
    backend: B,
    key: String,
}

impl<B: BlobBackend> BlobHistoryStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, HISTORY_KEY)
    }

    pub fn with_key(backend: B, key: &str) -> Self {
        Self {
            backend,
            key: key.to_owned(),
        }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// I/O errors propagate; a blob that does not parse counts as empty.
    fn read_records(&self) -> anyhow::Result<Vec<HistoryRecord>> {
        let Some(raw) = self
            .backend
            .read(&self.key)
            .with_context(|| format!("read history blob {}", self.key))?
        else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<HistoryRecord>>(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(key = %self.key, "discarding unparseable history: {e}");
                Ok(Vec::new())
            }
        }
    }

    fn write_records(&mut self, records: &[HistoryRecord]) -> anyhow::Result<()> {
        let blob = serde_json::to_string(records).context("serialize history")?;
        self.backend
            .write(&self.key, &blob)
            .with_context(|| format!("write history blob {}", self.key))
    }
}

impl<B: BlobBackend> HistoryStore for BlobHistoryStore<B> {
    fn load_all(&self) -> Vec<HistoryRecord> {
        self.read_records().unwrap_or_else(|e| {
            tracing::warn!("history unavailable: {e:#}");
            Vec::new()
        })
    }

    fn append(&mut self, record: HistoryRecord) -> anyhow::Result<()> {
        let mut records = self.read_records()?;
        push_capped(&mut records, record);
        self.write_records(&records)?;
        tracing::debug!(len = records.len(), "history record appended");
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> anyhow::Result<Option<HistoryRecord>> {
        let mut records = self.read_records()?;
        if index >= records.len() {
            return Ok(None);
        }
        let removed = records.remove(index);
        self.write_records(&records)?;
        tracing::debug!(index, len = records.len(), "history record removed");
        Ok(Some(removed))
    }
}

/// In-process [`BlobBackend`], for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlob {
    entries: HashMap<String, String>,
}

impl MemoryBlob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `key` with a raw blob.
    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl BlobBackend for MemoryBlob {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// History kept in memory only.
pub type MemoryHistoryStore = BlobHistoryStore<MemoryBlob>;

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new(MemoryBlob::new())
    }
}
