mod export;
mod store;
mod types;

pub use export::{EXPORT_HEADER, export_text, export_text_with, format_local_time};
pub use store::{BlobBackend, BlobHistoryStore, HistoryStore, MemoryBlob, MemoryHistoryStore};
pub use types::{CalcKind, HistoryRecord};

/// Maximum number of records kept; older ones are evicted on append.
pub const MAX_HISTORY: usize = 300;

/// Storage key of the current history schema. Blobs under any other key are
/// legacy and never read.
pub const HISTORY_KEY: &str = "vetlab_history_v2";

/// Insert `record` at the front of `records` and drop whatever falls past
/// [`MAX_HISTORY`].
pub fn push_capped(records: &mut Vec<HistoryRecord>, record: HistoryRecord) {
    records.insert(0, record);
    records.truncate(MAX_HISTORY);
}

#[cfg(test)]
mod tests;
