use chrono::{Local, TimeZone as _};

use super::types::HistoryRecord;

pub const EXPORT_HEADER: &str = "type,time,description";

/// Render `records` as CSV with times in the local time zone.
pub fn export_text(records: &[HistoryRecord]) -> String {
    export_text_with(records, format_local_time)
}

/// Render `records` as CSV: an unquoted header, then one row per record with
/// every field quoted and embedded quotes doubled.
pub fn export_text_with(records: &[HistoryRecord], format_time: impl Fn(i64) -> String) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(EXPORT_HEADER.to_owned());
    for record in records {
        let fields = [
            quote(record.kind.label()),
            quote(&format_time(record.time)),
            quote(&record.description()),
        ];
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

/// `YYYY-MM-DD HH:MM:SS` in local time; the raw milliseconds if out of range.
pub fn format_local_time(epoch_ms: i64) -> String {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map_or_else(|| epoch_ms.to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
