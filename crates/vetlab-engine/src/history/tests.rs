#![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_possible_wrap)]

use super::*;
use serde_json::json;

fn record(n: i64) -> HistoryRecord {
    let mut data = serde_json::Map::new();
    data.insert("result".to_owned(), json!(n));
    HistoryRecord {
        kind: CalcKind::Dose,
        time: n,
        sentence: format!("entry {n}"),
        data,
    }
}

fn times(records: &[HistoryRecord]) -> Vec<i64> {
    records.iter().map(|r| r.time).collect()
}

/// Backend whose reads succeed but whose writes always fail.
struct ReadOnlyBlob(MemoryBlob);

impl BlobBackend for ReadOnlyBlob {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.0.read(key)
    }

    fn write(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("disk full")
    }
}

/// Backend that cannot be read at all.
struct BrokenBlob;

impl BlobBackend for BrokenBlob {
    fn read(&self, _key: &str) -> anyhow::Result<Option<String>> {
        anyhow::bail!("storage offline")
    }

    fn write(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("storage offline")
    }
}

// --- append / load_all ---

#[test]
fn load_all_empty_when_nothing_persisted() {
    let store = MemoryHistoryStore::default();
    assert!(store.load_all().is_empty());
}

#[test]
fn append_inserts_newest_first() {
    let mut store = MemoryHistoryStore::default();
    store.append(record(1)).unwrap();
    store.append(record(2)).unwrap();
    store.append(record(3)).unwrap();
    assert_eq!(times(&store.load_all()), vec![3, 2, 1]);
}

#[test]
fn append_caps_at_max_history() {
    let mut store = MemoryHistoryStore::default();
    for n in 1..=(MAX_HISTORY as i64 + 1) {
        store.append(record(n)).unwrap();
    }
    let all = store.load_all();
    assert_eq!(all.len(), MAX_HISTORY);
    assert_eq!(all[0].time, MAX_HISTORY as i64 + 1, "newest at index 0");
    assert_eq!(all[MAX_HISTORY - 1].time, 2, "oldest record evicted");
    assert!(all.iter().all(|r| r.time != 1));
}

#[test]
fn append_never_exceeds_cap_under_many_writes() {
    let mut store = MemoryHistoryStore::default();
    for n in 0..700 {
        store.append(record(n)).unwrap();
        assert!(store.load_all().len() <= MAX_HISTORY);
    }
}

#[test]
fn append_failure_leaves_persisted_state_unchanged() {
    let seeded = serde_json::to_string(&vec![record(1)]).unwrap();
    let backend = ReadOnlyBlob(MemoryBlob::new().with_entry(HISTORY_KEY, &seeded));
    let mut store = BlobHistoryStore::new(backend);

    let err = store.append(record(2)).unwrap_err();
    assert!(format!("{err:#}").contains("disk full"), "got: {err:#}");
    assert_eq!(times(&store.load_all()), vec![1]);
}

#[test]
fn unreadable_storage_loads_empty_but_append_errors() {
    let mut store = BlobHistoryStore::new(BrokenBlob);
    assert!(store.load_all().is_empty());
    assert!(store.append(record(1)).is_err());
    assert!(store.remove_at(0).is_err());
}

#[test]
fn corrupt_blob_loads_as_empty() {
    let backend = MemoryBlob::new().with_entry(HISTORY_KEY, "{not json");
    let store = BlobHistoryStore::new(backend);
    assert!(store.load_all().is_empty());
}

#[test]
fn wrong_shape_blob_loads_as_empty() {
    let backend = MemoryBlob::new().with_entry(HISTORY_KEY, r#"{"type":"dose"}"#);
    let store = BlobHistoryStore::new(backend);
    assert!(store.load_all().is_empty());
}

#[test]
fn corrupt_blob_is_replaced_on_append() {
    let backend = MemoryBlob::new().with_entry(HISTORY_KEY, "garbage");
    let mut store = BlobHistoryStore::new(backend);
    store.append(record(7)).unwrap();
    assert_eq!(times(&store.load_all()), vec![7]);
}

#[test]
fn legacy_key_is_ignored() {
    let legacy = serde_json::to_string(&vec![record(1)]).unwrap();
    let backend = MemoryBlob::new().with_entry("vetlab_history_v1", &legacy);
    let mut store = BlobHistoryStore::new(backend);
    assert!(store.load_all().is_empty());

    store.append(record(2)).unwrap();
    assert_eq!(
        store.backend().get("vetlab_history_v1"),
        Some(legacy.as_str()),
        "legacy blob must be left alone"
    );
}

#[test]
fn reads_blob_written_by_earlier_versions() {
    // Records without a sentence and with string-valued inputs still load.
    let blob = r#"[
        {"type":"M→g","time":1700000000000,"sentence":"s","data":{"M":"0.1","vol":"100","mw":"58.44","result":0.5844}},
        {"type":"buffer_ph","time":1699999999999,"data":{"pKa":7.2,"ratio":2,"ph":7.501}}
    ]"#;
    let store = BlobHistoryStore::new(MemoryBlob::new().with_entry(HISTORY_KEY, blob));
    let all = store.load_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].kind, CalcKind::MolarityToMass);
    assert_eq!(all[0].result(), Some(0.5844));
    assert_eq!(all[1].sentence, "");
}

// --- remove_at ---

#[test]
fn remove_at_keeps_relative_order() {
    let mut store = MemoryHistoryStore::default();
    for n in 1..=5 {
        store.append(record(n)).unwrap();
    }
    let removed = store.remove_at(2).unwrap();
    assert_eq!(removed.map(|r| r.time), Some(3));
    assert_eq!(times(&store.load_all()), vec![5, 4, 2, 1]);
}

#[test]
fn remove_at_out_of_range_is_noop() {
    let mut store = MemoryHistoryStore::default();
    store.append(record(1)).unwrap();
    assert!(store.remove_at(1).unwrap().is_none());
    assert!(store.remove_at(usize::MAX).unwrap().is_none());
    assert_eq!(store.load_all().len(), 1);
}

#[test]
fn remove_at_on_empty_history_does_not_write() {
    let mut store = MemoryHistoryStore::default();
    assert!(store.remove_at(0).unwrap().is_none());
    assert_eq!(store.backend().get(HISTORY_KEY), None);
}

// --- export ---

#[test]
fn export_header_only_for_empty_history() {
    assert_eq!(export_text_with(&[], |_| String::new()), "type,time,description");
}

#[test]
fn export_quotes_every_field_and_doubles_quotes() {
    let mut rec = record(5);
    rec.sentence = r#"He said "dilute", then left"#.to_owned();
    let csv = export_text_with(&[rec], |ms| format!("t{ms}"));
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "type,time,description");
    assert_eq!(
        lines[1],
        r#""dose","t5","He said ""dilute"", then left""#
    );
}

#[test]
fn export_falls_back_to_data_json_without_sentence() {
    let mut rec = record(9);
    rec.sentence.clear();
    let csv = export_text_with(&[rec], |_| "now".to_owned());
    assert_eq!(
        csv.lines().nth(1),
        Some(r#""dose","now","{""result"":9}""#)
    );
}

#[test]
fn export_keeps_history_order_and_is_pure() {
    let mut store = MemoryHistoryStore::default();
    store.append(record(1)).unwrap();
    store.append(record(2)).unwrap();
    let before = store.load_all();
    let csv = export_text_with(&before, |ms| ms.to_string());
    assert_eq!(
        csv,
        "type,time,description\n\"dose\",\"2\",\"entry 2\"\n\"dose\",\"1\",\"entry 1\""
    );
    assert_eq!(store.load_all(), before);
}

#[test]
fn export_text_renders_local_time() {
    let csv = export_text(&[record(0)]);
    let row = csv.lines().nth(1).unwrap();
    // Exact rendering depends on the host time zone; the shape does not.
    let time_field = row.split("\",\"").nth(1).unwrap();
    assert_eq!(time_field.len(), "1970-01-01 00:00:00".len(), "got {time_field}");
}

// --- record helpers ---

#[test]
fn record_serializes_with_type_key() {
    let value = serde_json::to_value(record(3)).unwrap();
    assert_eq!(value["type"], json!("dose"));
    assert_eq!(value["time"], json!(3));
    assert_eq!(value["data"]["result"], json!(3));
}

#[test]
fn push_capped_truncates_tail() {
    let mut records: Vec<HistoryRecord> = (0..MAX_HISTORY as i64).map(record).collect();
    push_capped(&mut records, record(-1));
    assert_eq!(records.len(), MAX_HISTORY);
    assert_eq!(records[0].time, -1);
    assert_eq!(records[MAX_HISTORY - 1].time, MAX_HISTORY as i64 - 2);
}
