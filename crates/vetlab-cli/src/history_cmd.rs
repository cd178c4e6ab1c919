use std::path::Path;

use anyhow::Context as _;
use vetlab::history;
use vetlab::paths;
use vetlab_engine::history::{HistoryRecord, HistoryStore, export_text, format_local_time};
use vetlab_engine::{Action, AppState, Locale, Screen, update};

use crate::output::print_json;

fn open_store() -> anyhow::Result<history::SqliteHistoryStore> {
    let path = paths::db_path().ok_or_else(|| anyhow::anyhow!("cannot determine history DB path"))?;
    history::open_store(&path)
}

/// Landing screen: every calculator plus the size of the history.
pub fn cmd_home(locale: Locale, json: bool) -> anyhow::Result<i32> {
    let store = open_store()?;
    let state = update(AppState::default(), Action::HistoryLoaded(store.load_all()));

    if json {
        let screens: Vec<serde_json::Value> = Screen::ALL
            .iter()
            .filter(|s| **s != Screen::Home)
            .map(|s| serde_json::json!({ "screen": s.slug(), "title": s.title(locale) }))
            .collect();
        print_json(&serde_json::json!({
            "screens": screens,
            "history_count": state.history.len(),
        }))?;
        return Ok(0);
    }

    println!("{}", state.screen.title(locale));
    for screen in Screen::ALL {
        match screen {
            Screen::Home => {}
            Screen::History => {
                println!("  {:<10} {} ({})", screen.slug(), screen.title(locale), state.history.len());
            }
            Screen::Solution
            | Screen::Dilution
            | Screen::Serial
            | Screen::Dose
            | Screen::Convert
            | Screen::Buffer => println!("  {:<10} {}", screen.slug(), screen.title(locale)),
        }
    }
    Ok(0)
}

pub fn cmd_history_list(limit: usize, json: bool) -> anyhow::Result<i32> {
    let records = open_store()?.load_all();
    let shown = &records[..limit.min(records.len())];

    if json {
        print_json(shown)?;
        return Ok(0);
    }
    if shown.is_empty() {
        eprintln!("[vetlab] no history entries found");
        return Ok(0);
    }
    for (index, record) in shown.iter().enumerate() {
        print_entry_line(index, record);
    }
    Ok(0)
}

pub fn cmd_history_show(index: usize, json: bool) -> anyhow::Result<i32> {
    let records = open_store()?.load_all();
    let Some(record) = records.get(index) else {
        eprintln!("[vetlab] history entry {index} not found");
        return Ok(1);
    };

    if json {
        print_json(record)?;
        return Ok(0);
    }
    println!("Index: {index}");
    println!("Type: {}", record.kind);
    println!("Time: {}", format_local_time(record.time));
    println!("Description: {}", record.description());
    println!("Data: {}", serde_json::Value::Object(record.data.clone()));
    Ok(0)
}

pub fn cmd_history_rm(index: usize) -> anyhow::Result<i32> {
    let mut store = open_store()?;
    let state = update(AppState::default(), Action::HistoryLoaded(store.load_all()));

    let Some(removed) = store.remove_at(index)? else {
        eprintln!("[vetlab] history entry {index} not found");
        return Ok(1);
    };
    let state = update(state, Action::Removed(index));
    eprintln!(
        "[vetlab] removed entry {index} ({}), {} remaining",
        removed.kind,
        state.history.len()
    );
    Ok(0)
}

pub fn cmd_history_export(output: Option<&Path>) -> anyhow::Result<i32> {
    let records = open_store()?.load_all();
    let text = export_text(&records);

    match output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("write export to {}", path.display()))?;
            eprintln!("[vetlab] exported {} entries to {}", records.len(), path.display());
        }
        None => println!("{text}"),
    }
    Ok(0)
}

fn print_entry_line(index: usize, record: &HistoryRecord) {
    println!(
        "{index} {} [{}] {}",
        format_local_time(record.time),
        record.kind,
        record.description()
    );
}
