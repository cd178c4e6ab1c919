use vetlab::history;
use vetlab::paths;
use vetlab_engine::calc::validate;
use vetlab_engine::{Action, AppState, CalcRequest, Calculator, Locale, Screen, update};

use crate::output::print_json;

fn open_store() -> anyhow::Result<history::SqliteHistoryStore> {
    let path = paths::db_path().ok_or_else(|| anyhow::anyhow!("cannot determine history DB path"))?;
    history::open_store(&path)
}

const fn screen_for(request: &CalcRequest) -> Screen {
    match request {
        CalcRequest::MolarityToMass { .. } | CalcRequest::PercentToMass { .. } => Screen::Solution,
        CalcRequest::Dilution { .. } => Screen::Dilution,
        CalcRequest::Serial { .. } => Screen::Serial,
        CalcRequest::Dose { .. } => Screen::Dose,
        CalcRequest::Convert { .. } => Screen::Convert,
        CalcRequest::BufferPh { .. } | CalcRequest::BufferRatio { .. } => Screen::Buffer,
    }
}

/// Run one calculation, record it and print the result.
///
/// Rejected input is reported on stderr with exit code 1 before the history DB
/// is touched; a failure to open or write the DB is returned as an error.
pub fn cmd_calculate(request: &CalcRequest, locale: Locale, json: bool) -> anyhow::Result<i32> {
    let state = update(AppState::default(), Action::Navigate(screen_for(request)));

    let state = match validate(request) {
        Err(e) => update(state, Action::Failed(e.to_string())),
        Ok(()) => {
            let mut calc = Calculator::new(open_store()?).with_locale(locale);
            match calc.calculate(request) {
                Ok(calculation) => {
                    if json {
                        print_json(&calculation)?;
                    }
                    update(state, Action::Calculated(calculation))
                }
                Err(e) if e.is_validation() => update(state, Action::Failed(e.to_string())),
                Err(e) => return Err(e.into()),
            }
        }
    };

    if let Some(message) = &state.last_error {
        eprintln!("[vetlab] error: {message}");
        return Ok(1);
    }
    if !json && let Some(display) = &state.last_display {
        println!("{display}");
        if let Some(record) = state.history.first() {
            eprintln!("[vetlab] {}", record.sentence);
        }
    }
    Ok(0)
}
