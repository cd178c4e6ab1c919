//! Application state for a calculator front end.
//!
//! The state is a plain value; [`update`] derives the next state from the
//! current one and an [`Action`] without performing any I/O. Front ends do
//! the storage work and feed the results back in as actions.

use std::fmt;
use std::str::FromStr;

use crate::calc::Calculation;
use crate::history::{HistoryRecord, MAX_HISTORY, push_capped};
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    Solution,
    Dilution,
    Serial,
    Dose,
    Convert,
    Buffer,
    History,
}

impl Screen {
    pub const ALL: [Self; 8] = [
        Self::Home,
        Self::Solution,
        Self::Dilution,
        Self::Serial,
        Self::Dose,
        Self::Convert,
        Self::Buffer,
        Self::History,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Solution => "solution",
            Self::Dilution => "dilution",
            Self::Serial => "serial",
            Self::Dose => "dose",
            Self::Convert => "convert",
            Self::Buffer => "buffer",
            Self::History => "history",
        }
    }

    pub const fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Home, Locale::En) => "VetLab",
            (Self::Home, Locale::Fa) => "VetLab Pro",
            (Self::Solution, Locale::En) => "Solution (M ↔ g / % w/v)",
            (Self::Solution, Locale::Fa) => "محاسبه محلول (M ↔ g / % w/v)",
            (Self::Dilution, Locale::En) => "Dilution (C1V1 = C2V2)",
            (Self::Dilution, Locale::Fa) => "C1V1 = C2V2 / رقت",
            (Self::Serial, Locale::En) => "Serial dilution",
            (Self::Serial, Locale::Fa) => "رقت سریالی",
            (Self::Dose, Locale::En) => "Dose and infusion rate (mL/hr / drops/min)",
            (Self::Dose, Locale::Fa) => "دوز و نرخ تزریق (mL/hr / drops/min)",
            (Self::Convert, Locale::En) => "Unit conversion",
            (Self::Convert, Locale::Fa) => "تبدیل واحد جامع",
            (Self::Buffer, Locale::En) => "Buffer (Henderson–Hasselbalch)",
            (Self::Buffer, Locale::Fa) => "ماژول بافر (pH)",
            (Self::History, Locale::En) => "History",
            (Self::History, Locale::Fa) => "تاریخچه محاسبات",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|screen| screen.slug() == wanted)
            .or(match wanted.as_str() {
                "c1v1" => Some(Self::Dilution),
                "ph" => Some(Self::Buffer),
                _ => None,
            })
            .ok_or_else(|| format!("unknown screen \"{wanted}\""))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    /// In-memory mirror of persisted history, newest first.
    pub history: Vec<HistoryRecord>,
    pub last_display: Option<String>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Screen),
    Back,
    HistoryLoaded(Vec<HistoryRecord>),
    Calculated(Calculation),
    Failed(String),
    Removed(usize),
}

/// Apply `action` to `state`.
///
/// Changing screens clears the last result and error. A calculation
/// prepends its record to the mirror with the same cap the store uses.
#[must_use]
pub fn update(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::Navigate(screen) => {
            state.screen = screen;
            state.last_display = None;
            state.last_error = None;
        }
        Action::Back => {
            state.screen = Screen::Home;
            state.last_display = None;
            state.last_error = None;
        }
        Action::HistoryLoaded(mut records) => {
            records.truncate(MAX_HISTORY);
            state.history = records;
        }
        Action::Calculated(calculation) => {
            push_capped(&mut state.history, calculation.record);
            state.last_display = Some(calculation.display);
            state.last_error = None;
        }
        Action::Failed(message) => {
            state.last_display = None;
            state.last_error = Some(message);
        }
        Action::Removed(index) => {
            if index < state.history.len() {
                state.history.remove(index);
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_possible_wrap)]

    use super::*;
    use crate::calc::{CalcRequest, Calculator};
    use crate::history::{CalcKind, HistoryStore, MemoryHistoryStore};

    fn record(time: i64) -> HistoryRecord {
        HistoryRecord {
            kind: CalcKind::BufferPh,
            time,
            sentence: format!("r{time}"),
            data: serde_json::Map::new(),
        }
    }

    fn calculation() -> Calculation {
        let mut calc = Calculator::new(MemoryHistoryStore::default()).with_clock(|| 42);
        calc.calculate(&CalcRequest::BufferPh {
            pka: "7.2".to_owned(),
            ratio: "2".to_owned(),
        })
        .unwrap()
    }

    #[test]
    fn starts_on_home_with_nothing_shown() {
        let state = AppState::default();
        assert_eq!(state.screen, Screen::Home);
        assert!(state.history.is_empty());
        assert!(state.last_display.is_none());
        assert!(state.last_error.is_none());
    }

    #[test]
    fn navigate_and_back() {
        let state = update(AppState::default(), Action::Navigate(Screen::Dose));
        assert_eq!(state.screen, Screen::Dose);
        let state = update(state, Action::Failed("invalid input".to_owned()));
        assert_eq!(state.last_error.as_deref(), Some("invalid input"));

        let state = update(state, Action::Back);
        assert_eq!(state.screen, Screen::Home);
        assert!(state.last_error.is_none(), "leaving a screen clears its error");
    }

    #[test]
    fn calculated_prepends_record_and_sets_display() {
        let state = AppState {
            screen: Screen::Buffer,
            history: vec![record(1)],
            last_display: None,
            last_error: Some("old".to_owned()),
        };
        let state = update(state, Action::Calculated(calculation()));
        assert_eq!(state.last_display.as_deref(), Some("pH ≈ 7.501"));
        assert!(state.last_error.is_none());
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].time, 42);
        assert_eq!(state.history[1].time, 1);
    }

    #[test]
    fn calculated_respects_history_cap() {
        let history = (0..MAX_HISTORY as i64).map(record).collect();
        let state = AppState {
            history,
            ..AppState::default()
        };
        let state = update(state, Action::Calculated(calculation()));
        assert_eq!(state.history.len(), MAX_HISTORY);
        assert_eq!(state.history[0].time, 42);
    }

    #[test]
    fn failed_clears_previous_result() {
        let state = update(AppState::default(), Action::Calculated(calculation()));
        let state = update(state, Action::Failed("nope".to_owned()));
        assert!(state.last_display.is_none());
        assert_eq!(state.history.len(), 1, "failures never touch history");
    }

    #[test]
    fn history_loaded_replaces_mirror() {
        let state = update(
            AppState {
                history: vec![record(9)],
                ..AppState::default()
            },
            Action::HistoryLoaded(vec![record(2), record(1)]),
        );
        let times: Vec<i64> = state.history.iter().map(|r| r.time).collect();
        assert_eq!(times, vec![2, 1]);
    }

    #[test]
    fn removed_mirrors_store_semantics() {
        let mut store = MemoryHistoryStore::default();
        for t in 1..=3 {
            store.append(record(t)).unwrap();
        }
        let state = update(AppState::default(), Action::HistoryLoaded(store.load_all()));

        store.remove_at(1).unwrap();
        let state = update(state, Action::Removed(1));
        assert_eq!(state.history, store.load_all());

        let state = update(state, Action::Removed(10));
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn screens_parse_from_slugs() {
        for screen in Screen::ALL {
            assert_eq!(screen.slug().parse::<Screen>().unwrap(), screen);
            assert!(!screen.title(Locale::En).is_empty());
            assert!(!screen.title(Locale::Fa).is_empty());
        }
        assert_eq!("C1V1".parse::<Screen>().unwrap(), Screen::Dilution);
        assert!("settings".parse::<Screen>().is_err());
    }
}
