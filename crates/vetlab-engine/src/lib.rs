//! Calculation and history engine for veterinary laboratory calculators.
//!
//! Raw text inputs go through [`sanitize`], are validated and evaluated by
//! [`calc::Calculator`] using the pure functions in [`formula`], and every
//! successful calculation is appended to a bounded [`history`] log.

pub mod app;
pub mod calc;
pub mod format;
pub mod formula;
pub mod history;
pub mod locale;
pub mod sanitize;

pub use app::{Action, AppState, Screen, update};
pub use calc::{CalcError, CalcRequest, Calculation, Calculator, Outcome};
pub use history::{
    BlobBackend, BlobHistoryStore, CalcKind, HistoryRecord, HistoryStore, MAX_HISTORY,
};
pub use locale::Locale;
