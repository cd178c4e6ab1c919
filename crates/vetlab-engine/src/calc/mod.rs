//! Calculation orchestrator: raw text in, validated result and history record out.

mod error;
mod evaluate;
mod outcome;
mod request;
mod sentence;

pub use error::CalcError;
pub use outcome::{Calculation, DoseOutcome, Outcome, Solved};
pub use request::CalcRequest;

use crate::history::{HistoryRecord, HistoryStore};
use crate::locale::Locale;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Check `request` the way [`Calculator::calculate`] does, without recording
/// anything.
///
/// # Errors
/// Returns the validation error `calculate` would return for this request.
pub fn validate(request: &CalcRequest) -> Result<(), CalcError> {
    evaluate::evaluate(request, Locale::default()).map(|_| ())
}

/// Runs calculations and records each success in its [`HistoryStore`].
///
/// This is the only code path that creates history records.
pub struct Calculator<S> {
    store: S,
    locale: Locale,
    clock: fn() -> i64,
}

impl<S: HistoryStore> Calculator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locale: Locale::default(),
            clock: now_millis,
        }
    }

    /// Language used for the sentences of new records.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Timestamp source for new records.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate `request`, evaluate it and append the resulting record.
    ///
    /// Validation and domain failures happen before any formula runs and leave
    /// history untouched. If the record cannot be stored, no result is returned.
    ///
    /// # Errors
    /// Returns [`CalcError::Storage`] if the history write fails, any other
    /// variant if the input is rejected.
    pub fn calculate(&mut self, request: &CalcRequest) -> Result<Calculation, CalcError> {
        let evaluated = evaluate::evaluate(request, self.locale).inspect_err(|e| {
            tracing::debug!(kind = %request.kind(), "calculation rejected: {e}");
        })?;
        let record = HistoryRecord {
            kind: evaluated.kind,
            time: (self.clock)(),
            sentence: evaluated.sentence,
            data: evaluated.data,
        };
        self.store
            .append(record.clone())
            .map_err(CalcError::Storage)?;
        tracing::debug!(kind = %record.kind, time = record.time, "calculation recorded");
        Ok(Calculation {
            display: evaluated.display,
            outcome: evaluated.outcome,
            record,
        })
    }
}
