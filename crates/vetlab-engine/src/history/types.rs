use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which calculator produced a record. The serialized names are the ones the
/// persisted history blob has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalcKind {
    #[serde(rename = "M→g")]
    MolarityToMass,
    #[serde(rename = "%w/v")]
    PercentToMass,
    #[serde(rename = "C1V1")]
    Dilution,
    #[serde(rename = "serial")]
    SerialDilution,
    #[serde(rename = "dose")]
    Dose,
    #[serde(rename = "convert")]
    UnitConversion,
    #[serde(rename = "buffer_ph")]
    BufferPh,
    #[serde(rename = "buffer_ratio")]
    BufferRatio,
}

impl CalcKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MolarityToMass => "M→g",
            Self::PercentToMass => "%w/v",
            Self::Dilution => "C1V1",
            Self::SerialDilution => "serial",
            Self::Dose => "dose",
            Self::UnitConversion => "convert",
            Self::BufferPh => "buffer_ph",
            Self::BufferRatio => "buffer_ratio",
        }
    }
}

impl fmt::Display for CalcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One persisted calculation. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "type")]
    pub kind: CalcKind,
    /// Creation time, epoch milliseconds.
    pub time: i64,
    #[serde(default)]
    pub sentence: String,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl HistoryRecord {
    /// The sentence, or the raw `data` as JSON for records that have none.
    pub fn description(&self) -> Cow<'_, str> {
        if self.sentence.is_empty() {
            Cow::Owned(serde_json::Value::Object(self.data.clone()).to_string())
        } else {
            Cow::Borrowed(&self.sentence)
        }
    }

    /// The `result` entry of `data`, when it is a plain number.
    pub fn result(&self) -> Option<f64> {
        self.data.get("result").and_then(serde_json::Value::as_f64)
    }
}
