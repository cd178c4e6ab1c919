use serde::Serialize;

use crate::formula::{Category, InfusionRate, SerialPoint, Unit};
use crate::history::HistoryRecord;

/// Which side of C1·V1 = C2·V2 was solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Solved {
    C2,
    V2,
}

/// Inputs and stages of a dose calculation. Later stages are `None` when the
/// inputs they need were not supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseOutcome {
    pub dose_mg_per_kg: f64,
    pub weight_kg: f64,
    pub concentration_mg_per_ml: Option<f64>,
    pub duration_min: Option<f64>,
    pub drop_factor: Option<f64>,
    pub total_mg: f64,
    pub volume_ml: Option<f64>,
    pub rate: Option<InfusionRate>,
}

/// Unrounded numeric result of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Mass {
        grams: f64,
    },
    Dilution {
        solved: Solved,
        value: f64,
    },
    Serial {
        points: Vec<SerialPoint>,
    },
    Dose(DoseOutcome),
    Converted {
        category: Category,
        from: Unit,
        to: Unit,
        value: f64,
    },
    Ph {
        ph: f64,
    },
    Ratio {
        ratio: f64,
    },
}

/// A successful, recorded calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    /// Rounded, ready-to-print result.
    pub display: String,
    pub outcome: Outcome,
    /// The record that was appended to history.
    pub record: HistoryRecord,
}
