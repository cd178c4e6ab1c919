use crate::history::CalcKind;

/// Raw text inputs for one calculation, as typed by the user.
///
/// Optional fields are absent when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcRequest {
    MolarityToMass {
        molarity: String,
        volume_ml: String,
        molar_weight: String,
    },
    PercentToMass {
        percent: String,
        volume_ml: String,
    },
    /// Solves V2 when `c2` is given, otherwise C2 from `v2`.
    Dilution {
        c1: String,
        v1: String,
        c2: String,
        v2: String,
    },
    Serial {
        init: String,
        factor: String,
        steps: String,
    },
    Dose {
        dose_mg_per_kg: String,
        weight_kg: String,
        concentration_mg_per_ml: String,
        duration_min: String,
        drop_factor: String,
    },
    Convert {
        category: String,
        value: String,
        from: String,
        to: String,
    },
    BufferPh {
        pka: String,
        ratio: String,
    },
    BufferRatio {
        pka: String,
        target_ph: String,
    },
}

impl CalcRequest {
    pub const fn kind(&self) -> CalcKind {
        match self {
            Self::MolarityToMass { .. } => CalcKind::MolarityToMass,
            Self::PercentToMass { .. } => CalcKind::PercentToMass,
            Self::Dilution { .. } => CalcKind::Dilution,
            Self::Serial { .. } => CalcKind::SerialDilution,
            Self::Dose { .. } => CalcKind::Dose,
            Self::Convert { .. } => CalcKind::UnitConversion,
            Self::BufferPh { .. } => CalcKind::BufferPh,
            Self::BufferRatio { .. } => CalcKind::BufferRatio,
        }
    }
}
