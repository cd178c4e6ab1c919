use serde::Serialize;

/// Total drug amount in mg for a per-kg dose.
pub fn dose_total(dose_mg_per_kg: f64, weight_kg: f64) -> f64 {
    dose_mg_per_kg * weight_kg
}

/// Millilitres of stock needed to deliver `total_mg` at `concentration_mg_per_ml`.
pub fn infusion_volume(total_mg: f64, concentration_mg_per_ml: f64) -> f64 {
    total_mg / concentration_mg_per_ml
}

/// Flow rate of an infusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InfusionRate {
    pub ml_per_hr: f64,
    pub drops_per_min: Option<f64>,
}

/// Rate for delivering `volume_ml` over `duration_min`. Drops per minute are only
/// known when the infusion set's drop factor (gtt/mL) is.
pub fn infusion_rate(volume_ml: f64, duration_min: f64, drop_factor: Option<f64>) -> InfusionRate {
    InfusionRate {
        ml_per_hr: (volume_ml / duration_min) * 60.0,
        drops_per_min: drop_factor.map(|gtt| volume_ml * gtt / duration_min),
    }
}
