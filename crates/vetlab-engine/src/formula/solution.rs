/// Grams of solute for `volume_ml` of a `molarity` M solution of a compound
/// with molar weight `molar_weight` g/mol.
pub fn mass_from_molarity(molarity: f64, volume_ml: f64, molar_weight: f64) -> f64 {
    molarity * (volume_ml / 1000.0) * molar_weight
}

/// Grams of solute for `volume_ml` of a `percent` % w/v solution.
pub fn mass_from_percent(percent: f64, volume_ml: f64) -> f64 {
    percent * volume_ml / 100.0
}
