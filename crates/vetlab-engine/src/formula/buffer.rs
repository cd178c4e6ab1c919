/// Henderson–Hasselbalch: pH of a buffer with base/acid `ratio` ([A-]/[HA]).
/// `ratio` must be positive.
pub fn buffer_ph(pka: f64, ratio: f64) -> f64 {
    pka + ratio.log10()
}

/// Base/acid ratio needed to reach `target_ph`.
pub fn buffer_ratio(pka: f64, target_ph: f64) -> f64 {
    10f64.powf(target_ph - pka)
}
