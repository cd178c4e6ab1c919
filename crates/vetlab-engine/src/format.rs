//! Number rendering for display strings and sentences.

/// Decimal places for most results.
pub const DEFAULT_PLACES: usize = 4;
/// Decimal places for volumes and flow rates.
pub const VOLUME_PLACES: usize = 3;
/// Decimal places for pH values.
pub const PH_PLACES: usize = 3;

/// Round `value` to `places` decimals.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Render `value` rounded to `places` decimals without trailing zeros.
///
/// Non-finite values render as `-`, negative zero as `0`.
pub fn format_number(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return "-".to_owned();
    }
    let rounded = round_to(value, places);
    if rounded == 0.0 {
        return "0".to_owned();
    }
    format!("{rounded}")
}

/// Render a user-entered input the way it was parsed (no rounding).
pub fn format_input(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    format!("{value}")
}
