//! Closed-form laboratory formulas.
//!
//! Everything here is a pure function of already-validated numbers. Division by
//! zero, non-positive logarithm arguments and invalid step counts are rejected by
//! [`crate::calc`] before any of these run.

mod buffer;
mod convert;
mod dilution;
mod dose;
mod solution;

pub use buffer::{buffer_ph, buffer_ratio};
pub use convert::{
    Category, Unit, celsius_to_fahrenheit, celsius_to_kelvin, convert, convert_scaled,
    convert_temperature, fahrenheit_to_celsius, fahrenheit_to_kelvin, kelvin_to_celsius,
    kelvin_to_fahrenheit,
};
pub use dilution::{MAX_SERIAL_STEPS, SerialPoint, dilution_c2, dilution_v2, serial_dilution};
pub use dose::{InfusionRate, dose_total, infusion_rate, infusion_volume};
pub use solution::{mass_from_molarity, mass_from_percent};

#[cfg(test)]
mod tests;
