use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Group of units that can be converted into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mass,
    Volume,
    #[serde(rename = "temp")]
    Temperature,
    Molar,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Mass, Self::Volume, Self::Temperature, Self::Molar];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::Volume => "volume",
            Self::Temperature => "temp",
            Self::Molar => "molar",
        }
    }

    pub const fn units(self) -> &'static [Unit] {
        match self {
            Self::Mass => &[Unit::Kilogram, Unit::Gram, Unit::Milligram, Unit::Microgram],
            Self::Volume => &[Unit::Liter, Unit::Milliliter, Unit::Microliter],
            Self::Temperature => &[Unit::Celsius, Unit::Fahrenheit, Unit::Kelvin],
            Self::Molar => &[Unit::Molar, Unit::Millimolar, Unit::Micromolar],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mass" => Ok(Self::Mass),
            "volume" | "vol" => Ok(Self::Volume),
            "temp" | "temperature" => Ok(Self::Temperature),
            "molar" | "molarity" | "concentration" => Ok(Self::Molar),
            other => Err(format!("unknown category \"{other}\"")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Kilogram,
    Gram,
    Milligram,
    Microgram,
    Liter,
    Milliliter,
    Microliter,
    Celsius,
    Fahrenheit,
    Kelvin,
    Molar,
    Millimolar,
    Micromolar,
}

impl Unit {
    pub const fn category(self) -> Category {
        match self {
            Self::Kilogram | Self::Gram | Self::Milligram | Self::Microgram => Category::Mass,
            Self::Liter | Self::Milliliter | Self::Microliter => Category::Volume,
            Self::Celsius | Self::Fahrenheit | Self::Kelvin => Category::Temperature,
            Self::Molar | Self::Millimolar | Self::Micromolar => Category::Molar,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Milligram => "mg",
            Self::Microgram => "ug",
            Self::Liter => "L",
            Self::Milliliter => "mL",
            Self::Microliter => "uL",
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
            Self::Molar => "M",
            Self::Millimolar => "mM",
            Self::Micromolar => "uM",
        }
    }

    /// Factor to the category's base unit (g, L, M). Temperatures are not linear
    /// scales and have none.
    const fn scale(self) -> Option<f64> {
        match self {
            Self::Kilogram => Some(1000.0),
            Self::Gram | Self::Liter | Self::Molar => Some(1.0),
            Self::Milligram | Self::Milliliter | Self::Millimolar => Some(1e-3),
            Self::Microgram | Self::Microliter | Self::Micromolar => Some(1e-6),
            Self::Celsius | Self::Fahrenheit | Self::Kelvin => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = String;

    // Case matters: "M" is molar, "m" is nothing; "mM" vs "MM".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim() {
            "kg" => Self::Kilogram,
            "g" => Self::Gram,
            "mg" => Self::Milligram,
            "ug" | "µg" | "μg" | "mcg" => Self::Microgram,
            "L" | "l" => Self::Liter,
            "mL" | "ml" => Self::Milliliter,
            "uL" | "µL" | "μL" | "ul" => Self::Microliter,
            "°C" | "C" | "celsius" => Self::Celsius,
            "°F" | "F" | "fahrenheit" => Self::Fahrenheit,
            "K" | "kelvin" => Self::Kelvin,
            "M" => Self::Molar,
            "mM" => Self::Millimolar,
            "uM" | "µM" | "μM" => Self::Micromolar,
            other => return Err(format!("unknown unit \"{other}\"")),
        };
        Ok(unit)
    }
}

/// Linear conversion through the category's base unit:
/// `value * scale[from] / scale[to]`.
///
/// Returns `None` when the units are from different categories or are
/// temperatures.
pub fn convert_scaled(value: f64, from: Unit, to: Unit) -> Option<f64> {
    if from.category() != to.category() {
        return None;
    }
    Some(value * from.scale()? / to.scale()?)
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_kelvin(c: f64) -> f64 {
    c + 273.15
}

pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - 273.15
}

pub fn fahrenheit_to_kelvin(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0 + 273.15
}

pub fn kelvin_to_fahrenheit(k: f64) -> f64 {
    (k - 273.15) * 9.0 / 5.0 + 32.0
}

/// Pairwise temperature conversion; identity when `from == to`.
/// Returns `None` if either unit is not a temperature.
pub fn convert_temperature(value: f64, from: Unit, to: Unit) -> Option<f64> {
    use Unit::{Celsius, Fahrenheit, Kelvin};
    let out = match (from, to) {
        (Celsius, Fahrenheit) => celsius_to_fahrenheit(value),
        (Fahrenheit, Celsius) => fahrenheit_to_celsius(value),
        (Celsius, Kelvin) => celsius_to_kelvin(value),
        (Kelvin, Celsius) => kelvin_to_celsius(value),
        (Fahrenheit, Kelvin) => fahrenheit_to_kelvin(value),
        (Kelvin, Fahrenheit) => kelvin_to_fahrenheit(value),
        (Celsius, Celsius) | (Fahrenheit, Fahrenheit) | (Kelvin, Kelvin) => value,
        _ => return None,
    };
    Some(out)
}

/// Convert between any two units of the same category.
pub fn convert(value: f64, from: Unit, to: Unit) -> Option<f64> {
    match from.category() {
        Category::Temperature => convert_temperature(value, from, to),
        Category::Mass | Category::Volume | Category::Molar => convert_scaled(value, from, to),
    }
}
