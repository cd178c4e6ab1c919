#![allow(clippy::unwrap_used, clippy::float_cmp)]

use super::*;

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS * b.abs().max(1.0)
}

// --- solution ---

#[test]
fn mass_from_molarity_matches_formula() {
    for &(m, v, mw) in &[(0.1, 100.0, 58.44), (1.0, 1000.0, 180.16), (0.25, 50.0, 74.55)] {
        assert_eq!(mass_from_molarity(m, v, mw), m * (v / 1000.0) * mw);
    }
    assert!(close(mass_from_molarity(0.1, 100.0, 58.44), 0.5844));
}

#[test]
fn mass_from_molarity_agrees_with_percent_when_units_coincide() {
    // A 0.1 M NaCl solution is 0.5844 % w/v.
    let (m, v, mw) = (0.1, 250.0, 58.44);
    let percent = 100.0 * m * mw / 1000.0;
    assert!(close(mass_from_molarity(m, v, mw), mass_from_percent(percent, v)));
}

#[test]
fn mass_from_percent_five_percent_in_100ml() {
    assert_eq!(mass_from_percent(5.0, 100.0), 5.0);
    assert_eq!(mass_from_percent(0.9, 500.0), 4.5);
}

// --- dilution ---

#[test]
fn dilution_solves_either_side() {
    assert_eq!(dilution_c2(1.0, 100.0, 200.0), 0.5);
    assert_eq!(dilution_v2(1.0, 100.0, 0.25), 400.0);
}

#[test]
fn serial_dilution_tenfold_three_steps() {
    let points = serial_dilution(1.0, 10.0, 3);
    let concentrations: Vec<f64> = points.iter().map(|p| p.concentration).collect();
    assert_eq!(concentrations.len(), 4);
    for (got, want) in concentrations.iter().zip([1.0, 0.1, 0.01, 0.001]) {
        assert!(close(*got, want), "{got} != {want}");
    }
    let steps: Vec<u32> = points.iter().map(|p| p.step).collect();
    assert_eq!(steps, vec![0, 1, 2, 3]);
}

#[test]
fn serial_dilution_each_point_divides_previous() {
    let points = serial_dilution(7.5, 3.0, 6);
    assert_eq!(points.len(), 7);
    assert_eq!(points[0].concentration, 7.5);
    for pair in points.windows(2) {
        assert_eq!(pair[1].concentration, pair[0].concentration / 3.0);
    }
}

#[test]
fn serial_dilution_zero_steps_is_just_the_stock() {
    let points = serial_dilution(2.0, 10.0, 0);
    assert_eq!(
        points,
        vec![SerialPoint {
            step: 0,
            concentration: 2.0
        }]
    );
}

// --- dose ---

#[test]
fn dose_example_chain() {
    let total = dose_total(5.0, 10.0);
    assert_eq!(total, 50.0);
    let volume = infusion_volume(total, 50.0);
    assert_eq!(volume, 1.0);
    let rate = infusion_rate(volume, 60.0, Some(20.0));
    assert!(close(rate.ml_per_hr, 1.0));
    assert!(close(rate.drops_per_min.unwrap(), 20.0 / 60.0));
}

#[test]
fn infusion_rate_without_drop_factor_has_no_drops() {
    let rate = infusion_rate(120.0, 30.0, None);
    assert_eq!(rate.ml_per_hr, 240.0);
    assert_eq!(rate.drops_per_min, None);
}

// --- conversion ---

#[test]
fn mass_conversion_uses_gram_scale() {
    assert!(close(convert(1000.0, Unit::Milligram, Unit::Gram).unwrap(), 1.0));
    assert!(close(convert(2.0, Unit::Kilogram, Unit::Milligram).unwrap(), 2e6));
    assert!(close(convert(5.0, Unit::Microgram, Unit::Milligram).unwrap(), 0.005));
}

#[test]
fn volume_and_molar_conversion() {
    assert!(close(convert(250.0, Unit::Milliliter, Unit::Liter).unwrap(), 0.25));
    assert!(close(convert(1.0, Unit::Milliliter, Unit::Microliter).unwrap(), 1000.0));
    assert!(close(convert(0.5, Unit::Molar, Unit::Millimolar).unwrap(), 500.0));
}

#[test]
fn conversion_across_categories_is_rejected() {
    assert_eq!(convert(1.0, Unit::Gram, Unit::Liter), None);
    assert_eq!(convert(1.0, Unit::Celsius, Unit::Gram), None);
    assert_eq!(convert_scaled(1.0, Unit::Celsius, Unit::Kelvin), None);
}

#[test]
fn temperature_pairs() {
    assert_eq!(convert(100.0, Unit::Celsius, Unit::Fahrenheit), Some(212.0));
    assert_eq!(convert(32.0, Unit::Fahrenheit, Unit::Celsius), Some(0.0));
    assert!(close(convert(0.0, Unit::Celsius, Unit::Kelvin).unwrap(), 273.15));
    assert!(close(convert(273.15, Unit::Kelvin, Unit::Celsius).unwrap(), 0.0));
    assert!(close(convert(212.0, Unit::Fahrenheit, Unit::Kelvin).unwrap(), 373.15));
    assert!(close(convert(373.15, Unit::Kelvin, Unit::Fahrenheit).unwrap(), 212.0));
    assert_eq!(convert(37.0, Unit::Celsius, Unit::Celsius), Some(37.0));
}

#[test]
fn temperature_round_trip() {
    for x in [-40.0, 0.0, 37.0, 100.0] {
        assert!(close(celsius_to_fahrenheit(fahrenheit_to_celsius(x)), x));
        assert!(close(kelvin_to_celsius(celsius_to_kelvin(x)), x));
        assert!(close(kelvin_to_fahrenheit(fahrenheit_to_kelvin(x)), x));
    }
    assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
}

#[test]
fn unit_parsing_accepts_aliases_and_keeps_case() {
    assert_eq!("µg".parse::<Unit>(), Ok(Unit::Microgram));
    assert_eq!("ml".parse::<Unit>(), Ok(Unit::Milliliter));
    assert_eq!("°C".parse::<Unit>(), Ok(Unit::Celsius));
    assert_eq!("M".parse::<Unit>(), Ok(Unit::Molar));
    assert_eq!("mM".parse::<Unit>(), Ok(Unit::Millimolar));
    assert!("m".parse::<Unit>().is_err());
    assert!("lbs".parse::<Unit>().is_err());
}

#[test]
fn category_parsing_and_membership() {
    assert_eq!("Temp".parse::<Category>(), Ok(Category::Temperature));
    assert!("speed".parse::<Category>().is_err());
    for category in Category::ALL {
        for unit in category.units() {
            assert_eq!(unit.category(), category);
        }
    }
}

// --- buffer ---

#[test]
fn buffer_ph_equal_ratio_is_pka() {
    assert_eq!(buffer_ph(4.76, 1.0), 4.76);
}

#[test]
fn buffer_round_trip() {
    let ph = buffer_ph(7.2, 2.0);
    assert!((ph - 7.501).abs() < 1e-3);
    assert!(close(buffer_ratio(7.2, ph), 2.0));
    for &(pka, ratio) in &[(4.76, 0.1), (9.25, 15.0), (6.1, 20.0)] {
        assert!(close(buffer_ratio(pka, buffer_ph(pka, ratio)), ratio));
    }
}
