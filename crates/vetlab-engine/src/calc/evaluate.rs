use serde_json::{Map, Value, json};

use crate::format::{DEFAULT_PLACES, PH_PLACES, VOLUME_PLACES, format_input, format_number};
use crate::formula::{self, Category, MAX_SERIAL_STEPS, Unit};
use crate::history::CalcKind;
use crate::locale::Locale;
use crate::sanitize::parse_number;

use super::error::CalcError;
use super::outcome::{DoseOutcome, Outcome, Solved};
use super::request::CalcRequest;
use super::sentence;

/// Everything a record needs, produced without touching storage.
pub(super) struct Evaluated {
    pub kind: CalcKind,
    pub display: String,
    pub sentence: String,
    pub data: Map<String, Value>,
    pub outcome: Outcome,
}

pub(super) fn evaluate(request: &CalcRequest, locale: Locale) -> Result<Evaluated, CalcError> {
    match request {
        CalcRequest::MolarityToMass {
            molarity,
            volume_ml,
            molar_weight,
        } => molarity_to_mass(locale, molarity, volume_ml, molar_weight),
        CalcRequest::PercentToMass { percent, volume_ml } => {
            percent_to_mass(locale, percent, volume_ml)
        }
        CalcRequest::Dilution { c1, v1, c2, v2 } => dilution(locale, c1, v1, c2, v2),
        CalcRequest::Serial {
            init,
            factor,
            steps,
        } => serial(locale, init, factor, steps),
        CalcRequest::Dose {
            dose_mg_per_kg,
            weight_kg,
            concentration_mg_per_ml,
            duration_min,
            drop_factor,
        } => dose(
            locale,
            dose_mg_per_kg,
            weight_kg,
            concentration_mg_per_ml,
            duration_min,
            drop_factor,
        ),
        CalcRequest::Convert {
            category,
            value,
            from,
            to,
        } => convert(locale, category, value, from, to),
        CalcRequest::BufferPh { pka, ratio } => buffer_ph(locale, pka, ratio),
        CalcRequest::BufferRatio { pka, target_ph } => buffer_ratio(locale, pka, target_ph),
    }
}

/// An optional input: blank means absent, anything else must parse.
fn optional(name: &'static str, raw: &str) -> Result<Option<f64>, CalcError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_number(raw)
        .map(Some)
        .ok_or_else(|| CalcError::invalid(&[name]))
}

fn positive(name: &str, value: f64) -> Result<f64, CalcError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::domain(format!("{name} must be greater than zero")))
    }
}

/// Guards against overflow from extreme inputs.
fn finite(value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::domain("result is out of range"))
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn molarity_to_mass(
    locale: Locale,
    molarity: &str,
    volume_ml: &str,
    molar_weight: &str,
) -> Result<Evaluated, CalcError> {
    let (Some(m), Some(v), Some(mw)) = (
        parse_number(molarity),
        parse_number(volume_ml),
        parse_number(molar_weight),
    ) else {
        return Err(CalcError::invalid(&["molarity", "volume", "molar weight"]));
    };
    let grams = finite(formula::mass_from_molarity(m, v, mw))?;
    Ok(Evaluated {
        kind: CalcKind::MolarityToMass,
        display: format!("mass: {} g", format_number(grams, DEFAULT_PLACES)),
        sentence: sentence::molarity_to_mass(locale, m, v, mw, grams),
        data: object(json!({
            "molarity": m,
            "volume_ml": v,
            "molar_weight": mw,
            "result": grams,
        })),
        outcome: Outcome::Mass { grams },
    })
}

fn percent_to_mass(locale: Locale, percent: &str, volume_ml: &str) -> Result<Evaluated, CalcError> {
    let (Some(p), Some(v)) = (parse_number(percent), parse_number(volume_ml)) else {
        return Err(CalcError::invalid(&["percent", "volume"]));
    };
    let grams = finite(formula::mass_from_percent(p, v))?;
    Ok(Evaluated {
        kind: CalcKind::PercentToMass,
        display: format!("mass: {} g", format_number(grams, DEFAULT_PLACES)),
        sentence: sentence::percent_to_mass(locale, p, v, grams),
        data: object(json!({ "percent": p, "volume_ml": v, "result": grams })),
        outcome: Outcome::Mass { grams },
    })
}

fn dilution(locale: Locale, c1: &str, v1: &str, c2: &str, v2: &str) -> Result<Evaluated, CalcError> {
    let (Some(c1), Some(v1)) = (parse_number(c1), parse_number(v1)) else {
        return Err(CalcError::invalid(&["C1", "V1"]));
    };
    let c2 = optional("C2", c2)?;
    let v2 = optional("V2", v2)?;

    // A given C2 wins: the user is asking for the final volume.
    let (solved, value, sentence, data) = match (c2, v2) {
        (Some(c2), _) => {
            let c2 = positive("C2", c2)?;
            let value = finite(formula::dilution_v2(c1, v1, c2))?;
            (
                Solved::V2,
                value,
                sentence::dilution_v2(locale, c1, v1, c2, value),
                json!({ "C1": c1, "V1": v1, "C2": c2, "result": value }),
            )
        }
        (None, Some(v2)) => {
            let v2 = positive("V2", v2)?;
            let value = finite(formula::dilution_c2(c1, v1, v2))?;
            (
                Solved::C2,
                value,
                sentence::dilution_c2(locale, c1, v1, v2, value),
                json!({ "C1": c1, "V1": v1, "V2": v2, "result": value }),
            )
        }
        (None, None) => {
            return Err(CalcError::NeedOneOf {
                fields: vec!["C2", "V2"],
            });
        }
    };
    let label = match solved {
        Solved::C2 => "C2",
        Solved::V2 => "V2",
    };
    Ok(Evaluated {
        kind: CalcKind::Dilution,
        display: format!("{label} ≈ {}", format_number(value, DEFAULT_PLACES)),
        sentence,
        data: object(data),
        outcome: Outcome::Dilution { solved, value },
    })
}

fn serial(locale: Locale, init: &str, factor: &str, steps: &str) -> Result<Evaluated, CalcError> {
    let (Some(init), Some(factor), Some(steps)) =
        (parse_number(init), parse_number(factor), parse_number(steps))
    else {
        return Err(CalcError::invalid(&["initial concentration", "dilution factor", "steps"]));
    };
    let factor = positive("dilution factor", factor)?;
    if steps < 0.0 || steps.fract() != 0.0 {
        return Err(CalcError::domain("steps must be a whole number"));
    }
    if steps > f64::from(MAX_SERIAL_STEPS) {
        return Err(CalcError::domain(format!(
            "steps must be at most {MAX_SERIAL_STEPS}"
        )));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = steps as u32;

    let points = formula::serial_dilution(init, factor, steps);
    for point in &points {
        finite(point.concentration)?;
    }
    let display = points
        .iter()
        .map(|p| {
            format!(
                "step {}: {}",
                p.step,
                format_number(p.concentration, DEFAULT_PLACES)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let series: Vec<Value> = points
        .iter()
        .map(|p| json!({ "step": p.step, "concentration": p.concentration }))
        .collect();
    Ok(Evaluated {
        kind: CalcKind::SerialDilution,
        display,
        sentence: sentence::serial(locale, init, factor, &points),
        data: object(json!({
            "init": init,
            "factor": factor,
            "steps": steps,
            "result": series,
        })),
        outcome: Outcome::Serial { points },
    })
}

fn dose(
    locale: Locale,
    dose_mg_per_kg: &str,
    weight_kg: &str,
    concentration: &str,
    duration_min: &str,
    drop_factor: &str,
) -> Result<Evaluated, CalcError> {
    let (Some(dose_mg_per_kg), Some(weight_kg)) =
        (parse_number(dose_mg_per_kg), parse_number(weight_kg))
    else {
        return Err(CalcError::invalid(&["dose", "weight"]));
    };
    let concentration = optional("concentration", concentration)?
        .map(|c| positive("concentration", c))
        .transpose()?;
    let duration = optional("duration", duration_min)?
        .map(|t| positive("duration", t))
        .transpose()?;
    let drop_factor = optional("drop factor", drop_factor)?;

    let total_mg = finite(formula::dose_total(dose_mg_per_kg, weight_kg))?;
    let volume_ml = concentration
        .map(|c| finite(formula::infusion_volume(total_mg, c)))
        .transpose()?;
    let rate = match (volume_ml, duration) {
        (Some(volume), Some(minutes)) => Some(formula::infusion_rate(volume, minutes, drop_factor)),
        _ => None,
    };
    if let Some(rate) = rate {
        finite(rate.ml_per_hr)?;
        rate.drops_per_min.map(finite).transpose()?;
    }

    let outcome = DoseOutcome {
        dose_mg_per_kg,
        weight_kg,
        concentration_mg_per_ml: concentration,
        duration_min: duration,
        drop_factor,
        total_mg,
        volume_ml,
        rate,
    };

    let mut lines = vec![format!(
        "total dose: {} mg",
        format_number(total_mg, DEFAULT_PLACES)
    )];
    if let (Some(volume), Some(c)) = (volume_ml, concentration) {
        lines.push(format!(
            "volume: {} mL ({} mg/mL)",
            format_number(volume, VOLUME_PLACES),
            format_input(c)
        ));
    }
    if let Some(rate) = rate {
        let mut line = format!("rate: {} mL/hr", format_number(rate.ml_per_hr, VOLUME_PLACES));
        if let (Some(drops), Some(gtt)) = (rate.drops_per_min, drop_factor) {
            line.push_str(&format!(
                ", {} drops/min ({} gtt/mL)",
                format_number(drops.round(), 0),
                format_input(gtt)
            ));
        }
        lines.push(line);
    }

    Ok(Evaluated {
        kind: CalcKind::Dose,
        display: lines.join("\n"),
        sentence: sentence::dose(locale, &outcome),
        data: object(json!({
            "dose_mg_per_kg": dose_mg_per_kg,
            "weight_kg": weight_kg,
            "concentration_mg_per_ml": concentration,
            "duration_min": duration,
            "drop_factor": drop_factor,
            "volume_ml": volume_ml,
            "ml_per_hr": rate.map(|r| r.ml_per_hr),
            "drops_per_min": rate.and_then(|r| r.drops_per_min),
            "result": total_mg,
        })),
        outcome: Outcome::Dose(outcome),
    })
}

fn convert(
    locale: Locale,
    category: &str,
    value: &str,
    from: &str,
    to: &str,
) -> Result<Evaluated, CalcError> {
    let Some(value) = parse_number(value) else {
        return Err(CalcError::invalid(&["value"]));
    };
    let category: Category = category.parse().map_err(CalcError::Unsupported)?;
    let from = unit_in(category, from)?;
    let to = unit_in(category, to)?;
    let out = formula::convert(value, from, to)
        .ok_or_else(|| CalcError::Unsupported(format!("cannot convert {from} to {to}")))?;
    let out = finite(out)?;
    Ok(Evaluated {
        kind: CalcKind::UnitConversion,
        display: format!(
            "{} {from} = {} {to}",
            format_input(value),
            format_number(out, DEFAULT_PLACES)
        ),
        sentence: sentence::conversion(locale, category, value, from, to, out),
        data: object(json!({
            "category": category,
            "value": value,
            "from": from,
            "to": to,
            "result": out,
        })),
        outcome: Outcome::Converted {
            category,
            from,
            to,
            value: out,
        },
    })
}

fn unit_in(category: Category, raw: &str) -> Result<Unit, CalcError> {
    let unit: Unit = raw.parse().map_err(CalcError::Unsupported)?;
    if unit.category() == category {
        Ok(unit)
    } else {
        Err(CalcError::Unsupported(format!(
            "{unit} is not a {category} unit"
        )))
    }
}

fn buffer_ph(locale: Locale, pka: &str, ratio: &str) -> Result<Evaluated, CalcError> {
    let (Some(pka), Some(ratio)) = (parse_number(pka), parse_number(ratio)) else {
        return Err(CalcError::invalid(&["pKa", "ratio"]));
    };
    let ratio = positive("ratio", ratio)?;
    let ph = finite(formula::buffer_ph(pka, ratio))?;
    Ok(Evaluated {
        kind: CalcKind::BufferPh,
        display: format!("pH ≈ {}", format_number(ph, PH_PLACES)),
        sentence: sentence::buffer_ph(locale, pka, ratio, ph),
        data: object(json!({ "pKa": pka, "ratio": ratio, "result": ph })),
        outcome: Outcome::Ph { ph },
    })
}

fn buffer_ratio(locale: Locale, pka: &str, target_ph: &str) -> Result<Evaluated, CalcError> {
    let (Some(pka), Some(target_ph)) = (parse_number(pka), parse_number(target_ph)) else {
        return Err(CalcError::invalid(&["pKa", "target pH"]));
    };
    let ratio = finite(formula::buffer_ratio(pka, target_ph))?;
    Ok(Evaluated {
        kind: CalcKind::BufferRatio,
        display: format!("[A-]/[HA] ≈ {}", format_number(ratio, DEFAULT_PLACES)),
        sentence: sentence::buffer_ratio(locale, pka, target_ph, ratio),
        data: object(json!({ "pKa": pka, "targetPh": target_ph, "result": ratio })),
        outcome: Outcome::Ratio { ratio },
    })
}
