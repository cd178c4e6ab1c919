//! Human-readable history sentences, one builder per calculator.
//!
//! Inputs are echoed as entered; results are rounded the same way as the
//! display string.

use crate::format::{DEFAULT_PLACES, PH_PLACES, VOLUME_PLACES, format_input, format_number};
use crate::formula::{Category, SerialPoint, Unit};
use crate::locale::Locale;

use super::outcome::DoseOutcome;

pub fn molarity_to_mass(locale: Locale, molarity: f64, volume_ml: f64, mw: f64, grams: f64) -> String {
    let (m, v, mw, g) = (
        format_input(molarity),
        format_input(volume_ml),
        format_input(mw),
        format_number(grams, DEFAULT_PLACES),
    );
    match locale {
        Locale::En => format!(
            "To prepare {v} mL of a {m} M solution (molar weight {mw} g/mol) you need {g} g."
        ),
        Locale::Fa => {
            format!("برای تهیه {g} g از محلول {m} M به حجم {v} mL و جرم مولی {mw} g/mol نیاز است.")
        }
    }
}

pub fn percent_to_mass(locale: Locale, percent: f64, volume_ml: f64, grams: f64) -> String {
    let (p, v, g) = (
        format_input(percent),
        format_input(volume_ml),
        format_number(grams, DEFAULT_PLACES),
    );
    match locale {
        Locale::En => format!("To prepare {v} mL of a {p}% w/v solution you need {g} g."),
        Locale::Fa => format!("برای تهیه {g} g از محلول {p}% w/v در حجم {v} mL نیاز است."),
    }
}

pub fn dilution_c2(locale: Locale, c1: f64, v1: f64, v2: f64, c2: f64) -> String {
    let (c1, v1, v2, c2) = (
        format_input(c1),
        format_input(v1),
        format_input(v2),
        format_number(c2, DEFAULT_PLACES),
    );
    match locale {
        Locale::En => format!(
            "With C1={c1}, V1={v1} and V2={v2}, the final concentration C2 ≈ {c2} (same unit as C1)."
        ),
        Locale::Fa => format!("با C1={c1} و V1={v1} و V2={v2}، غلظت نهایی C2 ≈ {c2} (همان واحد) است."),
    }
}

pub fn dilution_v2(locale: Locale, c1: f64, v1: f64, c2: f64, v2: f64) -> String {
    let (c1, v1, c2, v2) = (
        format_input(c1),
        format_input(v1),
        format_input(c2),
        format_number(v2, DEFAULT_PLACES),
    );
    match locale {
        Locale::En => format!("With C1={c1}, V1={v1} and C2={c2}, the final volume V2 ≈ {v2}."),
        Locale::Fa => format!("با C1={c1} و V1={v1} و C2={c2} حجم نهایی V2 ≈ {v2} است."),
    }
}

pub fn serial(locale: Locale, init: f64, factor: f64, points: &[SerialPoint]) -> String {
    let series = points
        .iter()
        .map(|p| format!("{}:{}", p.step, format_number(p.concentration, DEFAULT_PLACES)))
        .collect::<Vec<_>>()
        .join(", ");
    let steps = points.len().saturating_sub(1);
    let (i, f) = (format_input(init), format_input(factor));
    match locale {
        Locale::En => format!("Serial dilution from {i}, factor {f}, {steps} steps: {series}"),
        Locale::Fa => format!("رقت سریالی: شروع از {i}, عامل {f}, {steps} مرحله — {series}"),
    }
}

/// Built from the freshly computed outcome only; nothing from earlier runs.
pub fn dose(locale: Locale, dose: &DoseOutcome) -> String {
    let total = format_number(dose.total_mg, DEFAULT_PLACES);
    let (d, w) = (format_input(dose.dose_mg_per_kg), format_input(dose.weight_kg));
    let mut out = match locale {
        Locale::En => format!("Dose {d} mg/kg for {w} kg → {total} mg"),
        Locale::Fa => format!("دوز {d} mg/kg برای وزن {w} kg → {total} mg"),
    };
    if let (Some(conc), Some(volume)) = (dose.concentration_mg_per_ml, dose.volume_ml) {
        let (c, vol) = (format_input(conc), format_number(volume, VOLUME_PLACES));
        out.push_str(&match locale {
            Locale::En => format!("; {c} mg/mL stock → {vol} mL"),
            Locale::Fa => format!("؛ حجم از محلول {c} mg/mL → {vol} mL"),
        });
    }
    if let (Some(minutes), Some(rate)) = (dose.duration_min, dose.rate) {
        let (t, ml_hr) = (format_input(minutes), format_number(rate.ml_per_hr, VOLUME_PLACES));
        out.push_str(&match locale {
            Locale::En => format!("; over {t} min → {ml_hr} mL/hr"),
            Locale::Fa => format!("؛ مدت {t} min → {ml_hr} mL/hr"),
        });
        if let (Some(drops), Some(gtt)) = (rate.drops_per_min, dose.drop_factor) {
            let (drops, gtt) = (format_number(drops.round(), 0), format_input(gtt));
            out.push_str(&match locale {
                Locale::En => format!(", {drops} drops/min ({gtt} gtt/mL)"),
                Locale::Fa => format!("، {drops} drops/min ({gtt} gtt/mL)"),
            });
        }
    }
    out
}

pub fn conversion(locale: Locale, category: Category, value: f64, from: Unit, to: Unit, out: f64) -> String {
    let (v, o) = (format_input(value), format_number(out, DEFAULT_PLACES));
    match locale {
        Locale::En => format!("Conversion: {v} {from} → {o} {to} (category: {category})"),
        Locale::Fa => format!("تبدیل: {v} {from} → {o} {to} (دسته: {category})"),
    }
}

pub fn buffer_ph(locale: Locale, pka: f64, ratio: f64, ph: f64) -> String {
    let (p, r, ph) = (format_input(pka), format_input(ratio), format_number(ph, PH_PLACES));
    match locale {
        Locale::En => {
            format!("With pKa={p} and [A-]/[HA]={r} → pH ≈ {ph} (Henderson–Hasselbalch).")
        }
        Locale::Fa => {
            format!("با pKa={p} و نسبت [A-]/[HA]={r} → pH ≈ {ph} (Henderson–Hasselbalch).")
        }
    }
}

pub fn buffer_ratio(locale: Locale, pka: f64, target_ph: f64, ratio: f64) -> String {
    let (p, ph, r) = (
        format_input(pka),
        format_input(target_ph),
        format_number(ratio, DEFAULT_PLACES),
    );
    match locale {
        Locale::En => format!("To reach pH={ph} with pKa={p} you need [A-]/[HA] ≈ {r}."),
        Locale::Fa => format!("برای رسیدن به pH={ph} با pKa={p} نیاز است [A-]/[HA] ≈ {r}."),
    }
}
