//! Parsing rules for the raw text of one form field.
//!
//! All of these are total: anything a user can type maps to a model value,
//! never an error. Blank or unparseable text becomes the indeterminate state,
//! except where the field is defined to clamp to zero instead.

use crate::model::{Amount, Rate, Volume};

/// Entry-volume field. Blank is indeterminate; a non-numeric or negative
/// parse clamps to 0; a fractional parse keeps the integer part.
pub fn parse_volume_field(input: &str) -> Volume {
    let t = input.trim();
    if t.is_empty() {
        return Volume::Indeterminate;
    }
    if let Ok(n) = t.parse::<i64>() {
        return Volume::Count(n.max(0) as u64);
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => Volume::Count(v.max(0.0).trunc() as u64),
        _ => Volume::Count(0),
    }
}

/// Conversion-rate field. Blank or non-numeric is indeterminate, which keeps
/// mid-edit text like a bare `.` representable; numeric input clamps to
/// [0, 100].
pub fn parse_rate_field(input: &str) -> Rate {
    let t = input.trim();
    if t.is_empty() {
        return Rate::Indeterminate;
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => Rate::Percent(v.clamp(0.0, 100.0)),
        _ => Rate::Indeterminate,
    }
}

/// Revenue-per-conversion field. Currency punctuation is stripped before
/// parsing, so text like `$1,234.50` is accepted; blank or non-numeric is
/// indeterminate; negative clamps to 0.
pub fn parse_amount_field(input: &str) -> Amount {
    let numeric: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if numeric.is_empty() {
        return Amount::Indeterminate;
    }
    match numeric.parse::<f64>() {
        Ok(v) if v.is_finite() => Amount::Value(v.max(0.0)),
        _ => Amount::Indeterminate,
    }
}
