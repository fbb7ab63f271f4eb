//! Input normalization: raw, possibly blank form values to safe numbers.
//!
//! A `FieldValue` is what the presentation layer hands over: either a number
//! or `Unset` (a cleared input box). Computation never sees `Unset`; it asks
//! for `value()` (0 when unset) or `rate_denominator()` (1 when unset or
//! zero). Nothing in this module returns an error.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Unset,
    Value(f64),
}

impl FieldValue {
    /// Parse raw text the way a numeric input box reports it.
    /// Blank or unparseable text is kept as `Unset`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Unset;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Self::Value(v),
            Err(_) => Self::Unset,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// The raw number if one was entered, for display.
    pub fn raw(&self) -> Option<f64> {
        match self {
            Self::Unset => None,
            Self::Value(v) => Some(*v),
        }
    }

    /// Normalized value: unset or non-finite becomes 0.
    pub fn value(&self) -> f64 {
        normalize(self.raw())
    }

    /// Normalized value for a divisor or multiplicative factor:
    /// unset, non-finite and zero all become 1.
    pub fn rate_denominator(&self) -> f64 {
        normalize_rate_denominator(self.raw())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Self::Unset, Self::Value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str(""),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

/// Coerce an optional raw number to a finite value, 0 when absent.
pub fn normalize(raw: Option<f64>) -> f64 {
    match raw {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Coerce an optional raw number used as a divisor, 1 when absent or zero.
pub fn normalize_rate_denominator(raw: Option<f64>) -> f64 {
    let v = normalize(raw);
    if v == 0.0 { 1.0 } else { v }
}

/// Guarded ratio: `numerator / denominator`, 0 when the denominator is 0
/// or the result would not be finite.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let q = numerator / denominator;
    if q.is_finite() { q } else { 0.0 }
}

/// Guarded percentage: `part / whole * 100`, 0 when `whole` is 0.
pub fn safe_pct(part: f64, whole: f64) -> f64 {
    safe_div(part, whole) * 100.0
}

/// Round to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ── Serde ─────────────────────────────────────────────────────────────

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_none(),
            Self::Value(v) => serializer.serialize_f64(*v),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawField>::deserialize(deserializer)?;
        Ok(match raw {
            None => Self::Unset,
            Some(RawField::Number(v)) => Self::Value(v),
            Some(RawField::Text(s)) => Self::parse(&s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_normalizes_to_zero() {
        assert_eq!(FieldValue::Unset.value(), 0.0);
        assert_eq!(FieldValue::parse("").value(), 0.0);
        assert_eq!(FieldValue::parse("   ").value(), 0.0);
    }

    #[test]
    fn non_numeric_text_is_unset() {
        let v = FieldValue::parse("abc");
        assert!(v.is_unset());
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn numeric_text_parses() {
        assert_eq!(FieldValue::parse(" 12.5 "), FieldValue::Value(12.5));
    }

    #[test]
    fn rate_denominator_never_zero() {
        assert_eq!(FieldValue::Unset.rate_denominator(), 1.0);
        assert_eq!(FieldValue::Value(0.0).rate_denominator(), 1.0);
        assert_eq!(FieldValue::Value(f64::NAN).rate_denominator(), 1.0);
        assert_eq!(FieldValue::Value(3.5).rate_denominator(), 3.5);
    }

    #[test]
    fn non_finite_values_become_zero() {
        assert_eq!(FieldValue::Value(f64::INFINITY).value(), 0.0);
        assert_eq!(FieldValue::Value(f64::NAN).value(), 0.0);
    }

    #[test]
    fn safe_div_guards_zero_denominator() {
        assert_eq!(safe_div(10.0, 0.0), 0.0);
        assert_eq!(safe_pct(25.0, 0.0), 0.0);
        assert_eq!(safe_pct(25.0, 100.0), 25.0);
    }

    #[test]
    fn deserializes_numbers_strings_and_null() {
        let vals: Vec<FieldValue> =
            serde_json::from_str(r#"[1.5, 7, "42", "", null, "x"]"#).unwrap();
        assert_eq!(
            vals,
            vec![
                FieldValue::Value(1.5),
                FieldValue::Value(7.0),
                FieldValue::Value(42.0),
                FieldValue::Unset,
                FieldValue::Unset,
                FieldValue::Unset,
            ]
        );
    }

    #[test]
    fn unset_serializes_as_null() {
        let json = serde_json::to_string(&vec![FieldValue::Unset, FieldValue::Value(2.0)]).unwrap();
        assert_eq!(json, "[null,2.0]");
    }
}
