//! The generic validator.
//!
//! [`validate`] walks the `(FieldSpec, Presence)` projection of a [`View`],
//! pulls each raw value out of a [`FieldSource`], and applies the single
//! per-field rule [`check_value`]. Every violation is collected before the
//! result is returned.
//!
//! Rule order per field: presence, type, length, pattern, precision.

use std::{collections::BTreeMap, str::FromStr, sync::LazyLock};

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::{
  error::{PrecisionLimit, Reason, ValidationError, Violation},
  field::{FieldKind, FieldSpec, Precision, Presence, View},
};

// ─── Values ──────────────────────────────────────────────────────────────────

/// A typed field value, after type coercion and before any constraint check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  Text(String),
  Date(NaiveDate),
  Decimal(Decimal),
  Bool(bool),
  Integer(i64),
  Timestamp(DateTime<Utc>),
}

/// The outcome of asking a [`FieldSource`] for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
  Absent,
  Present(FieldValue),
  /// A value is present but cannot be read as the field's kind.
  Mismatch,
  /// A well-formed number with more digits than a [`Decimal`] can hold.
  Overflow,
}

impl From<Option<FieldValue>> for Lookup {
  fn from(value: Option<FieldValue>) -> Self {
    value.map_or(Self::Absent, Self::Present)
  }
}

/// Anything a view can be validated from.
pub trait FieldSource {
  fn lookup(&self, spec: &FieldSpec) -> Lookup;
}

// ─── JSON ────────────────────────────────────────────────────────────────────

impl FieldSource for Map<String, Value> {
  fn lookup(&self, spec: &FieldSpec) -> Lookup {
    match self.get(spec.name) {
      None | Some(Value::Null) => Lookup::Absent,
      Some(value) => json_value(&spec.kind, value),
    }
  }
}

fn json_value(kind: &FieldKind, value: &Value) -> Lookup {
  match (kind, value) {
    (FieldKind::Decimal { .. }, Value::String(s)) => parse_decimal(s),
    // serde_json prints the shortest representation that round-trips, so a
    // literal like `1234.567` comes back unchanged.
    (FieldKind::Decimal { .. }, Value::Number(n)) => {
      parse_decimal(&n.to_string())
    }
    (FieldKind::Text { .. }, Value::String(s)) => {
      Lookup::Present(FieldValue::Text(s.clone()))
    }
    (FieldKind::Date, Value::String(s)) => parse_date(s).into_lookup(),
    (FieldKind::Bool, Value::Bool(b)) => Lookup::Present(FieldValue::Bool(*b)),
    (FieldKind::Integer, Value::Number(n)) => {
      n.as_i64().map(FieldValue::Integer).into_lookup()
    }
    (FieldKind::Timestamp, Value::String(s)) => parse_timestamp(s).into_lookup(),
    _ => Lookup::Mismatch,
  }
}

trait IntoLookup {
  fn into_lookup(self) -> Lookup;
}

/// `None` means the raw value was present but unreadable.
impl IntoLookup for Option<FieldValue> {
  fn into_lookup(self) -> Lookup { self.map_or(Lookup::Mismatch, Lookup::Present) }
}

// ─── Query strings ───────────────────────────────────────────────────────────

/// Decoded `application/x-www-form-urlencoded` pairs. Every value is text and
/// is parsed according to the field's kind; the first occurrence of a key
/// wins.
#[derive(Debug, Clone, Default)]
pub struct QueryPairs(pub Vec<(String, String)>);

impl FieldSource for QueryPairs {
  fn lookup(&self, spec: &FieldSpec) -> Lookup {
    let Some((_, raw)) = self.0.iter().find(|(k, _)| k == spec.name) else {
      return Lookup::Absent;
    };
    match spec.kind {
      FieldKind::Text { .. } => Lookup::Present(FieldValue::Text(raw.clone())),
      FieldKind::Date => parse_date(raw).into_lookup(),
      FieldKind::Decimal { .. } => parse_decimal(raw),
      FieldKind::Bool => parse_bool(raw).into_lookup(),
      FieldKind::Integer => {
        raw.trim().parse().ok().map(FieldValue::Integer).into_lookup()
      }
      FieldKind::Timestamp => parse_timestamp(raw).into_lookup(),
    }
  }
}

// ─── Scalar parsing ──────────────────────────────────────────────────────────

fn parse_date(s: &str) -> Option<FieldValue> {
  NaiveDate::from_str(s).ok().map(FieldValue::Date)
}

fn parse_timestamp(s: &str) -> Option<FieldValue> {
  DateTime::parse_from_rfc3339(s)
    .ok()
    .map(|dt| FieldValue::Timestamp(dt.with_timezone(&Utc)))
}

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$")
    .expect("numeric literal pattern is a valid regex")
});

/// Largest digit count reported for decimals that carry no precision of
/// their own.
const DECIMAL_MAX_DIGITS: u32 = 28;

fn parse_decimal(s: &str) -> Lookup {
  let s = s.trim();
  match Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)) {
    Ok(d) => Lookup::Present(FieldValue::Decimal(d)),
    Err(_) if NUMERIC_RE.is_match(s) => Lookup::Overflow,
    Err(_) => Lookup::Mismatch,
  }
}

fn parse_bool(s: &str) -> Option<FieldValue> {
  match s.trim().to_ascii_lowercase().as_str() {
    "true" | "t" | "yes" | "y" | "on" | "1" => Some(FieldValue::Bool(true)),
    "false" | "f" | "no" | "n" | "off" | "0" => Some(FieldValue::Bool(false)),
    _ => None,
  }
}

// ─── Per-field rule ──────────────────────────────────────────────────────────

/// Count `(whole, fractional)` significant digits, ignoring trailing zeros
/// after the decimal point.
pub fn digit_counts(value: &Decimal) -> (u32, u32) {
  let normalized = value.normalize();
  let scale = normalized.scale();
  let mantissa = normalized.mantissa().unsigned_abs();
  let digits = if mantissa == 0 { 0 } else { mantissa.ilog10() + 1 };
  (digits.saturating_sub(scale), scale)
}

fn check_precision(
  spec: &FieldSpec,
  precision: Precision,
  value: &Decimal,
  out: &mut Vec<Violation>,
) {
  let (whole, fraction) = digit_counts(value);

  if fraction > precision.decimal_places {
    out.push(Violation {
      field:  spec.name,
      reason: Reason::NumericPrecisionExceeded {
        limit: PrecisionLimit::DecimalPlaces,
        max:   precision.decimal_places,
      },
    });
  }
  if whole + fraction > precision.max_digits
    || whole > precision.whole_digits()
  {
    out.push(Violation {
      field:  spec.name,
      reason: Reason::NumericPrecisionExceeded {
        limit: PrecisionLimit::TotalDigits,
        max:   precision.max_digits,
      },
    });
  }
}

/// Apply the constraints of `spec` to a value that already has the right
/// type. A value of the wrong type is reported as a type mismatch.
pub fn check_value(spec: &FieldSpec, value: &FieldValue, out: &mut Vec<Violation>) {
  match (&spec.kind, value) {
    (FieldKind::Text { max_len, pattern }, FieldValue::Text(s)) => {
      if let Some(max) = *max_len {
        let actual = s.chars().count();
        if actual > max {
          out.push(Violation {
            field:  spec.name,
            reason: Reason::MaxLengthExceeded { max, actual },
          });
        }
      }
      if let Some(pattern) = *pattern
        && !pattern.is_match(s)
      {
        out.push(Violation {
          field:  spec.name,
          reason: Reason::PatternMismatch { pattern },
        });
      }
    }
    (FieldKind::Decimal { precision }, FieldValue::Decimal(d)) => {
      if let Some(precision) = *precision {
        check_precision(spec, precision, d, out);
      }
    }
    (FieldKind::Date, FieldValue::Date(_))
    | (FieldKind::Bool, FieldValue::Bool(_))
    | (FieldKind::Integer, FieldValue::Integer(_))
    | (FieldKind::Timestamp, FieldValue::Timestamp(_)) => {}
    (kind, _) => out.push(Violation {
      field:  spec.name,
      reason: Reason::TypeMismatch { expected: kind.expected() },
    }),
  }
}

// ─── Validator ───────────────────────────────────────────────────────────────

/// The values that passed validation, keyed by field name.
#[derive(Debug, Default)]
pub struct ValidatedFields {
  values: BTreeMap<&'static str, FieldValue>,
}

impl ValidatedFields {
  pub fn len(&self) -> usize { self.values.len() }

  pub fn is_empty(&self) -> bool { self.values.is_empty() }

  pub fn take_text(&mut self, name: &str) -> Option<String> {
    match self.values.remove(name)? {
      FieldValue::Text(s) => Some(s),
      _ => None,
    }
  }

  pub fn take_date(&mut self, name: &str) -> Option<NaiveDate> {
    match self.values.remove(name)? {
      FieldValue::Date(d) => Some(d),
      _ => None,
    }
  }

  pub fn take_decimal(&mut self, name: &str) -> Option<Decimal> {
    match self.values.remove(name)? {
      FieldValue::Decimal(d) => Some(d),
      _ => None,
    }
  }

  pub fn take_bool(&mut self, name: &str) -> Option<bool> {
    match self.values.remove(name)? {
      FieldValue::Bool(b) => Some(b),
      _ => None,
    }
  }
}

/// Validate `source` against every field `view` declares.
///
/// Keys the view does not declare are ignored.
pub fn validate<S>(view: View, source: &S) -> Result<ValidatedFields, ValidationError>
where
  S: FieldSource + ?Sized,
{
  let mut violations = Vec::new();
  let mut fields = ValidatedFields::default();

  for (spec, presence) in view.fields() {
    match source.lookup(spec) {
      Lookup::Absent => {
        if presence == Presence::Required {
          violations.push(Violation {
            field:  spec.name,
            reason: Reason::RequiredFieldMissing,
          });
        }
      }
      Lookup::Mismatch => violations.push(Violation {
        field:  spec.name,
        reason: Reason::TypeMismatch { expected: spec.kind.expected() },
      }),
      Lookup::Overflow => violations.push(Violation {
        field:  spec.name,
        reason: Reason::NumericPrecisionExceeded {
          limit: PrecisionLimit::TotalDigits,
          max:   match spec.kind {
            FieldKind::Decimal { precision: Some(p) } => p.max_digits,
            _ => DECIMAL_MAX_DIGITS,
          },
        },
      }),
      Lookup::Present(value) => {
        let before = violations.len();
        check_value(spec, &value, &mut violations);
        if violations.len() == before {
          fields.values.insert(spec.name, value);
        }
      }
    }
  }

  match ValidationError::from_violations(view, violations) {
    Some(err) => Err(err),
    None => Ok(fields),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::{
    error::PrecisionLimit,
    field::{Pattern, employee_field},
  };

  fn spec(name: &str) -> &'static FieldSpec { employee_field(name).unwrap() }

  fn dec(s: &str) -> Decimal { Decimal::from_str(s).unwrap() }

  fn check(name: &str, value: FieldValue) -> Vec<Violation> {
    let mut out = Vec::new();
    check_value(spec(name), &value, &mut out);
    out
  }

  fn object(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
  }

  // ── digit counting ────────────────────────────────────────────────────────

  #[test]
  fn digit_counts_ignore_trailing_zeros() {
    assert_eq!(digit_counts(&dec("1234.50")), (4, 1));
    assert_eq!(digit_counts(&dec("1234.567")), (4, 3));
    assert_eq!(digit_counts(&dec("0.05")), (0, 2));
    assert_eq!(digit_counts(&dec("0")), (0, 0));
    assert_eq!(digit_counts(&dec("-100")), (3, 0));
  }

  // ── per-field rule ────────────────────────────────────────────────────────

  #[test]
  fn text_at_bound_passes() {
    assert!(check("employee_id", FieldValue::Text("x".repeat(50))).is_empty());
  }

  #[test]
  fn text_over_bound_fails() {
    let out = check("employee_id", FieldValue::Text("x".repeat(51)));
    assert_eq!(out, [Violation {
      field:  "employee_id",
      reason: Reason::MaxLengthExceeded { max: 50, actual: 51 },
    }]);
  }

  #[test]
  fn length_counts_characters_not_bytes() {
    // 20 two-byte characters
    assert!(check("phone_number", FieldValue::Text("é".repeat(20))).is_empty());
  }

  #[test]
  fn email_reports_length_and_pattern_together() {
    let long = format!("{}@@example.com", "a".repeat(260));
    let out = check("email", FieldValue::Text(long));
    assert_eq!(out.len(), 2);
    assert!(matches!(out[0].reason, Reason::MaxLengthExceeded { max: 255, .. }));
    assert_eq!(out[1].reason, Reason::PatternMismatch {
      pattern: Pattern::Email,
    });
  }

  #[test]
  fn salary_with_three_places_fails() {
    let out = check("salary", FieldValue::Decimal(dec("1234.567")));
    assert_eq!(out, [Violation {
      field:  "salary",
      reason: Reason::NumericPrecisionExceeded {
        limit: PrecisionLimit::DecimalPlaces,
        max:   2,
      },
    }]);
  }

  #[test]
  fn salary_with_thirteen_whole_digits_fails() {
    let out = check("salary", FieldValue::Decimal(dec("1234567890123")));
    assert_eq!(out, [Violation {
      field:  "salary",
      reason: Reason::NumericPrecisionExceeded {
        limit: PrecisionLimit::TotalDigits,
        max:   12,
      },
    }]);
  }

  #[test]
  fn salary_with_eleven_whole_digits_fails() {
    // Twelve digits in total, but only ten fit before the point.
    let out = check("salary", FieldValue::Decimal(dec("12345678901.5")));
    assert_eq!(out.len(), 1);
    assert!(matches!(out[0].reason, Reason::NumericPrecisionExceeded {
      limit: PrecisionLimit::TotalDigits,
      ..
    }));
  }

  #[test]
  fn salary_at_bounds_passes() {
    assert!(check("salary", FieldValue::Decimal(dec("9999999999.99"))).is_empty());
    assert!(check("salary", FieldValue::Decimal(dec("1.500"))).is_empty());
  }

  #[test]
  fn wrong_value_type_is_a_mismatch() {
    let out = check("join_date", FieldValue::Bool(true));
    assert_eq!(out[0].reason, Reason::TypeMismatch { expected: "date" });
  }

  // ── JSON source ───────────────────────────────────────────────────────────

  #[test]
  fn json_null_counts_as_absent() {
    let src = object(json!({ "salary": null }));
    assert_eq!(src.lookup(spec("salary")), Lookup::Absent);
  }

  #[test]
  fn json_decimal_from_number_and_string() {
    let src = object(json!({ "salary": 1234.56 }));
    assert_eq!(
      src.lookup(spec("salary")),
      Lookup::Present(FieldValue::Decimal(dec("1234.56")))
    );
    let src = object(json!({ "salary": "1234.560" }));
    assert_eq!(
      src.lookup(spec("salary")),
      Lookup::Present(FieldValue::Decimal(dec("1234.560")))
    );
  }

  #[test]
  fn json_type_mismatches() {
    let src = object(json!({
      "full_name": 42,
      "join_date": "yesterday",
      "salary": "lots",
      "is_active": "true",
    }));
    for name in ["full_name", "join_date", "salary", "is_active"] {
      assert_eq!(src.lookup(spec(name)), Lookup::Mismatch, "{name}");
    }
  }

  #[test]
  fn json_decimal_beyond_range_overflows() {
    let src = object(json!({ "salary": format!("1{}", "0".repeat(30)) }));
    assert_eq!(src.lookup(spec("salary")), Lookup::Overflow);
    let src = object(json!({ "salary": 1e30 }));
    assert_eq!(src.lookup(spec("salary")), Lookup::Overflow);
    let src = object(json!({ "salary": "1e30e" }));
    assert_eq!(src.lookup(spec("salary")), Lookup::Mismatch);
  }

  #[test]
  fn json_timestamp_is_normalized_to_utc() {
    let src = object(json!({ "created_at": "2024-03-01T10:00:00+02:00" }));
    let Lookup::Present(FieldValue::Timestamp(ts)) = src.lookup(spec("created_at"))
    else {
      panic!("expected timestamp")
    };
    assert_eq!(ts.to_rfc3339(), "2024-03-01T08:00:00+00:00");
  }

  // ── query source ──────────────────────────────────────────────────────────

  #[test]
  fn query_values_are_parsed_per_kind() {
    let src = QueryPairs(vec![
      ("is_active".into(), "false".into()),
      ("salary".into(), "100.5".into()),
      ("is_active".into(), "true".into()),
    ]);
    assert_eq!(
      src.lookup(spec("is_active")),
      Lookup::Present(FieldValue::Bool(false))
    );
    assert_eq!(
      src.lookup(spec("salary")),
      Lookup::Present(FieldValue::Decimal(dec("100.5")))
    );
    assert_eq!(src.lookup(spec("full_name")), Lookup::Absent);
  }

  #[test]
  fn query_bool_rejects_garbage() {
    let src = QueryPairs(vec![("is_active".into(), "maybe".into())]);
    assert_eq!(src.lookup(spec("is_active")), Lookup::Mismatch);
  }

  // ── validator ─────────────────────────────────────────────────────────────

  #[test]
  fn validate_collects_every_violation() {
    let src = object(json!({
      "employee_id": "E".repeat(51),
      "email": "not-an-email",
      "salary": "1234.567",
      "join_date": 20240101,
    }));
    let err = validate(View::Create, &src).unwrap_err();
    assert_eq!(err.fields(), [
      "employee_id",
      "full_name",
      "department",
      "position",
      "email",
      "phone_number",
      "join_date",
      "salary",
    ]);
    assert_eq!(
      err.reasons_for("full_name").collect::<Vec<_>>(),
      [&Reason::RequiredFieldMissing]
    );
    assert_eq!(
      err.reasons_for("join_date").collect::<Vec<_>>(),
      [&Reason::TypeMismatch { expected: "date" }]
    );
  }

  #[test]
  fn validate_reports_overflow_against_the_field_precision() {
    let huge = "9".repeat(31);
    let src = object(json!({ "salary": huge.clone() }));
    let err = validate(View::Update, &src).unwrap_err();
    assert_eq!(err.violations(), [Violation {
      field:  "salary",
      reason: Reason::NumericPrecisionExceeded {
        limit: PrecisionLimit::TotalDigits,
        max:   12,
      },
    }]);

    let src = QueryPairs(vec![("max_salary".into(), huge)]);
    let err = validate(View::Search, &src).unwrap_err();
    assert_eq!(err.reasons_for("max_salary").collect::<Vec<_>>(), [
      &Reason::NumericPrecisionExceeded {
        limit: PrecisionLimit::TotalDigits,
        max:   DECIMAL_MAX_DIGITS,
      }
    ]);
  }

  #[test]
  fn validate_optional_view_accepts_empty_input() {
    let fields = validate(View::Update, &Map::new()).unwrap();
    assert!(fields.is_empty());
  }

  #[test]
  fn validate_ignores_unknown_keys() {
    let src = object(json!({ "nickname": "JD", "is_active": false }));
    let mut fields = validate(View::Update, &src).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields.take_bool("is_active"), Some(false));
  }
}
