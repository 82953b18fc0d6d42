//! Error types for `staffbook-core`.
//!
//! Every failure in this crate is a validation failure. A [`ValidationError`]
//! carries every violated constraint, never only the first.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::field::{Pattern, View};

/// Which numeric limit a decimal exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionLimit {
  DecimalPlaces,
  TotalDigits,
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Reason {
  RequiredFieldMissing,
  MaxLengthExceeded {
    max:    usize,
    actual: usize,
  },
  PatternMismatch {
    pattern: Pattern,
  },
  NumericPrecisionExceeded {
    limit: PrecisionLimit,
    max:   u32,
  },
  TypeMismatch {
    expected: &'static str,
  },
  /// A timestamp earlier than the one it must follow.
  OutOfOrder {
    not_before: &'static str,
  },
}

impl fmt::Display for Reason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::RequiredFieldMissing => f.write_str("field required"),
      Self::MaxLengthExceeded { max, actual } => {
        write!(f, "at most {max} characters allowed, got {actual}")
      }
      Self::PatternMismatch { pattern } => {
        write!(f, "does not match pattern {}", pattern.regex())
      }
      Self::NumericPrecisionExceeded { limit: PrecisionLimit::DecimalPlaces, max } => {
        write!(f, "at most {max} decimal places allowed")
      }
      Self::NumericPrecisionExceeded { limit: PrecisionLimit::TotalDigits, max } => {
        write!(f, "at most {max} digits allowed")
      }
      Self::TypeMismatch { expected } => write!(f, "expected {expected}"),
      Self::OutOfOrder { not_before } => write!(f, "must not precede {not_before}"),
    }
  }
}

/// A `(field, reason)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
  pub field:  &'static str,
  #[serde(flatten)]
  pub reason: Reason,
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.reason)
  }
}

/// One or more constraint violations found while validating a view.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid {view} input: {}", join(.violations))]
pub struct ValidationError {
  view:       View,
  violations: Vec<Violation>,
}

fn join(violations: &[Violation]) -> String {
  violations
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

impl ValidationError {
  pub(crate) fn single(view: View, field: &'static str, reason: Reason) -> Self {
    Self { view, violations: vec![Violation { field, reason }] }
  }

  /// Returns `None` when there is nothing to report.
  pub(crate) fn from_violations(
    view: View,
    violations: Vec<Violation>,
  ) -> Option<Self> {
    (!violations.is_empty()).then_some(Self { view, violations })
  }

  pub fn view(&self) -> View { self.view }

  pub fn violations(&self) -> &[Violation] { &self.violations }

  /// Names of the rejected fields, in table order, without duplicates.
  pub fn fields(&self) -> Vec<&'static str> {
    let mut fields: Vec<&'static str> = Vec::new();
    for v in &self.violations {
      if !fields.contains(&v.field) {
        fields.push(v.field);
      }
    }
    fields
  }

  /// All reasons reported against `field`.
  pub fn reasons_for<'a>(
    &'a self,
    field: &'a str,
  ) -> impl Iterator<Item = &'a Reason> + 'a {
    self
      .violations
      .iter()
      .filter(move |v| v.field == field)
      .map(|v| &v.reason)
  }
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
