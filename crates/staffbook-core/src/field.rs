//! The canonical Employee field-constraint table.
//!
//! Every constraint lives here exactly once. The four boundary views are
//! projections of [`EMPLOYEE_FIELDS`] (or [`SEARCH_FIELDS`] for the search
//! filter), produced by [`View::fields`].

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

// ─── Patterns ────────────────────────────────────────────────────────────────

/// Wire-contract email shape: `local@domain.tld`.
pub const EMAIL_PATTERN: &str =
  r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex")
});

/// A named format a text field must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
  Email,
}

impl Pattern {
  pub fn regex(self) -> &'static str {
    match self {
      Self::Email => EMAIL_PATTERN,
    }
  }

  pub fn is_match(self, value: &str) -> bool {
    match self {
      Self::Email => EMAIL_RE.is_match(value),
    }
  }
}

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// Fixed-point limits, in the SQL `NUMERIC(max_digits, decimal_places)` sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
  pub max_digits:     u32,
  pub decimal_places: u32,
}

impl Precision {
  /// Digits allowed before the decimal point.
  pub fn whole_digits(self) -> u32 { self.max_digits - self.decimal_places }
}

/// The semantic type of a field together with its value constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text {
    /// Upper bound in characters, not bytes.
    max_len: Option<usize>,
    pattern: Option<Pattern>,
  },
  /// Calendar date, `YYYY-MM-DD` on the wire.
  Date,
  Decimal {
    precision: Option<Precision>,
  },
  Bool,
  Integer,
  /// UTC instant, RFC 3339 on the wire.
  Timestamp,
}

impl FieldKind {
  const fn text(max_len: usize) -> Self {
    Self::Text { max_len: Some(max_len), pattern: None }
  }

  /// Short name used in type-mismatch reports.
  pub fn expected(&self) -> &'static str {
    match self {
      Self::Text { .. } => "string",
      Self::Date => "date",
      Self::Decimal { .. } => "decimal",
      Self::Bool => "boolean",
      Self::Integer => "integer",
      Self::Timestamp => "timestamp",
    }
  }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// One row of a constraint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  pub name:        &'static str,
  pub kind:        FieldKind,
  /// Human-readable summary for generated schema and API docs.
  pub description: &'static str,
  /// Supplied by the caller in the create view.
  pub on_create:   bool,
  /// May be changed through the update view.
  pub mutable:     bool,
  /// May be absent on a stored record.
  pub nullable:    bool,
}

impl FieldSpec {
  const fn new(
    name: &'static str,
    kind: FieldKind,
    description: &'static str,
  ) -> Self {
    Self {
      name,
      kind,
      description,
      on_create: false,
      mutable: false,
      nullable: false,
    }
  }

  const fn on_create(mut self) -> Self {
    self.on_create = true;
    self
  }

  const fn mutable(mut self) -> Self {
    self.mutable = true;
    self
  }

  const fn nullable(mut self) -> Self {
    self.nullable = true;
    self
  }
}

pub const SALARY_PRECISION: Precision =
  Precision { max_digits: 12, decimal_places: 2 };

/// The persistent Employee record, in wire order.
pub const EMPLOYEE_FIELDS: &[FieldSpec] = &[
  FieldSpec::new("id", FieldKind::Integer, "Storage-assigned record identifier"),
  FieldSpec::new("employee_id", FieldKind::text(50), "Unique employee identifier")
    .on_create(),
  FieldSpec::new("full_name", FieldKind::text(255), "Employee's full name")
    .on_create()
    .mutable(),
  FieldSpec::new("department", FieldKind::text(100), "Employee's department")
    .on_create()
    .mutable(),
  FieldSpec::new("position", FieldKind::text(100), "Employee's job position")
    .on_create()
    .mutable(),
  FieldSpec::new(
    "email",
    FieldKind::Text { max_len: Some(255), pattern: Some(Pattern::Email) },
    "Employee's email address",
  )
  .on_create()
  .mutable(),
  FieldSpec::new("phone_number", FieldKind::text(20), "Employee's phone number")
    .on_create()
    .mutable(),
  FieldSpec::new(
    "join_date",
    FieldKind::Date,
    "Date when employee joined the company",
  )
  .on_create()
  .mutable(),
  FieldSpec::new(
    "salary",
    FieldKind::Decimal { precision: Some(SALARY_PRECISION) },
    "Employee's salary",
  )
  .on_create()
  .mutable(),
  FieldSpec::new(
    "is_active",
    FieldKind::Bool,
    "Whether employee is currently active",
  )
  .mutable(),
  FieldSpec::new("created_at", FieldKind::Timestamp, "Record creation timestamp"),
  FieldSpec::new(
    "updated_at",
    FieldKind::Timestamp,
    "Record last update timestamp",
  )
  .nullable(),
];

const UNBOUNDED_TEXT: FieldKind = FieldKind::Text { max_len: None, pattern: None };

/// Search filters. Bounds are deliberately unconstrained: a filter value never
/// reaches storage.
pub const SEARCH_FIELDS: &[FieldSpec] = &[
  FieldSpec::new("name", UNBOUNDED_TEXT, "Search by name (partial match)"),
  FieldSpec::new("department", UNBOUNDED_TEXT, "Filter by department"),
  FieldSpec::new("position", UNBOUNDED_TEXT, "Filter by position"),
  FieldSpec::new("is_active", FieldKind::Bool, "Filter by active status"),
  FieldSpec::new(
    "min_salary",
    FieldKind::Decimal { precision: None },
    "Minimum salary filter",
  ),
  FieldSpec::new(
    "max_salary",
    FieldKind::Decimal { precision: None },
    "Maximum salary filter",
  ),
];

/// Look up a row of the Employee table by name.
pub fn employee_field(name: &str) -> Option<&'static FieldSpec> {
  EMPLOYEE_FIELDS.iter().find(|f| f.name == name)
}

// ─── Views ───────────────────────────────────────────────────────────────────

/// Whether a view demands a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
  Required,
  Optional,
}

/// A boundary at which Employee data is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
  Create,
  Update,
  Response,
  Search,
}

impl View {
  /// Project the constraint tables onto this view.
  pub fn fields(self) -> Vec<(&'static FieldSpec, Presence)> {
    match self {
      Self::Create => EMPLOYEE_FIELDS
        .iter()
        .filter(|f| f.on_create)
        .map(|f| (f, Presence::Required))
        .collect(),
      Self::Update => EMPLOYEE_FIELDS
        .iter()
        .filter(|f| f.mutable)
        .map(|f| (f, Presence::Optional))
        .collect(),
      Self::Response => EMPLOYEE_FIELDS
        .iter()
        .map(|f| {
          let presence =
            if f.nullable { Presence::Optional } else { Presence::Required };
          (f, presence)
        })
        .collect(),
      Self::Search => {
        SEARCH_FIELDS.iter().map(|f| (f, Presence::Optional)).collect()
      }
    }
  }
}

impl fmt::Display for View {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Create => "create",
      Self::Update => "update",
      Self::Response => "response",
      Self::Search => "search",
    })
  }
}
