//! The four boundary views over the Employee field set.
//!
//! Each view is a projection of [`crate::field::EMPLOYEE_FIELDS`]; the structs
//! here only carry data. Validation always goes through
//! [`crate::validate::validate`] with the matching [`View`], whether the input
//! arrives as a typed struct, a JSON object or a query string.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
  Result,
  employee::{Employee, EmployeeChanges, EmployeeDraft, normalize_salary},
  error::{Reason, ValidationError},
  field::{FieldSpec, View},
  validate::{FieldSource, FieldValue, Lookup, QueryPairs, ValidatedFields, validate},
};

fn text(s: &str) -> Option<FieldValue> { Some(FieldValue::Text(s.to_owned())) }

fn opt_text(s: Option<&str>) -> Option<FieldValue> { s.and_then(text) }

fn required<T>(view: View, field: &'static str, value: Option<T>) -> Result<T> {
  value.ok_or_else(|| {
    ValidationError::single(view, field, Reason::RequiredFieldMissing)
  })
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// Payload for creating an employee. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCreate {
  pub employee_id:  String,
  pub full_name:    String,
  pub department:   String,
  pub position:     String,
  pub email:        String,
  pub phone_number: String,
  pub join_date:    NaiveDate,
  pub salary:       Decimal,
}

impl FieldSource for EmployeeCreate {
  fn lookup(&self, spec: &FieldSpec) -> Lookup {
    match spec.name {
      "employee_id" => text(&self.employee_id),
      "full_name" => text(&self.full_name),
      "department" => text(&self.department),
      "position" => text(&self.position),
      "email" => text(&self.email),
      "phone_number" => text(&self.phone_number),
      "join_date" => Some(FieldValue::Date(self.join_date)),
      "salary" => Some(FieldValue::Decimal(self.salary)),
      _ => None,
    }
    .into()
  }
}

impl EmployeeCreate {
  /// Validate-for-create.
  pub fn validate(self) -> Result<EmployeeDraft> {
    validate(View::Create, &self)?;
    Ok(self.into_draft())
  }

  /// Validate-for-create from a decoded JSON object.
  pub fn from_json(object: &Map<String, Value>) -> Result<EmployeeDraft> {
    let mut f = validate(View::Create, object)?;
    let req = |name, value| required(View::Create, name, value);

    let create = Self {
      employee_id:  req("employee_id", f.take_text("employee_id"))?,
      full_name:    req("full_name", f.take_text("full_name"))?,
      department:   req("department", f.take_text("department"))?,
      position:     req("position", f.take_text("position"))?,
      email:        req("email", f.take_text("email"))?,
      phone_number: req("phone_number", f.take_text("phone_number"))?,
      join_date:    required(View::Create, "join_date", f.take_date("join_date"))?,
      salary:       required(View::Create, "salary", f.take_decimal("salary"))?,
    };
    Ok(create.into_draft())
  }

  fn into_draft(self) -> EmployeeDraft {
    EmployeeDraft {
      employee_id:  self.employee_id,
      full_name:    self.full_name,
      department:   self.department,
      position:     self.position,
      email:        self.email,
      phone_number: self.phone_number,
      join_date:    self.join_date,
      salary:       normalize_salary(self.salary),
    }
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Payload for updating an employee. Absent (or `null`) fields are left
/// unchanged. `employee_id` cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeUpdate {
  pub full_name:    Option<String>,
  pub department:   Option<String>,
  pub position:     Option<String>,
  pub email:        Option<String>,
  pub phone_number: Option<String>,
  pub join_date:    Option<NaiveDate>,
  pub salary:       Option<Decimal>,
  pub is_active:    Option<bool>,
}

impl FieldSource for EmployeeUpdate {
  fn lookup(&self, spec: &FieldSpec) -> Lookup {
    match spec.name {
      "full_name" => opt_text(self.full_name.as_deref()),
      "department" => opt_text(self.department.as_deref()),
      "position" => opt_text(self.position.as_deref()),
      "email" => opt_text(self.email.as_deref()),
      "phone_number" => opt_text(self.phone_number.as_deref()),
      "join_date" => self.join_date.map(FieldValue::Date),
      "salary" => self.salary.map(FieldValue::Decimal),
      "is_active" => self.is_active.map(FieldValue::Bool),
      _ => None,
    }
    .into()
  }
}

impl EmployeeUpdate {
  /// Validate-for-update. An update with no fields set is valid and yields an
  /// empty [`EmployeeChanges`].
  pub fn validate(self) -> Result<EmployeeChanges> {
    validate(View::Update, &self)?;
    Ok(self.into_changes())
  }

  /// Validate-for-update from a decoded JSON object.
  pub fn from_json(object: &Map<String, Value>) -> Result<EmployeeChanges> {
    let mut f = validate(View::Update, object)?;
    let update = Self {
      full_name:    f.take_text("full_name"),
      department:   f.take_text("department"),
      position:     f.take_text("position"),
      email:        f.take_text("email"),
      phone_number: f.take_text("phone_number"),
      join_date:    f.take_date("join_date"),
      salary:       f.take_decimal("salary"),
      is_active:    f.take_bool("is_active"),
    };
    Ok(update.into_changes())
  }

  fn into_changes(self) -> EmployeeChanges {
    EmployeeChanges {
      full_name:    self.full_name,
      department:   self.department,
      position:     self.position,
      email:        self.email,
      phone_number: self.phone_number,
      join_date:    self.join_date,
      salary:       self.salary.map(normalize_salary),
      is_active:    self.is_active,
    }
  }
}

// ─── Response ────────────────────────────────────────────────────────────────

/// Outgoing representation of a stored employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResponse {
  pub id:           i64,
  pub employee_id:  String,
  pub full_name:    String,
  pub department:   String,
  pub position:     String,
  pub email:        String,
  pub phone_number: String,
  pub join_date:    NaiveDate,
  pub salary:       Decimal,
  pub is_active:    bool,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   Option<DateTime<Utc>>,
}

impl From<Employee> for EmployeeResponse {
  fn from(e: Employee) -> Self {
    Self {
      id:           e.id(),
      employee_id:  e.employee_id().to_owned(),
      full_name:    e.full_name().to_owned(),
      department:   e.department().to_owned(),
      position:     e.position().to_owned(),
      email:        e.email().to_owned(),
      phone_number: e.phone_number().to_owned(),
      join_date:    e.join_date(),
      salary:       e.salary(),
      is_active:    e.is_active(),
      created_at:   e.created_at(),
      updated_at:   e.updated_at(),
    }
  }
}

impl FieldSource for EmployeeResponse {
  fn lookup(&self, spec: &FieldSpec) -> Lookup {
    match spec.name {
      "id" => Some(FieldValue::Integer(self.id)),
      "employee_id" => text(&self.employee_id),
      "full_name" => text(&self.full_name),
      "department" => text(&self.department),
      "position" => text(&self.position),
      "email" => text(&self.email),
      "phone_number" => text(&self.phone_number),
      "join_date" => Some(FieldValue::Date(self.join_date)),
      "salary" => Some(FieldValue::Decimal(self.salary)),
      "is_active" => Some(FieldValue::Bool(self.is_active)),
      "created_at" => Some(FieldValue::Timestamp(self.created_at)),
      "updated_at" => self.updated_at.map(FieldValue::Timestamp),
      _ => None,
    }
    .into()
  }
}

/// Rehydrate a record from its response form, re-checking every field
/// constraint on the way in. `updated_at` may not precede `created_at`.
impl TryFrom<EmployeeResponse> for Employee {
  type Error = ValidationError;

  fn try_from(r: EmployeeResponse) -> Result<Self> {
    validate(View::Response, &r)?;
    if r.updated_at.is_some_and(|updated| updated < r.created_at) {
      return Err(ValidationError::single(
        View::Response,
        "updated_at",
        Reason::OutOfOrder { not_before: "created_at" },
      ));
    }
    let draft = EmployeeDraft {
      employee_id:  r.employee_id,
      full_name:    r.full_name,
      department:   r.department,
      position:     r.position,
      email:        r.email,
      phone_number: r.phone_number,
      join_date:    r.join_date,
      salary:       normalize_salary(r.salary),
    };
    Ok(Employee::from_parts(r.id, draft, r.is_active, r.created_at, r.updated_at))
  }
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// Search filters. Every field is optional and there is no cross-field check:
/// `min_salary > max_salary` is accepted and left to the query executor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeSearch {
  /// Partial (substring) match on `full_name`.
  pub name:       Option<String>,
  pub department: Option<String>,
  pub position:   Option<String>,
  pub is_active:  Option<bool>,
  pub min_salary: Option<Decimal>,
  pub max_salary: Option<Decimal>,
}

impl EmployeeSearch {
  /// Validate-for-search from a decoded JSON object.
  pub fn from_json(object: &Map<String, Value>) -> Result<Self> {
    Ok(Self::from_fields(validate(View::Search, object)?))
  }

  /// Validate-for-search from decoded query-string pairs.
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self> {
    Ok(Self::from_fields(validate(View::Search, &QueryPairs(pairs))?))
  }

  fn from_fields(mut f: ValidatedFields) -> Self {
    Self {
      name:       f.take_text("name"),
      department: f.take_text("department"),
      position:   f.take_text("position"),
      is_active:  f.take_bool("is_active"),
      min_salary: f.take_decimal("min_salary"),
      max_salary: f.take_decimal("max_salary"),
    }
  }

  /// True when no filter is set.
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}
