//! The persistent Employee record and the validated inputs that build and
//! mutate it.
//!
//! An [`Employee`] can only be produced from an [`EmployeeDraft`] (or by
//! re-validating a stored response) and only changed through
//! [`EmployeeChanges`], so `id`, `employee_id` and `created_at` never move
//! after creation and `updated_at` is refreshed on every real mutation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::field::SALARY_PRECISION;

/// Rescale a validated salary so it always carries exactly two places.
pub(crate) fn normalize_salary(mut salary: Decimal) -> Decimal {
  salary.rescale(SALARY_PRECISION.decimal_places);
  salary
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// A create-view payload that passed validation, ready to be stored.
///
/// The storage layer owns `id` assignment and the `employee_id` uniqueness
/// check; it turns a draft into a record with [`EmployeeDraft::into_employee`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct EmployeeDraft {
  pub employee_id:  String,
  pub full_name:    String,
  pub department:   String,
  pub position:     String,
  pub email:        String,
  pub phone_number: String,
  pub join_date:    NaiveDate,
  /// Always exactly two fractional digits.
  pub salary:       Decimal,
}

impl EmployeeDraft {
  /// Materialise the stored record. New employees start active and have
  /// never been updated.
  pub fn into_employee(self, id: i64, created_at: DateTime<Utc>) -> Employee {
    Employee {
      id,
      employee_id: self.employee_id,
      full_name: self.full_name,
      department: self.department,
      position: self.position,
      email: self.email,
      phone_number: self.phone_number,
      join_date: self.join_date,
      salary: self.salary,
      is_active: true,
      created_at,
      updated_at: None,
    }
  }
}

// ─── Changes ─────────────────────────────────────────────────────────────────

/// An update-view payload that passed validation. `None` leaves the field
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct EmployeeChanges {
  pub full_name:    Option<String>,
  pub department:   Option<String>,
  pub position:     Option<String>,
  pub email:        Option<String>,
  pub phone_number: Option<String>,
  pub join_date:    Option<NaiveDate>,
  pub salary:       Option<Decimal>,
  pub is_active:    Option<bool>,
}

impl EmployeeChanges {
  pub fn is_empty(&self) -> bool { self.fields().is_empty() }

  /// Names of the fields this change set touches.
  pub fn fields(&self) -> Vec<&'static str> {
    let mut out = Vec::new();
    if self.full_name.is_some() {
      out.push("full_name");
    }
    if self.department.is_some() {
      out.push("department");
    }
    if self.position.is_some() {
      out.push("position");
    }
    if self.email.is_some() {
      out.push("email");
    }
    if self.phone_number.is_some() {
      out.push("phone_number");
    }
    if self.join_date.is_some() {
      out.push("join_date");
    }
    if self.salary.is_some() {
      out.push("salary");
    }
    if self.is_active.is_some() {
      out.push("is_active");
    }
    out
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// The stored employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
  id:           i64,
  employee_id:  String,
  full_name:    String,
  department:   String,
  position:     String,
  email:        String,
  phone_number: String,
  join_date:    NaiveDate,
  salary:       Decimal,
  is_active:    bool,
  created_at:   DateTime<Utc>,
  updated_at:   Option<DateTime<Utc>>,
}

impl Employee {
  /// Assemble a record whose fields were already validated together.
  pub(crate) fn from_parts(
    id: i64,
    draft: EmployeeDraft,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
  ) -> Self {
    let mut employee = draft.into_employee(id, created_at);
    employee.is_active = is_active;
    employee.updated_at = updated_at;
    employee
  }

  pub fn id(&self) -> i64 { self.id }

  pub fn employee_id(&self) -> &str { &self.employee_id }

  pub fn full_name(&self) -> &str { &self.full_name }

  pub fn department(&self) -> &str { &self.department }

  pub fn position(&self) -> &str { &self.position }

  pub fn email(&self) -> &str { &self.email }

  pub fn phone_number(&self) -> &str { &self.phone_number }

  pub fn join_date(&self) -> NaiveDate { self.join_date }

  pub fn salary(&self) -> Decimal { self.salary }

  pub fn is_active(&self) -> bool { self.is_active }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  pub fn updated_at(&self) -> Option<DateTime<Utc>> { self.updated_at }

  /// Apply a validated change set.
  ///
  /// Returns `false` and leaves the record untouched, `updated_at` included,
  /// when `changes` is empty. Otherwise `updated_at` becomes `now`, clamped so
  /// it never precedes `created_at`.
  pub fn apply(&mut self, changes: EmployeeChanges, now: DateTime<Utc>) -> bool {
    if changes.is_empty() {
      return false;
    }

    let EmployeeChanges {
      full_name,
      department,
      position,
      email,
      phone_number,
      join_date,
      salary,
      is_active,
    } = changes;

    if let Some(v) = full_name {
      self.full_name = v;
    }
    if let Some(v) = department {
      self.department = v;
    }
    if let Some(v) = position {
      self.position = v;
    }
    if let Some(v) = email {
      self.email = v;
    }
    if let Some(v) = phone_number {
      self.phone_number = v;
    }
    if let Some(v) = join_date {
      self.join_date = v;
    }
    if let Some(v) = salary {
      self.salary = v;
    }
    if let Some(v) = is_active {
      self.is_active = v;
    }

    self.updated_at = Some(now.max(self.created_at));
    true
  }
}
