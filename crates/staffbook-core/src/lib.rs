//! Employee schema set for the Staffbook employee-management service.
//!
//! One persistent record ([`Employee`]) and four boundary views derived from
//! a single field-constraint table ([`field::EMPLOYEE_FIELDS`]):
//!
//! | View | Type | Validated into |
//! |------|------|----------------|
//! | create   | [`EmployeeCreate`]   | [`EmployeeDraft`] |
//! | update   | [`EmployeeUpdate`]   | [`EmployeeChanges`] |
//! | response | [`EmployeeResponse`] | [`Employee`] |
//! | search   | [`EmployeeSearch`]   | itself |
//!
//! This crate performs no I/O. Identity assignment, `employee_id` uniqueness
//! and clocks belong to the caller; timestamps are always passed in.

pub mod employee;
pub mod error;
pub mod field;
pub mod validate;
pub mod view;

pub use employee::{Employee, EmployeeChanges, EmployeeDraft};
pub use error::{Reason, Result, ValidationError, Violation};
pub use view::{EmployeeCreate, EmployeeResponse, EmployeeSearch, EmployeeUpdate};
