//! axum boundary for the Staffbook employee schema set.
//!
//! Provides validating extractors and an error response type. Routes, storage
//! and auth are the embedding service's responsibility; nothing here performs
//! I/O beyond reading the request.
//!
//! # Usage
//!
//! ```rust,ignore
//! use staffbook_api::{ApiError, ValidJson};
//! use staffbook_core::EmployeeDraft;
//!
//! async fn create(ValidJson(draft): ValidJson<EmployeeDraft>) -> Result<StatusCode, ApiError> {
//!   // draft already satisfies every field rule
//! }
//! ```
//!
//! Validation failures become `422 Unprocessable Entity`:
//!
//! ```json
//! {
//!   "error": "invalid create input: email: does not match pattern ...",
//!   "view": "create",
//!   "violations": [{ "field": "email", "reason": "pattern_mismatch", "pattern": "email" }]
//! }
//! ```

pub mod error;
pub mod extract;

pub use error::ApiError;
pub use extract::{JsonPayload, QueryPayload, ValidJson, ValidQuery};
