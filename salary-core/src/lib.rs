//! Core engine for the salary-setting editor.
//!
//! A salary setting is a seven-section configuration (basic pay components,
//! allowances, tax reliefs, tax brackets, statutory deductions, other
//! deductions, income line items). Each section is an ordered list of draft
//! records owned by the [`store::SectionStore`]; the [`serialize`] module
//! derives the canonical JSON form the payroll side consumes, and
//! [`validate`] checks the cross-record invariants that gate submission.
//!
//! The crate is deliberately free of I/O: hosts feed serialized text in,
//! mutate drafts, and read canonical text back out.

pub mod coerce;
pub mod draft;
pub mod models;
pub mod serialize;
pub mod store;
pub mod validate;

pub use draft::DraftRecord;
pub use models::*;
pub use store::{Entry, RecordId, SectionStore};
pub use validate::{SectionTotal, SubmitDecision, SubmitViolation};
