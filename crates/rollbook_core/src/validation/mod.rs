//! Candidate validation rules.
//!
//! # Responsibility
//! - Gate record creation with pure, storage-independent checks.
//! - Keep error presentation out of core; views render `ValidationReport`.

pub mod form;
