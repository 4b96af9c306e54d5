//! Domain model for the student roster.
//!
//! # Responsibility
//! - Define the persisted record shape and the candidate shape used by forms.
//!
//! # Invariants
//! - Every record is identified by a store-assigned `StudentId`.
//! - Deletion is a hard removal; ids are still never reissued.

pub mod student;
