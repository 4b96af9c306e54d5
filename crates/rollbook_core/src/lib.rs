//! Core domain logic for the rollbook student roster.
//! This crate owns record storage, id assignment and form validation rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::student::{seed_students, Student, StudentDraft, StudentId};
pub use repo::slot_repo::{
    MemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use service::student_store::{LoadSource, StoreError, StudentStore};
pub use validation::form::{
    address_char_count, sanitize_phone_input, validate, FormField, ValidationReport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
