//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistent key-value slot contract used by the store.
//! - Isolate SQLite query details from service orchestration.

pub mod slot_repo;
