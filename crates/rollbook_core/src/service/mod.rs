//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and slot persistence into store-level APIs.
//! - Keep views decoupled from storage details.

pub mod student_store;
