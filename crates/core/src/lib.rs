//! Pure domain logic for the role readiness platform.
//!
//! This crate contains no database dependencies. Scoring, guard decisions
//! and roadmap generation are pure functions over pre-loaded data passed
//! in by the caller (the `api` crate's calculation engine).

pub mod error;
pub mod guard;
pub mod roadmap;
pub mod scoring;
pub mod skill;
pub mod types;

pub use error::CoreError;
