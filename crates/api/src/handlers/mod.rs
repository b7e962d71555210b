//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the engine and the repositories in
//! `skillgauge_db` and map errors via [`crate::error::AppError`].

pub mod profile;
pub mod readiness;
pub mod roadmap;
pub mod skills;
