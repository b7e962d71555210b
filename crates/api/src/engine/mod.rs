//! The readiness computation pipeline.
//!
//! Orchestrates guard evaluation, scoring, atomic persistence and roadmap
//! regeneration on top of the pure functions in `skillgauge_core`.

pub mod calculation;
pub mod locks;
pub mod roadmap;
