//! Row models and insert DTOs, one module per table family.

pub mod benchmark_skill;
pub mod profile;
pub mod readiness;
pub mod roadmap;
pub mod skill;
pub mod user_skill;
