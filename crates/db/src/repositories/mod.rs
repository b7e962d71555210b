//! Data-access repositories, one per table family.

pub mod benchmark_repo;
pub mod category_repo;
pub mod profile_repo;
pub mod readiness_repo;
pub mod roadmap_repo;
pub mod user_skill_repo;

pub use benchmark_repo::BenchmarkRepo;
pub use category_repo::CategoryRepo;
pub use profile_repo::ProfileRepo;
pub use readiness_repo::ReadinessRepo;
pub use roadmap_repo::RoadmapRepo;
pub use user_skill_repo::UserSkillRepo;
