use std::sync::Arc;

use skillgauge_events::NotificationTriggers;

use crate::config::ServerConfig;
use crate::engine::locks::CalculationLocks;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: skillgauge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Fire-and-forget notification triggers over the event bus.
    pub triggers: NotificationTriggers,
    /// Per-(user, category) locks serializing calculations.
    pub calc_locks: Arc<CalculationLocks>,
}
