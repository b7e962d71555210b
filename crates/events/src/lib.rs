//! Event bus and notification triggering contract.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] — the canonical event envelope.
//! - [`NotificationTriggers`] — the fire-and-forget triggering contract
//!   consumed by the calculation and validation paths. Delivery mechanics
//!   live outside this system; publishing never fails the caller.

pub mod bus;
pub mod triggers;

pub use bus::{DomainEvent, EventBus};
pub use triggers::{
    NotificationTriggers, EVENT_READINESS_OUTDATED, EVENT_ROLE_CHANGED, EVENT_SKILLS_VALIDATED,
};
