//! The notification triggering contract.
//!
//! Callers on the primary paths (calculation, mentor validation, role
//! change) fire these triggers as side effects. They are best-effort:
//! a trigger can never fail or roll back the operation that raised it.

use std::sync::Arc;

use serde_json::json;
use skillgauge_core::types::DbId;

use crate::bus::{DomainEvent, EventBus};

/// Event type published when a mentor finishes a validation review.
pub const EVENT_SKILLS_VALIDATED: &str = "skills.validated";

/// Event type published when ledger changes make the current score stale.
pub const EVENT_READINESS_OUTDATED: &str = "readiness.outdated";

/// Event type published when a user switches target role.
pub const EVENT_ROLE_CHANGED: &str = "profile.role_changed";

/// Fire-and-forget notification triggers over the shared [`EventBus`].
#[derive(Clone)]
pub struct NotificationTriggers {
    bus: Arc<EventBus>,
}

impl NotificationTriggers {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }

    /// Access the underlying bus (for subscribing consumers).
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// A mentor validated and/or rejected skills for this user.
    pub fn mentor_validation(&self, user_id: DbId, validated: usize, rejected: usize) {
        tracing::debug!(user_id, validated, rejected, "Trigger: mentor validation");
        self.bus.publish(
            DomainEvent::new(EVENT_SKILLS_VALIDATED)
                .with_user(user_id)
                .with_payload(json!({
                    "validated_count": validated,
                    "rejected_count": rejected,
                })),
        );
    }

    /// The user's ledger changed; their latest readiness score is stale.
    pub fn readiness_outdated(&self, user_id: DbId) {
        tracing::debug!(user_id, "Trigger: readiness outdated");
        self.bus
            .publish(DomainEvent::new(EVENT_READINESS_OUTDATED).with_user(user_id));
    }

    /// The user switched target role.
    pub fn role_changed(&self, user_id: DbId, new_role_name: &str) {
        tracing::debug!(user_id, new_role_name, "Trigger: role changed");
        self.bus.publish(
            DomainEvent::new(EVENT_ROLE_CHANGED)
                .with_user(user_id)
                .with_payload(json!({ "new_role_name": new_role_name })),
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mentor_validation_carries_counts() {
        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let triggers = NotificationTriggers::new(bus);

        triggers.mentor_validation(3, 2, 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EVENT_SKILLS_VALIDATED);
        assert_eq!(event.user_id, Some(3));
        assert_eq!(event.payload["validated_count"], 2);
        assert_eq!(event.payload["rejected_count"], 1);
    }

    #[tokio::test]
    async fn role_changed_carries_role_name() {
        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let triggers = NotificationTriggers::new(bus);

        triggers.role_changed(3, "Backend Engineer");

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EVENT_ROLE_CHANGED);
        assert_eq!(event.payload["new_role_name"], "Backend Engineer");
    }

    #[tokio::test]
    async fn triggers_never_fail_without_subscribers() {
        let triggers = NotificationTriggers::new(Arc::new(EventBus::default()));
        triggers.readiness_outdated(1);
        triggers.mentor_validation(1, 0, 0);
        triggers.role_changed(1, "Data Engineer");
    }
}
