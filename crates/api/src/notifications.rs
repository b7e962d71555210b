//! Event-to-notification routing loop.
//!
//! [`NotificationListener`] subscribes to the event bus and records each
//! domain event as a notification log line. Delivery channels (in-app,
//! e-mail, digests) live in a separate service that consumes the same
//! events; this loop is what keeps the triggers observable in this one.

use skillgauge_events::{
    DomainEvent, EVENT_READINESS_OUTDATED, EVENT_ROLE_CHANGED, EVENT_SKILLS_VALIDATED,
};
use tokio::sync::broadcast;

/// Consumes domain events published by the request handlers.
pub struct NotificationListener;

impl NotificationListener {
    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](skillgauge_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.route_event(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification listener shutting down");
                    break;
                }
            }
        }
    }

    fn route_event(&self, event: &DomainEvent) {
        match event.event_type.as_str() {
            EVENT_SKILLS_VALIDATED => {
                tracing::info!(
                    user_id = event.user_id,
                    payload = %event.payload,
                    "Notify: mentor reviewed skills"
                );
            }
            EVENT_READINESS_OUTDATED => {
                tracing::info!(
                    user_id = event.user_id,
                    "Notify: readiness score is out of date"
                );
            }
            EVENT_ROLE_CHANGED => {
                tracing::info!(
                    user_id = event.user_id,
                    payload = %event.payload,
                    "Notify: target role changed, roadmaps reset"
                );
            }
            other => {
                tracing::debug!(event_type = other, "Unhandled event type");
            }
        }
    }
}
