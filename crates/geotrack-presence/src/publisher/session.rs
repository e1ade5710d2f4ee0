//! Publisher session: one alias, one transport, one location watch.

use tracing::{info, warn};

use crate::location::{LocationEvent, LocationWatch, UNAVAILABLE_MESSAGE};
use crate::protocol::{Position, PresenceMessage};

use super::{Delivery, PresenceTransport};

/// What happened to one location notification.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    Sent,
    /// No transport yet, or the transport had no publish handle.
    Skipped,
    /// The transport rejected the message. Nothing is retried.
    Failed(String),
    /// No position; carries the status shown to the user.
    LocationUnavailable(String),
}

/// Session state for the publishing role.
///
/// Created when the user picks an alias and consumed by [`finish`](Self::finish).
pub struct PublisherSession {
    alias: String,
    transport: Option<Box<dyn PresenceTransport>>,
    latest: Option<Position>,
    watch: Option<LocationWatch>,
    sent: u64,
}

impl PublisherSession {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            transport: None,
            latest: None,
            watch: None,
            sent: 0,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn latest(&self) -> Option<Position> {
        self.latest
    }

    /// Number of messages the transport accepted.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Take ownership of the location watch so `finish` can clear it.
    pub fn set_watch(&mut self, watch: LocationWatch) {
        self.watch = Some(watch);
    }

    /// Install a prepared transport. A position received while the
    /// transport was still being prepared is published right away.
    pub async fn attach(&mut self, transport: Box<dyn PresenceTransport>) -> Option<PublishOutcome> {
        self.transport = Some(transport);
        info!(alias = %self.alias, "Publisher ready");
        match self.latest {
            Some(position) => Some(self.publish(PresenceMessage::moved(&self.alias, position)).await),
            None => None,
        }
    }

    /// Handle one notification from the location watch.
    pub async fn handle_location(&mut self, event: LocationEvent) -> PublishOutcome {
        match event {
            LocationEvent::Fix(position) => {
                self.latest = Some(position);
                info!(
                    alias = %self.alias,
                    latitude = position.coords.latitude,
                    longitude = position.coords.longitude,
                    "Location changed"
                );
                self.publish(PresenceMessage::moved(&self.alias, position))
                    .await
            }
            LocationEvent::Unavailable(reason) => {
                warn!(reason = %reason, "{UNAVAILABLE_MESSAGE}");
                PublishOutcome::LocationUnavailable(UNAVAILABLE_MESSAGE.to_string())
            }
        }
    }

    /// Announce departure, stop the location watch, and close the transport.
    pub async fn finish(mut self) -> PublishOutcome {
        let outcome = self.publish(PresenceMessage::departed(&self.alias)).await;
        if let Some(watch) = self.watch.take() {
            watch.clear();
        }
        if let Some(transport) = self.transport.as_mut() {
            transport.close().await;
        }
        info!(alias = %self.alias, sent = self.sent, "Publisher session ended");
        outcome
    }

    async fn publish(&mut self, message: PresenceMessage) -> PublishOutcome {
        let Some(transport) = self.transport.as_mut() else {
            return PublishOutcome::Skipped;
        };
        match transport.publish(&message).await {
            Ok(Delivery::Sent) => {
                self.sent += 1;
                info!(
                    alias = %message.alias,
                    departure = message.is_departure(),
                    "Published presence message"
                );
                PublishOutcome::Sent
            }
            Ok(Delivery::Skipped) => PublishOutcome::Skipped,
            Err(e) => {
                warn!(error = %e, "Publish failed, dropping message");
                PublishOutcome::Failed(e.to_string())
            }
        }
    }
}
