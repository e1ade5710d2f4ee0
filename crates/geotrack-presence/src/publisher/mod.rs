//! Presence Publisher: forwards local location fixes to the shared topic.

mod session;
mod stomp;

use async_trait::async_trait;
use geotrack_common::Result;

use crate::protocol::PresenceMessage;

pub use session::{PublisherSession, PublishOutcome};
pub use stomp::StompPublisher;

/// Whether a publish attempt reached the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No publish handle yet; the message was dropped.
    Skipped,
}

/// A way of getting presence messages onto the topic.
#[async_trait]
pub trait PresenceTransport: Send {
    /// Acquire whatever is needed before the first publish.
    async fn prepare(&mut self) -> Result<()>;

    async fn publish(&mut self, message: &PresenceMessage) -> Result<Delivery>;

    /// Release the connection, if any.
    async fn close(&mut self) {}
}
