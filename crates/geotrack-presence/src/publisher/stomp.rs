//! Publishing over a direct STOMP broker connection.

use async_trait::async_trait;
use geotrack_common::{Result, TrackerError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::protocol::PresenceMessage;
use crate::stomp::{StompClient, StompConfig, StompEvent};

use super::{Delivery, PresenceTransport};

/// Sends presence messages as STOMP `SEND` frames to a destination.
pub struct StompPublisher {
    config: StompConfig,
    destination: String,
    client: Option<StompClient>,
    /// Drains connection events; finishes when the connection task exits.
    events: Option<JoinHandle<()>>,
}

impl StompPublisher {
    pub fn new(config: StompConfig, destination: impl Into<String>) -> Self {
        Self {
            config,
            destination: destination.into(),
            client: None,
            events: None,
        }
    }
}

/// Wait for the broker to accept CONNECT, then hand the receiver to a task
/// that drains it until `Disconnected`.
async fn await_connected(mut events: mpsc::Receiver<StompEvent>) -> Result<JoinHandle<()>> {
    while let Some(event) = events.recv().await {
        match event {
            StompEvent::Connected { .. } => {
                return Ok(tokio::spawn(drain_until_disconnected(events)));
            }
            StompEvent::Error { message, details } => {
                return Err(TrackerError::Transport(format!("{message} {details}").trim().to_string()));
            }
            StompEvent::Disconnected => break,
            other => debug!(?other, "Ignoring event before CONNECTED"),
        }
    }
    Err(TrackerError::Transport("connection closed before CONNECTED".into()))
}

async fn drain_until_disconnected(mut events: mpsc::Receiver<StompEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            StompEvent::Disconnected => break,
            StompEvent::Error { message, details } => {
                warn!(message = %message, details = %details, "Broker error");
            }
            other => debug!(?other, "STOMP publisher event"),
        }
    }
}

#[async_trait]
impl PresenceTransport for StompPublisher {
    async fn prepare(&mut self) -> Result<()> {
        let (client, events) = StompClient::connect(self.config.clone());
        self.events = Some(await_connected(events).await?);
        self.client = Some(client);
        Ok(())
    }

    async fn publish(&mut self, message: &PresenceMessage) -> Result<Delivery> {
        let Some(client) = &self.client else {
            return Ok(Delivery::Skipped);
        };
        client
            .send(&self.destination, message.to_json()?, "application/json")
            .await?;
        Ok(Delivery::Sent)
    }

    /// Queue DISCONNECT and wait until the connection task has written
    /// every queued frame and exited.
    async fn close(&mut self) {
        if let Some(client) = self.client.take() {
            if let Err(e) = client.disconnect().await {
                debug!(error = %e, "STOMP connection already closed");
            }
        }
        if let Some(events) = self.events.take() {
            let _ = events.await;
        }
    }
}
