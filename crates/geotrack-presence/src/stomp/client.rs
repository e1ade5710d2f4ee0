//! Public handle for interacting with the STOMP connection.

use geotrack_common::{Result, TrackerError};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::connection::connection_task;
use super::types::{StompCommand, StompConfig, StompEvent};

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Handle for interacting with the STOMP connection.
///
/// Methods only queue a command for the background connection task and
/// fail once that task has exited. Results arrive later as [`StompEvent`]s.
pub struct StompClient {
    command_tx: mpsc::Sender<StompCommand>,
}

impl StompClient {
    /// Create a new client and start the background connection.
    /// Returns `(client, event_receiver)`.
    pub fn connect(config: StompConfig) -> (Self, mpsc::Receiver<StompEvent>) {
        let (event_tx, event_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(64);

        tokio::spawn(connection_task(config, event_tx, command_rx));

        (Self { command_tx }, event_rx)
    }

    async fn command(&self, cmd: StompCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| TrackerError::Transport("STOMP connection is closed".into()))
    }

    /// Subscribe to `destination`. Returns the subscription id that
    /// incoming `Message` events will carry.
    pub async fn subscribe(&self, destination: &str) -> Result<String> {
        let id = format!("sub-{}", Uuid::new_v4());
        self.command(StompCommand::Subscribe {
            id: id.clone(),
            destination: destination.to_string(),
        })
        .await?;
        Ok(id)
    }

    /// Cancel a subscription.
    pub async fn unsubscribe(&self, id: &str) -> Result<()> {
        self.command(StompCommand::Unsubscribe { id: id.to_string() })
            .await
    }

    /// Send a text body to `destination`.
    pub async fn send(&self, destination: &str, body: String, content_type: &str) -> Result<()> {
        self.command(StompCommand::Send {
            destination: destination.to_string(),
            body,
            content_type: content_type.to_string(),
        })
        .await
    }

    /// Send DISCONNECT and close the socket. The connection task reports
    /// `Disconnected` once the frame is written.
    pub async fn disconnect(&self) -> Result<()> {
        self.command(StompCommand::Disconnect {
            receipt: format!("disconnect-{}", Uuid::new_v4()),
        })
        .await
    }
}

/// Captures the commands a [`StompClient`] issues, with no socket behind it.
#[cfg(test)]
pub(crate) struct StompCommandRecorder {
    rx: mpsc::Receiver<StompCommand>,
}

#[cfg(test)]
impl StompCommandRecorder {
    pub(crate) fn new() -> (StompClient, Self) {
        let (command_tx, rx) = mpsc::channel(64);
        (StompClient { command_tx }, Self { rx })
    }

    pub(crate) fn drain(&mut self) -> Vec<StompCommand> {
        let mut out = Vec::new();
        while let Ok(cmd) = self.rx.try_recv() {
            out.push(cmd);
        }
        out
    }

    /// `(id, destination)` of every pending SUBSCRIBE.
    pub(crate) fn drain_subscribes(&mut self) -> Vec<(String, String)> {
        self.drain()
            .into_iter()
            .filter_map(|cmd| match cmd {
                StompCommand::Subscribe { id, destination } => Some((id, destination)),
                _ => None,
            })
            .collect()
    }

    /// Short names of every pending command, e.g. `UNSUBSCRIBE sub-1`.
    pub(crate) fn drain_names(&mut self) -> Vec<String> {
        self.drain()
            .into_iter()
            .map(|cmd| match cmd {
                StompCommand::Subscribe { id, .. } => format!("SUBSCRIBE {id}"),
                StompCommand::Unsubscribe { id } => format!("UNSUBSCRIBE {id}"),
                StompCommand::Send { destination, .. } => format!("SEND {destination}"),
                StompCommand::Disconnect { .. } => "DISCONNECT".to_string(),
            })
            .collect()
    }
}
