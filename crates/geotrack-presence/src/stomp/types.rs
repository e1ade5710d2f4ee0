//! Configuration and event/command types for the STOMP client.

use geotrack_common::TrackerError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for a STOMP broker reached over WebSocket.
#[derive(Clone)]
pub struct StompConfig {
    /// WebSocket URL, e.g. `ws://localhost:61614/stomp`.
    pub url: String,
    pub login: String,
    pub passcode: String,
    /// Virtual host sent in CONNECT. Defaults to the URL's host.
    pub host: Option<String>,
}

impl std::fmt::Debug for StompConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StompConfig")
            .field("url", &self.url)
            .field("login", &self.login)
            .field("passcode", &"[REDACTED]")
            .field("host", &self.host)
            .finish()
    }
}

impl Default for StompConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:61614/stomp".into(),
            login: "guest".into(),
            passcode: "guest".into(),
            host: None,
        }
    }
}

impl StompConfig {
    /// Host name for the CONNECT `host` header.
    pub(crate) fn virtual_host(&self) -> String {
        if let Some(host) = &self.host {
            return host.clone();
        }
        let without_scheme = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        let authority = without_scheme.split('/').next().unwrap_or(without_scheme);
        let authority = authority.rsplit('@').next().unwrap_or(authority);
        match authority.rsplit_once(':') {
            Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host.to_string(),
            _ => authority.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Events & Commands
// ---------------------------------------------------------------------------

/// Events emitted by the STOMP client.
#[derive(Debug, Clone, PartialEq)]
pub enum StompEvent {
    /// The broker accepted our CONNECT.
    Connected {
        version: Option<String>,
        server: Option<String>,
    },
    /// A message delivered to one of our subscriptions.
    Message {
        subscription: String,
        destination: Option<String>,
        message_id: Option<String>,
        body: String,
    },
    /// The broker acknowledged a frame that carried a `receipt` header.
    Receipt { id: String },
    /// ERROR frame from the broker, or a local transport failure.
    Error { message: String, details: String },
    /// The socket is closed; no further events follow.
    Disconnected,
}

impl StompEvent {
    pub(crate) fn from_error(err: &TrackerError) -> Self {
        StompEvent::Error {
            message: err.to_string(),
            details: String::new(),
        }
    }
}

/// Commands sent to the connection task from the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StompCommand {
    Subscribe {
        id: String,
        destination: String,
    },
    Unsubscribe {
        id: String,
    },
    Send {
        destination: String,
        body: String,
        content_type: String,
    },
    Disconnect {
        receipt: String,
    },
}
