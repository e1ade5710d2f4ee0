//! Messaging transport configuration: STOMP broker and REST topic.

use serde::{Deserialize, Serialize};

/// Direct broker connection (STOMP over WebSocket).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// WebSocket URL of the STOMP endpoint.
    pub url: String,
    pub login: String,
    pub passcode: String,
    /// Topic destination shared by all participants.
    pub destination: String,
}

impl std::fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("url", &self.url)
            .field("login", &self.login)
            .field("passcode", &"[REDACTED]")
            .field("destination", &self.destination)
            .finish()
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:61614/stomp".into(),
            login: "guest".into(),
            passcode: "guest".into(),
            destination: "jms.topic.trackers".into(),
        }
    }
}

/// REST topic resource used by the publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    /// Topic resource URL. Its `msg-create` header names the first publish URL.
    pub topic_url: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            topic_url: "http://localhost:8080/topics/jms.topic.trackers".into(),
        }
    }
}
