//! Mobile publisher configuration.

use serde::{Deserialize, Serialize};

/// How the publisher reaches the topic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// REST topic resource with `msg-create-next` chaining.
    #[default]
    Rest,
    /// Direct STOMP broker connection.
    Stomp,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Alias to publish under. Prompted for on stdin when unset.
    pub alias: Option<String>,
    pub transport: TransportKind,
    /// Delay between replayed location fixes in milliseconds (0 = no pacing).
    pub interval_ms: u64,
}
