//! Publisher that follows the REST topic's link chain.

use async_trait::async_trait;
use geotrack_common::{Result, TrackerError};
use tracing::{debug, warn};

use crate::protocol::PresenceMessage;
use crate::publisher::{Delivery, PresenceTransport};

use super::http::{TopicHttp, MSG_CREATE};

/// Publishes presence messages to a REST topic resource.
///
/// Holds the URL for the next publish. Until [`prepare`](PresenceTransport::prepare)
/// succeeds there is none and publishes are skipped.
pub struct RestTopicPublisher<H> {
    http: H,
    topic_url: String,
    next_url: Option<String>,
}

impl<H: TopicHttp> RestTopicPublisher<H> {
    pub fn new(http: H, topic_url: impl Into<String>) -> Self {
        Self {
            http,
            topic_url: topic_url.into(),
            next_url: None,
        }
    }

    /// URL the next publish will be POSTed to.
    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }
}

#[async_trait]
impl<H: TopicHttp> PresenceTransport for RestTopicPublisher<H> {
    async fn prepare(&mut self) -> Result<()> {
        let links = self.http.get(&self.topic_url).await?;
        let create = links.create.ok_or_else(|| {
            TrackerError::Protocol(format!(
                "{} did not return a {MSG_CREATE} header",
                self.topic_url
            ))
        })?;
        debug!(url = %create, "Topic publish URL acquired");
        self.next_url = Some(create);
        Ok(())
    }

    async fn publish(&mut self, message: &PresenceMessage) -> Result<Delivery> {
        let Some(url) = self.next_url.clone() else {
            warn!(alias = %message.alias, "No publish URL, dropping message");
            return Ok(Delivery::Skipped);
        };

        let links = self.http.post_json(&url, message.to_json()?).await?;
        if links.create_next.is_none() {
            warn!(url = %url, "Publish response carried no msg-create-next; further publishes will be dropped");
        }
        self.next_url = links.create_next;
        Ok(Delivery::Sent)
    }
}
