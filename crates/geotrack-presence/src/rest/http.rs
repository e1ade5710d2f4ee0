//! HTTP seam for the REST topic publisher.

use async_trait::async_trait;
use geotrack_common::{Result, TrackerError};
use tracing::debug;

pub const MSG_CREATE: &str = "msg-create";
pub const MSG_CREATE_NEXT: &str = "msg-create-next";

/// Link headers returned by the topic resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicLinks {
    pub create: Option<String>,
    pub create_next: Option<String>,
}

#[async_trait]
pub trait TopicHttp: Send + Sync {
    /// GET the topic resource.
    async fn get(&self, url: &str) -> Result<TopicLinks>;

    /// POST a JSON body to a publish URL.
    async fn post_json(&self, url: &str, body: String) -> Result<TopicLinks>;
}

/// `reqwest`-backed implementation.
pub struct ReqwestTopicHttp {
    http: reqwest::Client,
}

impl ReqwestTopicHttp {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    async fn links(response: reqwest::Response) -> Result<TopicLinks> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(TrackerError::Transport(format!("HTTP {status}: {text}")));
        }

        let base = response.url().clone();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| resolve(&base, v))
        };
        Ok(TopicLinks {
            create: header(MSG_CREATE),
            create_next: header(MSG_CREATE_NEXT),
        })
    }
}

impl Default for ReqwestTopicHttp {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a possibly relative link against the URL that returned it.
fn resolve(base: &reqwest::Url, link: &str) -> String {
    base.join(link)
        .map(String::from)
        .unwrap_or_else(|_| link.to_string())
}

#[async_trait]
impl TopicHttp for ReqwestTopicHttp {
    async fn get(&self, url: &str) -> Result<TopicLinks> {
        debug!(url = %url, "GET topic resource");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TrackerError::Transport(e.to_string()))?;
        Self::links(response).await
    }

    async fn post_json(&self, url: &str, body: String) -> Result<TopicLinks> {
        debug!(url = %url, "POST presence message");
        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TrackerError::Transport(e.to_string()))?;
        Self::links(response).await
    }
}
