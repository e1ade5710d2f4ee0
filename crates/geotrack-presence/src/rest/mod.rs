//! REST topic publishing with `msg-create` / `msg-create-next` chaining.
//!
//! A GET on the topic resource returns the first publish URL in the
//! `msg-create` header. Every successful POST returns the URL for the next
//! publish in `msg-create-next`.

mod http;
mod publisher;

pub use http::{ReqwestTopicHttp, TopicHttp, TopicLinks, MSG_CREATE, MSG_CREATE_NEXT};
pub use publisher::RestTopicPublisher;
