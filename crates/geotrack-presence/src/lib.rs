//! Real-time location sharing over a publish/subscribe topic.
//!
//! Publishers send [`PresenceMessage`]s carrying their alias and position;
//! monitors subscribe to the same topic and keep one map marker per alias.

pub mod location;
pub mod map;
pub mod monitor;
pub mod protocol;
pub mod publisher;
pub mod registry;
pub mod rest;
pub mod stomp;

pub use location::{LocationEvent, LocationWatch};
pub use map::{LatLng, MapFactory, MapOptions, MapSurface};
pub use monitor::{MonitorOptions, MonitorSession};
pub use protocol::{Coords, Position, PresenceMessage};
pub use publisher::{Delivery, PresenceTransport, PublishOutcome, PublisherSession, StompPublisher};
pub use registry::{Applied, MarkerRegistry};
pub use rest::{ReqwestTopicHttp, RestTopicPublisher, TopicHttp, TopicLinks};
pub use stomp::{StompClient, StompConfig, StompEvent, StompFrame};
