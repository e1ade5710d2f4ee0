//! Configuration schema types for geotrack.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod map;
mod publisher;
mod system;
mod transport;

pub use map::*;
pub use publisher::*;
pub use system::*;
pub use transport::*;

use serde::{Deserialize, Serialize};

/// Root configuration shared by the monitor and the mobile publisher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeotrackConfig {
    pub broker: BrokerConfig,
    pub rest: RestConfig,
    pub map: MapConfig,
    pub publisher: PublisherConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_broker_points_at_local_stomp() {
        let config = GeotrackConfig::default();
        assert_eq!(config.broker.url, "ws://localhost:61614/stomp");
        assert_eq!(config.broker.login, "guest");
        assert_eq!(config.broker.passcode, "guest");
        assert_eq!(config.broker.destination, "jms.topic.trackers");
    }

    #[test]
    fn default_rest_topic_url() {
        let config = GeotrackConfig::default();
        assert_eq!(
            config.rest.topic_url,
            "http://localhost:8080/topics/jms.topic.trackers"
        );
    }

    #[test]
    fn default_publisher_uses_rest_without_alias() {
        let config = GeotrackConfig::default();
        assert_eq!(config.publisher.transport, TransportKind::Rest);
        assert!(config.publisher.alias.is_none());
        assert_eq!(config.publisher.interval_ms, 0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: GeotrackConfig = toml::from_str(
            r#"
[broker]
login = "admin"

[map]
zoom = 10
"#,
        )
        .unwrap();
        assert_eq!(config.broker.login, "admin");
        assert_eq!(config.broker.passcode, "guest");
        assert_eq!(config.map.zoom, 10);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn transport_kind_parses_lowercase() {
        let config: GeotrackConfig = toml::from_str("[publisher]\ntransport = \"stomp\"\n").unwrap();
        assert_eq!(config.publisher.transport, TransportKind::Stomp);
    }

    #[test]
    fn broker_debug_redacts_passcode() {
        let mut config = GeotrackConfig::default();
        config.broker.passcode = "hunter2".into();
        let debug = format!("{:?}", config.broker);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
