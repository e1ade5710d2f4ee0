//! Configuration validation.
//!
//! Checks numeric ranges and URL schemes, collecting every problem into a
//! single `ConfigError`.

mod helpers;


use crate::schema::{GeotrackConfig, TransportKind};
use geotrack_common::ConfigError;

use helpers::{validate_not_empty, validate_range, validate_scheme};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GeotrackConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_scheme(&mut errors, "broker.url", &config.broker.url, &["ws", "wss"]);
    validate_not_empty(&mut errors, "broker.destination", &config.broker.destination);
    validate_scheme(
        &mut errors,
        "rest.topic_url",
        &config.rest.topic_url,
        &["http", "https"],
    );
    validate_range(&mut errors, "map.zoom", config.map.zoom, 0, 21);

    if let Some(alias) = &config.publisher.alias {
        validate_not_empty(&mut errors, "publisher.alias", alias);
    }
    if config.publisher.transport == TransportKind::Stomp {
        validate_not_empty(&mut errors, "broker.login", &config.broker.login);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
