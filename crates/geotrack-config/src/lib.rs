//! geotrack configuration system.
//!
//! Provides TOML-based configuration for the monitor and the mobile
//! publisher. All sections use sensible defaults so partial configs work
//! out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use geotrack_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config.broker.destination);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BrokerConfig, GeotrackConfig, LogLevel, LoggingConfig, MapConfig, PublisherConfig,
    RestConfig, TransportKind,
};

use std::path::Path;

use geotrack_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// An explicit path must exist. The default path is created with a
/// commented template on first run. Invalid values are an error.
pub fn load_config(path: Option<&Path>) -> Result<GeotrackConfig, ConfigError> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)
        }
        None => toml_loader::load_default(),
    }
}
