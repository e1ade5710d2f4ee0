//! Presence message payload exchanged over the topic.
//!
//! Wire shape: `{"alias": "...", "position": {"coords": {"latitude": .., "longitude": ..}}}`.
//! Departure is the same object with `position` null or missing.

use geotrack_common::{Result, TrackerError};
use serde::{Deserialize, Serialize};

use crate::map::LatLng;

/// Coordinates as reported by the location source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy radius in meters, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// A single location fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coords: Coords,
    /// Milliseconds since the Unix epoch at which the fix was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coords: Coords {
                latitude,
                longitude,
                accuracy: None,
            },
            timestamp: None,
        }
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.coords.latitude, self.coords.longitude)
    }

    /// True when both coordinates are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        let Coords {
            latitude,
            longitude,
            ..
        } = self.coords;
        latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
    }
}

/// Payload published to the trackers topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceMessage {
    pub alias: String,
    #[serde(default)]
    pub position: Option<Position>,
}

impl PresenceMessage {
    /// A position update for `alias`.
    pub fn moved(alias: impl Into<String>, position: Position) -> Self {
        Self {
            alias: alias.into(),
            position: Some(position),
        }
    }

    /// A departure announcement for `alias`.
    pub fn departed(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            position: None,
        }
    }

    pub fn is_departure(&self) -> bool {
        self.position.is_none()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| TrackerError::Payload(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| TrackerError::Payload(e.to_string()))
    }
}
