use serde::{Deserialize, Serialize};

/// Map surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Zoom level applied when the map is first created (valid range: 0-21).
    pub zoom: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { zoom: 14 }
    }
}
