//! Map surface abstraction.
//!
//! The monitor never draws anything itself. It asks a [`MapFactory`] for a
//! surface the first time a position arrives and then places, moves and
//! removes markers on it.

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Options applied when a map surface is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u32,
}

/// Creates the display surface. Called at most once per monitor session.
pub trait MapFactory {
    type Surface: MapSurface;

    fn create(&mut self, options: MapOptions) -> Self::Surface;
}

/// A display region that can hold labeled markers.
pub trait MapSurface {
    /// Owned handle for one marker on this surface.
    type Marker;

    fn place_marker(&mut self, at: LatLng, title: &str) -> Self::Marker;

    fn move_marker(&mut self, marker: &mut Self::Marker, at: LatLng);

    /// Detach the marker from the display.
    fn remove_marker(&mut self, marker: Self::Marker);
}
