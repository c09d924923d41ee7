use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Screen position in pixels relative to the map container's top-left corner.
pub type ScreenPoint = Vec2;

/// A coordinate pair in GeoJSON axis order (degrees).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }
}

/// A geographic point in map-host axis order (degrees).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<LngLat> for LatLng {
    fn from(p: LngLat) -> Self {
        Self::new(p.lat, p.lng)
    }
}

impl From<LatLng> for LngLat {
    fn from(p: LatLng) -> Self {
        Self::new(p.lng, p.lat)
    }
}
