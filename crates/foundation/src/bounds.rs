use serde::{Deserialize, Serialize};

use crate::geo::{LatLng, LngLat};

/// Smallest axis-aligned lat/lng rectangle enclosing a ring.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLngBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl LatLngBox {
    pub fn from_point(p: LngLat) -> Self {
        Self {
            min_lat: p.lat,
            max_lat: p.lat,
            min_lng: p.lng,
            max_lng: p.lng,
        }
    }

    pub fn extend(&mut self, p: LngLat) {
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lat = self.max_lat.max(p.lat);
        self.min_lng = self.min_lng.min(p.lng);
        self.max_lng = self.max_lng.max(p.lng);
    }
}

/// A map window in degrees.
///
/// `west > east` denotes a window that spans the antimeridian. Longitudes
/// outside `[-180, 180]` are allowed and denote a neighbouring world copy.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// True if the window reaches into a neighbouring world copy.
    pub fn exceeds_world(&self) -> bool {
        self.west < -180.0 || self.east > 180.0
    }

    pub fn shifted_lng(&self, delta_deg: f64) -> Self {
        Self {
            west: self.west + delta_deg,
            east: self.east + delta_deg,
            ..*self
        }
    }

    /// Longitudinal extent in degrees, accounting for an antimeridian span.
    pub fn width_deg(&self) -> f64 {
        if self.crosses_antimeridian() {
            (self.east + 360.0) - self.west
        } else {
            self.east - self.west
        }
    }

    pub fn center(&self) -> LatLng {
        let mut lng = self.west + self.width_deg() * 0.5;
        if lng > 180.0 && self.crosses_antimeridian() {
            lng -= 360.0;
        }
        LatLng::new((self.south + self.north) * 0.5, lng)
    }

    pub fn is_finite(&self) -> bool {
        self.south.is_finite() && self.west.is_finite() && self.north.is_finite() && self.east.is_finite()
    }
}
