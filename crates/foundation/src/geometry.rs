//! Ring helpers shared by visibility, labelling and search.
//!
//! Rings are plain coordinate slices in GeoJSON axis order. A closing
//! duplicate vertex is tolerated everywhere and never stripped.

use crate::bounds::LatLngBox;
use crate::geo::{LatLng, LngLat};

/// Minimum number of coordinate pairs a ring needs to describe an area.
pub const MIN_RING_POINTS: usize = 3;

/// Scans `ring` once and returns its bounding box, or `None` for an empty ring.
pub fn bounding_box(ring: &[LngLat]) -> Option<LatLngBox> {
    let (first, rest) = ring.split_first()?;
    let mut b = LatLngBox::from_point(*first);
    for p in rest {
        b.extend(*p);
    }
    Some(b)
}

pub fn is_valid_ring(ring: &[LngLat]) -> bool {
    ring.len() >= MIN_RING_POINTS
}

/// Arithmetic mean of the finite points of `ring` (not area-weighted).
pub fn ring_centroid(ring: &[LngLat]) -> Option<LatLng> {
    let mut sum_lat = 0.0;
    let mut sum_lng = 0.0;
    let mut count = 0usize;
    for p in ring {
        if !p.is_finite() {
            continue;
        }
        sum_lat += p.lat;
        sum_lng += p.lng;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(LatLng::new(sum_lat / n, sum_lng / n))
}

/// Centroid of a polygonal geometry given its outer rings, one per part.
///
/// Only the first part's outer ring is considered. Additional parts of a
/// multi-polygon do not move the result.
pub fn centroid(outer_rings: &[Vec<LngLat>]) -> Option<LatLng> {
    ring_centroid(outer_rings.first()?)
}
