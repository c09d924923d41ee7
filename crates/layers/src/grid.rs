use foundation::geo::{LatLng, LngLat};
use scene::catalog::{FeatureId, GridFeature};
use serde::Serialize;

use crate::render_mode::RenderMode;
use crate::symbology::{GridStyle, HIGHLIGHT_STYLE, point_style, polygon_style};

/// A grid tile drawn as its outline rings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledPolygon {
    pub feature: FeatureId,
    pub name: String,
    /// Outer ring per part, without a closing duplicate vertex.
    pub rings: Vec<Vec<LatLng>>,
    pub style: GridStyle,
}

/// A grid tile drawn as a marker at its centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledPoint {
    pub feature: FeatureId,
    pub name: String,
    pub position: LatLng,
    pub style: GridStyle,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GridLayerSnapshot {
    pub polygons: Vec<StyledPolygon>,
    pub points: Vec<StyledPoint>,
}

impl GridLayerSnapshot {
    pub fn len(&self) -> usize {
        self.polygons.len() + self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.points.is_empty()
    }
}

/// The layer holding every grid primitive of the current pass.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridLayer;

impl GridLayer {
    pub fn new() -> Self {
        Self
    }

    /// Builds the drawable primitives for `features` in the given mode.
    ///
    /// Features whose centroid cannot be computed are left out of point mode.
    pub fn extract(&self, features: &[&GridFeature], mode: RenderMode) -> GridLayerSnapshot {
        let mut out = GridLayerSnapshot::default();
        match mode {
            RenderMode::Hidden => {}
            RenderMode::Points => {
                out.points = features
                    .iter()
                    .filter_map(|f| {
                        let position = f.centroid()?;
                        Some(StyledPoint {
                            feature: f.id(),
                            name: f.name().to_string(),
                            position,
                            style: point_style(f.name()),
                        })
                    })
                    .collect();
            }
            RenderMode::Polygons => {
                out.polygons = features
                    .iter()
                    .map(|f| styled_polygon(f, polygon_style(f.name())))
                    .collect();
            }
        }
        out
    }
}

/// Outline of a selected search result, drawn in the highlight style.
pub fn highlight_polygon(feature: &GridFeature) -> StyledPolygon {
    styled_polygon(feature, HIGHLIGHT_STYLE)
}

fn styled_polygon(feature: &GridFeature, style: GridStyle) -> StyledPolygon {
    StyledPolygon {
        feature: feature.id(),
        name: feature.name().to_string(),
        rings: feature.rings().iter().map(|r| host_ring(r)).collect(),
        style,
    }
}

fn host_ring(ring: &[LngLat]) -> Vec<LatLng> {
    let mut pts: Vec<LatLng> = ring.iter().copied().map(LatLng::from).collect();
    drop_closing_duplicate(&mut pts);
    pts
}

fn drop_closing_duplicate(ring: &mut Vec<LatLng>) {
    if ring.len() >= 2 && ring.first() == ring.last() {
        ring.pop();
    }
}
