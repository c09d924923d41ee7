use foundation::geo::{LatLng, ScreenPoint};
use foundation::math::{Vec2, WebMercatorView};
use scene::catalog::{FeatureId, GridFeature};
use serde::{Deserialize, Serialize};

/// Geographic point to screen pixel and back, as provided by the map host.
pub trait ScreenProjector {
    fn project(&self, p: LatLng) -> Option<ScreenPoint>;
    fn unproject(&self, s: ScreenPoint) -> Option<LatLng>;
}

impl ScreenProjector for WebMercatorView {
    fn project(&self, p: LatLng) -> Option<ScreenPoint> {
        Some(WebMercatorView::project(self, p))
    }

    fn unproject(&self, s: ScreenPoint) -> Option<LatLng> {
        Some(WebMercatorView::unproject(self, s))
    }
}

/// Candidate anchor offsets in pixels, tried in order: the centroid itself,
/// then the four cardinal directions, then the diagonals.
pub const LABEL_OFFSETS_PX: [(f64, f64); 9] = [
    (0.0, 0.0),
    (0.0, -15.0),
    (15.0, 0.0),
    (0.0, 15.0),
    (-15.0, 0.0),
    (12.0, -12.0),
    (-12.0, -12.0),
    (12.0, 12.0),
    (-12.0, 12.0),
];

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Spacing every pair of accepted anchors keeps, before width padding.
    pub min_distance_px: f64,
    /// Fixed per-character advance used to estimate label width.
    pub char_width_px: f64,
    pub label_height_px: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            min_distance_px: 20.0,
            char_width_px: 8.0,
            label_height_px: 16.0,
        }
    }
}

impl LabelConfig {
    pub fn estimate_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width_px
    }

    /// Minimum center distance between two labels of the given widths.
    pub fn clearance(&self, width_a: f64, width_b: f64) -> f64 {
        self.min_distance_px + (width_a + width_b) / 4.0
    }
}

/// An accepted label anchor. Lives for one rendering pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPosition {
    pub feature: FeatureId,
    pub text: String,
    pub anchor: LatLng,
    pub screen_px: ScreenPoint,
    pub estimated_width: f64,
    pub estimated_height: f64,
}

/// Result of one placement pass.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LabelLayout {
    pub placed: Vec<LabelPosition>,
    /// Features that got no label, in the order they were tried.
    pub omitted: Vec<FeatureId>,
}

/// Greedy, order-preserving label placement.
///
/// Each label is checked only against labels already accepted in the same
/// pass; later labels never displace earlier ones. If none of the
/// [`LABEL_OFFSETS_PX`] candidates clears every accepted label, the feature
/// gets no label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacer {
    config: LabelConfig,
    placed: Vec<LabelPosition>,
}

impl LabelPlacer {
    pub fn new(config: LabelConfig) -> Self {
        Self {
            config,
            placed: Vec::new(),
        }
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Forgets every accepted position. Called at the start of each pass.
    pub fn reset(&mut self) {
        self.placed.clear();
    }

    pub fn placed(&self) -> &[LabelPosition] {
        &self.placed
    }

    /// Tries to place `text` near `centroid`. Returns the accepted position.
    pub fn try_place<P: ScreenProjector + ?Sized>(
        &mut self,
        feature: FeatureId,
        text: &str,
        centroid: LatLng,
        projector: &P,
    ) -> Option<&LabelPosition> {
        let origin = projector.project(centroid)?;
        if !origin.is_finite() {
            return None;
        }
        let width = self.config.estimate_width(text);

        for (dx, dy) in LABEL_OFFSETS_PX {
            let candidate = origin + Vec2::new(dx, dy);
            if self.collides(candidate, width) {
                continue;
            }
            let Some(anchor) = projector.unproject(candidate) else {
                continue;
            };
            if !anchor.is_finite() {
                continue;
            }
            self.placed.push(LabelPosition {
                feature,
                text: text.to_string(),
                anchor,
                screen_px: candidate,
                estimated_width: width,
                estimated_height: self.config.label_height_px,
            });
            return self.placed.last();
        }
        None
    }

    fn collides(&self, candidate: ScreenPoint, width: f64) -> bool {
        self.placed.iter().any(|existing| {
            candidate.distance(existing.screen_px)
                < self.config.clearance(width, existing.estimated_width)
        })
    }

    /// Runs a full pass over `features` in order and hands back the layout.
    pub fn layout<'a, P, I>(&mut self, features: I, projector: &P) -> LabelLayout
    where
        P: ScreenProjector + ?Sized,
        I: IntoIterator<Item = &'a GridFeature>,
    {
        self.reset();
        let mut omitted = Vec::new();
        for feature in features {
            let placed = feature
                .centroid()
                .and_then(|c| self.try_place(feature.id(), feature.name(), c, projector))
                .is_some();
            if !placed {
                omitted.push(feature.id());
            }
        }
        LabelLayout {
            placed: std::mem::take(&mut self.placed),
            omitted,
        }
    }
}
