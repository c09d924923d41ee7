use crate::geojson::{GeoJsonError, LoadReport, VectorFeature, parse_feature_collection};

/// Satellite coverage footprints drawn on top of the grid.
///
/// The overlay is never visibility-filtered; every feature is drawn.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CoverageOverlay {
    pub features: Vec<VectorFeature>,
}

impl CoverageOverlay {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Any geometry type is accepted; unparsable features are reported.
pub fn load_coverage_overlay(payload: &str) -> Result<(CoverageOverlay, LoadReport), GeoJsonError> {
    let (features, report) = parse_feature_collection(payload)?;
    Ok((CoverageOverlay { features }, report))
}
