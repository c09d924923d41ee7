use serde::Serialize;

/// Name of the imagery base layer the satellite preset is keyed on.
pub const SATELLITE_BASE_LAYER: &str = "satellite";

/// Which base map the host currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BaseLayer {
    Satellite,
    Other(String),
}

impl BaseLayer {
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case(SATELLITE_BASE_LAYER) {
            BaseLayer::Satellite
        } else {
            BaseLayer::Other(name.trim().to_string())
        }
    }
}

impl Default for BaseLayer {
    fn default() -> Self {
        BaseLayer::Other("streets".to_string())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CoverageStyle {
    pub stroke_color: &'static str,
    pub weight: f32,
    pub opacity: f32,
    pub fill_color: &'static str,
    pub fill_opacity: f32,
}

/// Bright outline that stays readable over imagery.
pub const SATELLITE_COVERAGE_STYLE: CoverageStyle = CoverageStyle {
    stroke_color: "#ffff00",
    weight: 2.0,
    opacity: 0.9,
    fill_color: "#ffff00",
    fill_opacity: 0.1,
};

pub const MAP_COVERAGE_STYLE: CoverageStyle = CoverageStyle {
    stroke_color: "#d7191c",
    weight: 2.0,
    opacity: 0.8,
    fill_color: "#d7191c",
    fill_opacity: 0.15,
};

pub fn coverage_style(base: &BaseLayer) -> CoverageStyle {
    match base {
        BaseLayer::Satellite => SATELLITE_COVERAGE_STYLE,
        BaseLayer::Other(_) => MAP_COVERAGE_STYLE,
    }
}

/// The coverage overlay as a drawable layer: full feature set, style keyed
/// on the active base layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageLayer {
    base: BaseLayer,
}

impl CoverageLayer {
    pub fn new(base: BaseLayer) -> Self {
        Self { base }
    }

    pub fn base_layer(&self) -> &BaseLayer {
        &self.base
    }

    /// Returns `true` if the style changed.
    pub fn set_base_layer(&mut self, base: BaseLayer) -> bool {
        let changed = coverage_style(&base) != coverage_style(&self.base);
        self.base = base;
        changed
    }

    pub fn style(&self) -> CoverageStyle {
        coverage_style(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BaseLayer, CoverageLayer, MAP_COVERAGE_STYLE, SATELLITE_COVERAGE_STYLE, coverage_style,
    };

    #[test]
    fn base_layer_names() {
        assert_eq!(BaseLayer::from_name("Satellite"), BaseLayer::Satellite);
        assert_eq!(BaseLayer::from_name(" satellite "), BaseLayer::Satellite);
        assert_eq!(BaseLayer::from_name("topo"), BaseLayer::Other("topo".into()));
    }

    #[test]
    fn presets_by_base_layer() {
        assert_eq!(coverage_style(&BaseLayer::Satellite), SATELLITE_COVERAGE_STYLE);
        assert_eq!(coverage_style(&BaseLayer::Other("osm".into())), MAP_COVERAGE_STYLE);
    }

    #[test]
    fn switching_between_non_satellite_layers_keeps_style() {
        let mut layer = CoverageLayer::new(BaseLayer::default());
        assert!(!layer.set_base_layer(BaseLayer::from_name("topo")));
        assert!(layer.set_base_layer(BaseLayer::Satellite));
        assert_eq!(layer.style(), SATELLITE_COVERAGE_STYLE);
    }
}
