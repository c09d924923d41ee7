use explorer::host::{RenderSink, ViewportProvider};
use explorer::render::RenderPass;
use foundation::bounds::GeoBounds;
use foundation::geo::{LatLng, ScreenPoint};
use foundation::math::{Vec2, WebMercatorView};
use layers::coverage::CoverageStyle;
use layers::grid::StyledPolygon;
use layers::labels::ScreenProjector;

/// A map that never moves on its own: a fixed window rendered into a
/// Web-Mercator canvas of the given size. Draw calls are recorded.
#[derive(Debug, Clone)]
pub struct StaticMap {
    bounds: GeoBounds,
    view: WebMercatorView,
    pub drawn: Option<RenderPass>,
    pub highlight: Option<StyledPolygon>,
    pub overlay_style: Option<CoverageStyle>,
    pub overlay_on_top: bool,
}

impl StaticMap {
    pub fn new(bounds: GeoBounds, zoom: f64, width_px: f64, height_px: f64) -> Self {
        Self {
            bounds,
            view: WebMercatorView::centered_on(&bounds, zoom, Vec2::new(width_px, height_px)),
            drawn: None,
            highlight: None,
            overlay_style: None,
            overlay_on_top: false,
        }
    }
}

impl ScreenProjector for StaticMap {
    fn project(&self, p: LatLng) -> Option<ScreenPoint> {
        Some(self.view.project(p))
    }

    fn unproject(&self, s: ScreenPoint) -> Option<LatLng> {
        Some(self.view.unproject(s))
    }
}

impl ViewportProvider for StaticMap {
    fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    fn zoom(&self) -> f64 {
        self.view.zoom
    }

    /// Re-centers the canvas; the reported bounds follow the new view.
    fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.view = WebMercatorView::new(center, zoom, self.view.size_px);
        self.bounds = self.view.bounds();
    }
}

impl RenderSink for StaticMap {
    fn draw(&mut self, pass: &RenderPass) {
        self.drawn = Some(pass.clone());
    }

    fn highlight(&mut self, outline: &StyledPolygon) {
        self.highlight = Some(outline.clone());
    }

    fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    fn restyle_overlay(&mut self, style: &CoverageStyle) {
        self.overlay_style = Some(*style);
        self.overlay_on_top = false;
    }

    fn raise_overlay(&mut self) {
        self.overlay_on_top = true;
    }
}
