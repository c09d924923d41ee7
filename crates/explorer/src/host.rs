//! Capabilities the map host provides to a session, and the events it emits.

use foundation::bounds::GeoBounds;
use foundation::geo::LatLng;
use foundation::time::Millis;
use layers::coverage::CoverageStyle;
use layers::grid::StyledPolygon;
use layers::labels::ScreenProjector;

use crate::render::RenderPass;

/// The map widget as seen by the session: where it looks, and how to move it.
pub trait ViewportProvider: ScreenProjector {
    fn bounds(&self) -> GeoBounds;
    fn zoom(&self) -> f64;
    fn set_view(&mut self, center: LatLng, zoom: f64);

    fn state(&self) -> ViewportState {
        ViewportState {
            bounds: self.bounds(),
            zoom: self.zoom(),
        }
    }
}

/// Receiver of draw instructions.
///
/// Every `draw` fully replaces what the previous pass drew.
pub trait RenderSink {
    fn draw(&mut self, pass: &RenderPass);
    fn highlight(&mut self, outline: &StyledPolygon);
    fn clear_highlight(&mut self);
    fn restyle_overlay(&mut self, style: &CoverageStyle);
    /// Moves the coverage overlay above every grid primitive.
    fn raise_overlay(&mut self);
}

/// Viewport snapshot carried by a change notification.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportState {
    pub bounds: GeoBounds,
    pub zoom: f64,
}

/// Notifications from the map host. Listeners run synchronously, in
/// subscription order.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    ViewportChanged { at: Millis, viewport: ViewportState },
    BaseLayerChanged { name: String },
}
