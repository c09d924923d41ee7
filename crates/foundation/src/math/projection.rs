use std::f64::consts::PI;

use crate::bounds::GeoBounds;
use crate::geo::{LatLng, ScreenPoint};
use crate::math::Vec2;

/// Pixel size of one slippy-map tile at zoom 0.
pub const TILE_SIZE_PX: f64 = 256.0;
/// Latitude limit of the square Web-Mercator world.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Spherical Web-Mercator view of a fixed pixel size centered on a point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WebMercatorView {
    pub center: LatLng,
    pub zoom: f64,
    pub size_px: Vec2,
}

impl WebMercatorView {
    pub fn new(center: LatLng, zoom: f64, size_px: Vec2) -> Self {
        Self {
            center,
            zoom,
            size_px,
        }
    }

    pub fn centered_on(bounds: &GeoBounds, zoom: f64, size_px: Vec2) -> Self {
        Self::new(bounds.center(), zoom, size_px)
    }

    pub fn world_size_px(&self) -> f64 {
        TILE_SIZE_PX * 2f64.powf(self.zoom)
    }

    /// Absolute world pixel of `p` (unwrapped, x in `[0, world_size)` for lng in `[-180, 180)`).
    pub fn world_px(&self, p: LatLng) -> Vec2 {
        let ws = self.world_size_px();
        let lat = p.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
        let sin_lat = lat.to_radians().sin();
        let x = (p.lng + 180.0) / 360.0 * ws;
        let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * ws;
        Vec2::new(x, y)
    }

    /// Screen pixel of `p`, using the world copy nearest to the view center.
    pub fn project(&self, p: LatLng) -> ScreenPoint {
        let ws = self.world_size_px();
        let origin = self.world_px(self.center);
        let w = self.world_px(p);
        let dx = wrap_dx(w.x - origin.x, ws);
        Vec2::new(dx, w.y - origin.y) + self.size_px * 0.5
    }

    /// Geographic point under a screen pixel. Longitudes are not wrapped back
    /// into `[-180, 180]`, matching how map hosts report world copies.
    pub fn unproject(&self, s: ScreenPoint) -> LatLng {
        let ws = self.world_size_px();
        let w = s - self.size_px * 0.5 + self.world_px(self.center);
        let lng = w.x / ws * 360.0 - 180.0;
        let n = PI - 2.0 * PI * w.y / ws;
        let lat = n.sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    /// Geographic window covered by the view.
    pub fn bounds(&self) -> GeoBounds {
        let nw = self.unproject(Vec2::new(0.0, 0.0));
        let se = self.unproject(self.size_px);
        GeoBounds::new(se.lat, nw.lng, nw.lat, se.lng)
    }
}

fn wrap_dx(dx: f64, world_size: f64) -> f64 {
    let half = world_size * 0.5;
    let mut d = dx;
    while d > half {
        d -= world_size;
    }
    while d < -half {
        d += world_size;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::WebMercatorView;
    use crate::geo::LatLng;
    use crate::math::Vec2;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn center_projects_to_middle_of_screen() {
        let view = WebMercatorView::new(LatLng::new(45.0, 10.0), 6.0, Vec2::new(800.0, 600.0));
        let s = view.project(LatLng::new(45.0, 10.0));
        assert_close(s.x, 400.0, 1e-9);
        assert_close(s.y, 300.0, 1e-9);
    }

    #[test]
    fn project_unproject_round_trip() {
        let view = WebMercatorView::new(LatLng::new(-20.0, 30.0), 8.0, Vec2::new(1024.0, 768.0));
        let p = LatLng::new(-19.5, 30.7);
        let back = view.unproject(view.project(p));
        assert_close(back.lat, p.lat, 1e-9);
        assert_close(back.lng, p.lng, 1e-9);
    }

    #[test]
    fn projection_picks_nearest_world_copy() {
        let view = WebMercatorView::new(LatLng::new(0.0, 179.0), 4.0, Vec2::new(512.0, 512.0));
        let east = view.project(LatLng::new(0.0, -179.0));
        // Two degrees east of the center, not a whole world to the west.
        assert!(east.x > 256.0 && east.x < 512.0, "x = {}", east.x);
    }

    #[test]
    fn bounds_straddle_the_center() {
        let view = WebMercatorView::new(LatLng::new(0.0, 0.0), 3.0, Vec2::new(512.0, 512.0));
        let b = view.bounds();
        assert!(b.west < 0.0 && b.east > 0.0);
        assert!(b.south < 0.0 && b.north > 0.0);
        assert_close(b.west, -b.east, 1e-9);
    }
}
