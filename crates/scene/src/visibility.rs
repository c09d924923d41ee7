use foundation::bounds::{GeoBounds, LatLngBox};

use crate::catalog::{GridCatalog, GridFeature};

/// Longitudinal width of one world copy.
pub const WORLD_WIDTH_DEG: f64 = 360.0;

/// Equivalent map windows for a viewport.
///
/// The original window always comes first. The result has:
/// - 1 window for a plain view inside `[-180, 180]`,
/// - 3 windows for a view reaching into a neighbouring world copy
///   (plus the view shifted one world left and right),
/// - 5 windows for a view spanning the antimeridian (`west > east`): the two
///   halves split at ±180 and the unwrapped view shifted one world left and right.
pub fn replicate_bounds(bounds: &GeoBounds) -> Vec<GeoBounds> {
    let mut out = Vec::with_capacity(5);
    out.push(*bounds);

    if bounds.crosses_antimeridian() {
        out.push(GeoBounds::new(bounds.south, bounds.west, bounds.north, 180.0));
        out.push(GeoBounds::new(bounds.south, -180.0, bounds.north, bounds.east));
        let unwrapped = GeoBounds::new(
            bounds.south,
            bounds.west,
            bounds.north,
            bounds.east + WORLD_WIDTH_DEG,
        );
        out.push(unwrapped.shifted_lng(-WORLD_WIDTH_DEG));
        out.push(unwrapped.shifted_lng(WORLD_WIDTH_DEG));
    } else if bounds.exceeds_world() {
        out.push(bounds.shifted_lng(-WORLD_WIDTH_DEG));
        out.push(bounds.shifted_lng(WORLD_WIDTH_DEG));
    }

    out
}

/// Box/window overlap. A window with `west > east` is treated as the union
/// of `[west, +inf)` and `(-inf, east]`.
pub fn box_intersects(b: &LatLngBox, window: &GeoBounds) -> bool {
    let lat_overlap = b.min_lat <= window.north && b.max_lat >= window.south;
    if !lat_overlap {
        return false;
    }
    if window.crosses_antimeridian() {
        b.max_lng >= window.west || b.min_lng <= window.east
    } else {
        b.max_lng >= window.west && b.min_lng <= window.east
    }
}

/// True if any polygon part of `feature` overlaps any of `windows`.
pub fn feature_visible(feature: &GridFeature, windows: &[GeoBounds]) -> bool {
    feature
        .part_boxes()
        .any(|b| windows.iter().any(|w| box_intersects(&b, w)))
}

/// Features overlapping any window, in catalog order.
pub fn visible_features<'a>(catalog: &'a GridCatalog, windows: &[GeoBounds]) -> Vec<&'a GridFeature> {
    catalog
        .iter()
        .filter(|f| feature_visible(f, windows))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{box_intersects, replicate_bounds, visible_features};
    use crate::catalog::test_support::square_tile;
    use crate::catalog::{GeometryKind, GridCatalog, GridFeature};
    use foundation::bounds::{GeoBounds, LatLngBox};
    use foundation::geo::LngLat;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_view_is_not_replicated() {
        let b = GeoBounds::new(-10.0, -20.0, 10.0, 20.0);
        assert_eq!(replicate_bounds(&b), vec![b]);
    }

    #[test]
    fn antimeridian_view_is_split_and_shifted() {
        let b = GeoBounds::new(-5.0, 170.0, 5.0, -170.0);
        let out = replicate_bounds(&b);
        assert!(out.len() >= 3);
        assert_eq!(
            out,
            vec![
                b,
                GeoBounds::new(-5.0, 170.0, 5.0, 180.0),
                GeoBounds::new(-5.0, -180.0, 5.0, -170.0),
                GeoBounds::new(-5.0, -190.0, 5.0, -170.0),
                GeoBounds::new(-5.0, 530.0, 5.0, 550.0),
            ]
        );
    }

    #[test]
    fn world_copy_view_gets_shifted_neighbours() {
        let b = GeoBounds::new(0.0, 190.0, 10.0, 200.0);
        let out = replicate_bounds(&b);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], GeoBounds::new(0.0, -170.0, 10.0, -160.0));
        assert_eq!(out[2], GeoBounds::new(0.0, 550.0, 10.0, 560.0));
    }

    #[test]
    fn wrapping_window_is_a_union_of_two_intervals() {
        let window = GeoBounds::new(-5.0, 170.0, 5.0, -170.0);
        let east_side = LatLngBox { min_lat: 0.0, max_lat: 1.0, min_lng: 172.0, max_lng: 174.0 };
        let west_side = LatLngBox { min_lat: 0.0, max_lat: 1.0, min_lng: -176.0, max_lng: -172.0 };
        let far = LatLngBox { min_lat: 0.0, max_lat: 1.0, min_lng: 0.0, max_lng: 10.0 };
        assert!(box_intersects(&east_side, &window));
        assert!(box_intersects(&west_side, &window));
        assert!(!box_intersects(&far, &window));
    }

    #[test]
    fn latitude_must_overlap() {
        let window = GeoBounds::new(-5.0, -10.0, 5.0, 10.0);
        let north = LatLngBox { min_lat: 6.0, max_lat: 8.0, min_lng: 0.0, max_lng: 1.0 };
        assert!(!box_intersects(&north, &window));
    }

    #[test]
    fn antimeridian_straddling_tile_is_visible() {
        let ring = vec![
            LngLat::new(179.9, 0.0),
            LngLat::new(-179.9, 0.0),
            LngLat::new(-179.9, 1.0),
            LngLat::new(179.9, 1.0),
        ];
        let tile = GridFeature::new("60N", GeometryKind::Polygon, vec![ring]).expect("valid");
        let catalog: GridCatalog = vec![tile].into_iter().collect();

        let windows = replicate_bounds(&GeoBounds::new(-10.0, 170.0, 10.0, -170.0));
        assert_eq!(visible_features(&catalog, &windows).len(), 1);

        // The plain min/max box spans [-179.9, 179.9], so the tile also
        // counts as visible from any view at its latitude.
        let atlantic = replicate_bounds(&GeoBounds::new(-10.0, -30.0, 10.0, -20.0));
        assert_eq!(visible_features(&catalog, &atlantic).len(), 1);
        let north = replicate_bounds(&GeoBounds::new(10.0, -30.0, 20.0, -20.0));
        assert!(visible_features(&catalog, &north).is_empty());
    }

    #[test]
    fn filter_keeps_catalog_order_and_any_part() {
        let far_part = square_tile("x", 100.0, 50.0, 1.0).rings()[0].clone();
        let near_part = square_tile("x", 1.0, 1.0, 1.0).rings()[0].clone();
        let multi = GridFeature::new("31U", GeometryKind::MultiPolygon, vec![far_part, near_part])
            .expect("valid");

        let catalog: GridCatalog = vec![
            square_tile("32T", 3.0, 3.0, 1.0),
            square_tile("10S", -120.0, 35.0, 1.0),
            multi,
        ]
        .into_iter()
        .collect();

        let windows = replicate_bounds(&GeoBounds::new(0.0, 0.0, 10.0, 10.0));
        let names: Vec<&str> = visible_features(&catalog, &windows).into_iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["32T", "31U"]);
    }

    #[test]
    fn tile_seen_through_world_copy() {
        let catalog: GridCatalog = vec![square_tile("01A", -175.0, 0.0, 2.0)].into_iter().collect();
        // Panned one world east: the host reports longitudes around +185.
        let windows = replicate_bounds(&GeoBounds::new(-5.0, 182.0, 5.0, 190.0));
        assert_eq!(visible_features(&catalog, &windows).len(), 1);
    }
}
