use foundation::geo::LngLat;
use scene::catalog::{GeometryKind, GridCatalog, GridFeature};
use serde_json::{Map, Value};

use crate::geojson::{
    GeoJsonError, LoadReport, VectorFeature, VectorGeometry, parse_feature_collection,
};

/// Property keys consulted for a display name, first present wins.
pub const NAME_KEYS: [&str; 5] = ["name", "Name", "title", "TITLE", "id"];
/// Display name used when no name key is present.
pub const DEFAULT_GRID_NAME: &str = "Grid";

/// Loads the grid catalog from a GeoJSON FeatureCollection.
///
/// Features that are not (Multi)Polygons, or that have no ring with at least
/// three coordinate pairs, are dropped and listed in the report.
pub fn load_grid_catalog(payload: &str) -> Result<(GridCatalog, LoadReport), GeoJsonError> {
    let (features, mut report) = parse_feature_collection(payload)?;

    let mut catalog = GridCatalog::new();
    for feature in features {
        let index = feature.index;
        match grid_feature(feature) {
            Ok(f) => {
                catalog.push(f);
            }
            Err(reason) => report.skip(index, reason),
        }
    }

    report.skipped.sort_by_key(|s| s.index);
    report.loaded = catalog.len();
    Ok((catalog, report))
}

/// First non-empty string or number under one of [`NAME_KEYS`].
///
/// A key holding a blank string, `null`, a bool, an array or an object counts
/// as absent and the next key is tried.
pub fn resolve_display_name(properties: &Map<String, Value>) -> String {
    for key in NAME_KEYS {
        match properties.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return s.trim().to_string(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    DEFAULT_GRID_NAME.to_string()
}

fn grid_feature(feature: VectorFeature) -> Result<GridFeature, String> {
    let (kind, rings) = match feature.geometry {
        VectorGeometry::Polygon(rings) => (GeometryKind::Polygon, outer_rings(vec![rings])),
        VectorGeometry::MultiPolygon(polys) => (GeometryKind::MultiPolygon, outer_rings(polys)),
        other => {
            return Err(format!(
                "unsupported geometry type for a grid: {}",
                other.type_name()
            ));
        }
    };
    let name = resolve_display_name(&feature.properties);
    GridFeature::new(name, kind, rings).map_err(|e| e.to_string())
}

fn outer_rings(polys: Vec<Vec<Vec<LngLat>>>) -> Vec<Vec<LngLat>> {
    polys
        .into_iter()
        .filter_map(|rings| rings.into_iter().next())
        .filter(|ring| !ring.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_GRID_NAME, load_grid_catalog, resolve_display_name};
    use pretty_assertions::assert_eq;
    use scene::catalog::GeometryKind;
    use serde_json::json;

    const CATALOG: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"Name": "01CCV"},
             "geometry": {"type": "Polygon", "coordinates": [
                 [[-179, 1], [-178, 1], [-178, 2], [-179, 2], [-179, 1]],
                 [[-178.8, 1.2], [-178.6, 1.2], [-178.6, 1.4], [-178.8, 1.2]]
             ]}},
            {"type": "Feature", "properties": {"name": "broken"}, "geometry": null},
            {"type": "Feature", "properties": {"title": "60XWA"},
             "geometry": {"type": "MultiPolygon", "coordinates": [
                 [[[179, 70], [180, 70], [180, 71], [179, 71]]],
                 [[[-180, 70], [-179, 70], [-179, 71], [-180, 71]]]
             ]}},
            {"type": "Feature", "properties": {"name": "line"},
             "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}},
            {"type": "Feature", "properties": {"name": "sliver"},
             "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 1]]]}},
            {"type": "Feature", "properties": {},
             "geometry": {"type": "Polygon", "coordinates": [[[5, 5], [6, 5], [6, 6]]]}}
        ]
    }"#;

    #[test]
    fn loads_polygons_and_reports_the_rest() {
        let (catalog, report) = load_grid_catalog(CATALOG).expect("catalog");
        let names: Vec<&str> = catalog.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["01CCV", "60XWA", DEFAULT_GRID_NAME]);

        assert_eq!(report.loaded, 3);
        let skipped: Vec<usize> = report.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![1, 3, 4]);
    }

    #[test]
    fn keeps_outer_ring_per_part() {
        let (catalog, _) = load_grid_catalog(CATALOG).expect("catalog");
        let first = &catalog.features()[0];
        assert_eq!(first.kind(), GeometryKind::Polygon);
        assert_eq!(first.rings().len(), 1);

        let multi = &catalog.features()[1];
        assert_eq!(multi.kind(), GeometryKind::MultiPolygon);
        assert_eq!(multi.rings().len(), 2);
    }

    #[test]
    fn name_resolution_order() {
        let props = json!({"id": 7, "title": "T", "Name": "  "});
        assert_eq!(resolve_display_name(props.as_object().expect("obj")), "T");

        let props = json!({"id": 7});
        assert_eq!(resolve_display_name(props.as_object().expect("obj")), "7");

        let props = json!({"other": "x"});
        assert_eq!(resolve_display_name(props.as_object().expect("obj")), "Grid");
    }

    #[test]
    fn unusable_name_values_fall_through_to_later_keys() {
        let props = json!({"name": {"en": "x"}, "Name": null, "title": ["a"], "TITLE": true, "id": "42LMN"});
        assert_eq!(resolve_display_name(props.as_object().expect("obj")), "42LMN");

        let props = json!({"name": "\t", "id": null});
        assert_eq!(resolve_display_name(props.as_object().expect("obj")), "Grid");
    }
}
