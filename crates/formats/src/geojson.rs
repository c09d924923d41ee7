use foundation::geo::LngLat;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum VectorGeometry {
    Point(LngLat),
    MultiPoint(Vec<LngLat>),
    LineString(Vec<LngLat>),
    MultiLineString(Vec<Vec<LngLat>>),
    Polygon(Vec<Vec<LngLat>>),
    MultiPolygon(Vec<Vec<Vec<LngLat>>>),
}

impl VectorGeometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            VectorGeometry::Point(_) => "Point",
            VectorGeometry::MultiPoint(_) => "MultiPoint",
            VectorGeometry::LineString(_) => "LineString",
            VectorGeometry::MultiLineString(_) => "MultiLineString",
            VectorGeometry::Polygon(_) => "Polygon",
            VectorGeometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorFeature {
    /// Position in the source `features` array.
    pub index: usize,
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: VectorGeometry,
}

/// A feature left out of a collection, with its position in the source array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFeature {
    pub index: usize,
    pub reason: String,
}

/// Outcome of a lenient collection load.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedFeature>,
}

impl LoadReport {
    pub fn skip(&mut self, index: usize, reason: impl Into<String>) {
        self.skipped.push(SkippedFeature {
            index,
            reason: reason.into(),
        });
    }
}

/// Failures that make a whole payload unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoJsonError {
    Json(String),
    NotAFeatureCollection,
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::Json(msg) => write!(f, "JSON parse error: {msg}"),
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

/// Parses a FeatureCollection, keeping every feature that parses and
/// reporting the rest. Only a malformed payload is an error.
pub fn parse_feature_collection(
    payload: &str,
) -> Result<(Vec<VectorFeature>, LoadReport), GeoJsonError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| GeoJsonError::Json(e.to_string()))?;
    parse_feature_collection_value(&value)
}

pub fn parse_feature_collection_value(
    value: &Value,
) -> Result<(Vec<VectorFeature>, LoadReport), GeoJsonError> {
    let obj = value.as_object().ok_or(GeoJsonError::NotAFeatureCollection)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(GeoJsonError::NotAFeatureCollection)?;
    if ty != "FeatureCollection" {
        return Err(GeoJsonError::NotAFeatureCollection);
    }
    let features_val = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(GeoJsonError::NotAFeatureCollection)?;

    let mut report = LoadReport::default();
    let mut features = Vec::with_capacity(features_val.len());
    for (index, feat_val) in features_val.iter().enumerate() {
        match parse_feature(index, feat_val) {
            Ok(feature) => features.push(feature),
            Err(reason) => report.skip(index, reason),
        }
    }
    report.loaded = features.len();
    Ok((features, report))
}

fn parse_feature(index: usize, value: &Value) -> Result<VectorFeature, String> {
    let feat_obj = value
        .as_object()
        .ok_or("feature must be an object".to_string())?;

    let id = match feat_obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let properties = feat_obj
        .get("properties")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    let geometry_val = match feat_obj.get("geometry") {
        Some(Value::Null) | None => return Err("feature missing geometry".to_string()),
        Some(v) => v,
    };
    let geometry = parse_geometry(geometry_val)?;

    Ok(VectorFeature {
        index,
        id,
        properties,
        geometry,
    })
}

fn parse_geometry(value: &Value) -> Result<VectorGeometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .filter(|v| v.as_array().is_some_and(|arr| !arr.is_empty()))
        .ok_or("geometry has missing or empty coordinates".to_string())?;

    match ty {
        "Point" => parse_position(coords)
            .map(VectorGeometry::Point)
            .ok_or("Point coordinates must have [lon, lat]".to_string()),
        "MultiPoint" => Ok(VectorGeometry::MultiPoint(parse_positions(coords)?)),
        "LineString" => Ok(VectorGeometry::LineString(parse_positions(coords)?)),
        "MultiLineString" => Ok(VectorGeometry::MultiLineString(parse_rings(coords)?)),
        "Polygon" => Ok(VectorGeometry::Polygon(parse_rings(coords)?)),
        "MultiPolygon" => Ok(VectorGeometry::MultiPolygon(parse_multi_polygon(coords)?)),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

/// `[lon, lat, ...]`; positions with fewer than two numeric components are invalid.
fn parse_position(value: &Value) -> Option<LngLat> {
    let arr = value.as_array()?;
    let lon = arr.first()?.as_f64()?;
    let lat = arr.get(1)?.as_f64()?;
    Some(LngLat::new(lon, lat))
}

/// Invalid positions are dropped rather than failing the whole sequence.
fn parse_positions(value: &Value) -> Result<Vec<LngLat>, String> {
    let arr = value
        .as_array()
        .ok_or("coordinates must be an array of positions".to_string())?;
    Ok(arr.iter().filter_map(parse_position).collect())
}

fn parse_rings(value: &Value) -> Result<Vec<Vec<LngLat>>, String> {
    let rings = value
        .as_array()
        .ok_or("coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_positions(ring)?);
    }
    Ok(out)
}

fn parse_multi_polygon(value: &Value) -> Result<Vec<Vec<Vec<LngLat>>>, String> {
    let polys = value
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_rings(poly)?);
    }
    Ok(out)
}
