use foundation::bounds::LatLngBox;
use foundation::geo::{LatLng, LngLat};
use foundation::geometry::{self, is_valid_ring};
use serde::{Deserialize, Serialize};

/// Position of a feature in its catalog. Stable for the catalog's lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeatureId(pub u32);

impl FeatureId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    NoRings,
    /// Every ring has fewer than three coordinate pairs.
    DegenerateRings,
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::NoRings => write!(f, "geometry has no rings"),
            GeometryError::DegenerateRings => {
                write!(f, "no ring has at least 3 coordinate pairs")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// One grid tile of the catalog.
///
/// `rings` holds the outer ring of every polygon part, in source order.
/// Holes are not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFeature {
    id: FeatureId,
    name: String,
    kind: GeometryKind,
    rings: Vec<Vec<LngLat>>,
}

impl GridFeature {
    /// Validates the geometry; the id is assigned when the feature joins a catalog.
    pub fn new(
        name: impl Into<String>,
        kind: GeometryKind,
        rings: Vec<Vec<LngLat>>,
    ) -> Result<Self, GeometryError> {
        if rings.is_empty() {
            return Err(GeometryError::NoRings);
        }
        if !rings.iter().any(|r| is_valid_ring(r)) {
            return Err(GeometryError::DegenerateRings);
        }
        Ok(Self {
            id: FeatureId(0),
            name: name.into(),
            kind,
            rings,
        })
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// Display name resolved at load time.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn rings(&self) -> &[Vec<LngLat>] {
        &self.rings
    }

    /// Bounding box per polygon part. Empty rings yield nothing.
    pub fn part_boxes(&self) -> impl Iterator<Item = LatLngBox> + '_ {
        self.rings.iter().filter_map(|ring| geometry::bounding_box(ring))
    }

    pub fn centroid(&self) -> Option<LatLng> {
        geometry::centroid(&self.rings)
    }
}

/// Immutable, ordered set of grid features loaded from one dataset.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GridCatalog {
    features: Vec<GridFeature>,
}

impl GridCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mut feature: GridFeature) -> FeatureId {
        let id = FeatureId(self.features.len() as u32);
        feature.id = id;
        self.features.push(feature);
        id
    }

    pub fn get(&self, id: FeatureId) -> Option<&GridFeature> {
        self.features.get(id.index())
    }

    pub fn features(&self) -> &[GridFeature] {
        &self.features
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridFeature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<GridFeature> for GridCatalog {
    fn from_iter<I: IntoIterator<Item = GridFeature>>(iter: I) -> Self {
        let mut catalog = GridCatalog::new();
        for f in iter {
            catalog.push(f);
        }
        catalog
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{GeometryKind, GridFeature};
    use foundation::geo::LngLat;

    /// Axis-aligned square tile with its south-west corner at `(lng, lat)`.
    pub fn square_tile(name: &str, lng: f64, lat: f64, size: f64) -> GridFeature {
        let ring = vec![
            LngLat::new(lng, lat),
            LngLat::new(lng + size, lat),
            LngLat::new(lng + size, lat + size),
            LngLat::new(lng, lat + size),
            LngLat::new(lng, lat),
        ];
        GridFeature::new(name, GeometryKind::Polygon, vec![ring]).expect("valid tile")
    }
}
