use foundation::geo::LatLng;
use serde::Serialize;

use crate::catalog::{FeatureId, GridCatalog};

/// Maximum number of hits returned by [`SearchIndex::search`].
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry {
    /// Uppercased display name, the key substring queries run against.
    pub normalized_name: String,
    pub display_name: String,
    pub centroid: LatLng,
    pub feature: FeatureId,
}

/// Case-insensitive substring index over feature names.
///
/// Built once per catalog. Features without a centroid are not indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    limit: usize,
}

impl SearchIndex {
    pub fn build(catalog: &GridCatalog) -> Self {
        let entries = catalog
            .iter()
            .filter_map(|f| {
                let centroid = f.centroid()?;
                Some(SearchEntry {
                    normalized_name: f.name().to_uppercase(),
                    display_name: f.name().to_string(),
                    centroid,
                    feature: f.id(),
                })
            })
            .collect();
        Self {
            entries,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entries whose name contains the trimmed query, in catalog order.
    ///
    /// An empty (or all-whitespace) query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        let needle = query.trim().to_uppercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| e.normalized_name.contains(&needle))
            .take(self.limit)
            .collect()
    }

    /// Exact display-name match; the first entry in catalog order wins.
    pub fn lookup_by_display_name(&self, name: &str) -> Option<&SearchEntry> {
        self.entries.iter().find(|e| e.display_name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
