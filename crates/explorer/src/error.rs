use formats::geojson::GeoJsonError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    /// The grid catalog could not be loaded; exploring is unavailable.
    Catalog(GeoJsonError),
    /// A selected search result names no indexed feature.
    UnknownResult(String),
    /// The session was disposed.
    Disposed,
}

impl std::fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExplorerError::Catalog(err) => write!(f, "grid catalog unavailable: {err}"),
            ExplorerError::UnknownResult(name) => write!(f, "no grid named {name:?}"),
            ExplorerError::Disposed => write!(f, "session disposed"),
        }
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExplorerError::Catalog(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeoJsonError> for ExplorerError {
    fn from(err: GeoJsonError) -> Self {
        ExplorerError::Catalog(err)
    }
}
