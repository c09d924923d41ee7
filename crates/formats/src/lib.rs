pub mod coverage;
pub mod geojson;
pub mod grid_catalog;

pub use coverage::*;
pub use geojson::*;
pub use grid_catalog::*;
