pub mod coverage;
pub mod grid;
pub mod labels;
pub mod render_mode;
pub mod symbology;
