pub mod catalog;
pub mod search;
pub mod visibility;

pub use catalog::*;
pub use search::*;
pub use visibility::*;
