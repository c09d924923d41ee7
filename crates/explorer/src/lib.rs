pub mod config;
pub mod error;
pub mod host;
pub mod render;
pub mod session;

pub use config::ExplorerConfig;
pub use error::ExplorerError;
pub use host::{MapEvent, RenderSink, ViewportProvider};
pub use render::{RenderPass, compute_pass};
pub use session::{SearchHit, SearchResults, ViewportSession};
