pub mod codec;
pub mod dom;
pub mod editing;
pub mod indicator;
pub mod io;
pub mod models;
pub mod registry;
pub mod render;
pub mod seed;
pub mod store;

// Re-export key types for easier usage
pub use editing::*;
pub use indicator::{Guide, IndicatorSettings, Point, Rect};
pub use io::*;
pub use models::*;
pub use registry::{HandleRole, RenderHandle, RenderRegistry, Visibility};
pub use render::{MissingBlockPolicy, RenderError, RenderNode, RenderOptions, render};
pub use store::BlockStore;
