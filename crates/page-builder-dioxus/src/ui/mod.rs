mod app;
pub mod components;
mod geometry;
mod keymap;
mod state;

pub use app::App;
pub use state::{BuilderState, UiSettings, use_builder_state};
