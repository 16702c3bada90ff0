//! Terminal user interface
//!
//! Input handling and rendering for the demo, built on ratatui.

pub mod app;
pub mod map_view;

pub use app::App;
pub use map_view::MapView;
