//! Quadsight - field of view at sub-cell resolution
//!
//! Recursive shadowcasting over a grid of open and opaque cells that tracks
//! which quarter of each cell the viewer can see, so wall faces light up
//! partially instead of all or nothing.

pub mod data;
pub mod fov;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use fov::{FovEngine, MoveOutcome};
pub use world::{Cell, GridMap, Position};
