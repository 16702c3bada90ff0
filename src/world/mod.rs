//! World module
//!
//! Contains the grid map, its cells and coordinates.

pub mod map;
pub mod position;
pub mod tile;

pub use map::GridMap;
pub use position::Position;
pub use tile::Cell;
