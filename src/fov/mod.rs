//! Field of view
//!
//! Recursive shadowcasting over eight octants, tracking visibility per cell
//! quadrant so that wall faces can be lit partially.

pub mod engine;
pub mod geometry;
pub mod octant;
pub mod scanner;
pub mod subcell;

pub use engine::{FovEngine, MoveOutcome};
pub use octant::Octant;
pub use subcell::{sub_cells_of_cell, Quadrant, QuadrantSet, SubCellBuffer};
