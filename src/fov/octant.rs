//! Octant definitions
//!
//! ```text
//!    \ 1 | 2 /
//!   8 \  |  / 3
//!   -----+-----
//!   7 /  |  \ 4
//!    / 6 | 5 \
//! ```
//!
//! Each octant is scanned in a local frame: the *primary* coordinate moves away from
//! the viewer one step per depth, the *secondary* coordinate is swept from the outer
//! (diagonal) edge of the wedge back toward the centerline.

use super::subcell::{Quadrant, QuadrantSet, Side};

/// Axis along which depth increases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Rows: depth moves along y, the sweep along x
    Vertical,
    /// Columns: depth moves along x, the sweep along y
    Horizontal,
}

/// One 45 degree wedge of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Octant {
    /// 1..=8, clockwise from north-north-west
    pub number: u8,
    pub name: &'static str,
    pub axis: Axis,
    /// Sign of the primary step away from the viewer
    pub primary_step: i32,
    /// Side of the centerline the wedge lies on (sign of the secondary offset)
    pub side: i32,
    /// Quadrant facing away from the viewer, never lit on a wall
    pub hidden_corner: Quadrant,
    /// Quadrant hidden when the neighbour on the given side blocks sight
    pub occluders: [(Side, Quadrant); 2],
}

impl Octant {
    /// All octants in scan order
    pub const ALL: [Octant; 8] = [
        Octant {
            number: 1,
            name: "NNW",
            axis: Axis::Vertical,
            primary_step: -1,
            side: -1,
            hidden_corner: Quadrant::TopLeft,
            occluders: [(Side::Right, Quadrant::TopRight), (Side::Bottom, Quadrant::BottomLeft)],
        },
        Octant {
            number: 2,
            name: "NNE",
            axis: Axis::Vertical,
            primary_step: -1,
            side: 1,
            hidden_corner: Quadrant::TopRight,
            occluders: [(Side::Left, Quadrant::TopLeft), (Side::Bottom, Quadrant::BottomRight)],
        },
        Octant {
            number: 3,
            name: "ENE",
            axis: Axis::Horizontal,
            primary_step: 1,
            side: -1,
            hidden_corner: Quadrant::TopRight,
            occluders: [(Side::Left, Quadrant::TopLeft), (Side::Bottom, Quadrant::BottomRight)],
        },
        Octant {
            number: 4,
            name: "ESE",
            axis: Axis::Horizontal,
            primary_step: 1,
            side: 1,
            hidden_corner: Quadrant::BottomRight,
            occluders: [(Side::Left, Quadrant::BottomLeft), (Side::Top, Quadrant::TopRight)],
        },
        Octant {
            number: 5,
            name: "SSE",
            axis: Axis::Vertical,
            primary_step: 1,
            side: 1,
            hidden_corner: Quadrant::BottomRight,
            occluders: [(Side::Left, Quadrant::BottomLeft), (Side::Top, Quadrant::TopRight)],
        },
        Octant {
            number: 6,
            name: "SSW",
            axis: Axis::Vertical,
            primary_step: 1,
            side: -1,
            hidden_corner: Quadrant::BottomLeft,
            occluders: [(Side::Right, Quadrant::BottomRight), (Side::Top, Quadrant::TopLeft)],
        },
        Octant {
            number: 7,
            name: "WSW",
            axis: Axis::Horizontal,
            primary_step: -1,
            side: 1,
            hidden_corner: Quadrant::BottomLeft,
            occluders: [(Side::Right, Quadrant::BottomRight), (Side::Top, Quadrant::TopLeft)],
        },
        Octant {
            number: 8,
            name: "WNW",
            axis: Axis::Horizontal,
            primary_step: -1,
            side: -1,
            hidden_corner: Quadrant::TopLeft,
            occluders: [(Side::Right, Quadrant::TopRight), (Side::Bottom, Quadrant::BottomLeft)],
        },
    ];

    /// Slopes are taken as secondary spread per primary step
    pub fn inverted_slope(&self) -> bool {
        self.axis == Axis::Horizontal
    }

    /// Secondary step of the sweep, toward the centerline
    pub fn sweep_step(&self) -> i32 {
        -self.side
    }

    /// +1 when raw slopes inside the wedge are positive, -1 when negative.
    ///
    /// Start slopes are kept as magnitudes, end slopes as raw values, so this sign
    /// picks both the sweep comparison and the sign fix-up of a tightened start.
    pub fn orientation(&self) -> i32 {
        self.side * self.primary_step
    }

    /// Whether a cell at raw slope `slope` is still inside the interval ending at `end`
    pub fn within(&self, slope: f64, end: f64) -> bool {
        if self.orientation() > 0 {
            slope >= end
        } else {
            slope <= end
        }
    }

    /// Map local (primary, secondary) coordinates to (x, y)
    #[inline]
    pub fn to_xy<T>(&self, primary: T, secondary: T) -> (T, T) {
        match self.axis {
            Axis::Vertical => (secondary, primary),
            Axis::Horizontal => (primary, secondary),
        }
    }

    /// Map (x, y) to local (primary, secondary) coordinates
    #[inline]
    pub fn to_local<T>(&self, x: T, y: T) -> (T, T) {
        match self.axis {
            Axis::Vertical => (y, x),
            Axis::Horizontal => (x, y),
        }
    }

    /// The wall face turned away from a viewer standing on the centerline
    pub fn far_side(&self) -> Side {
        match (self.axis, self.primary_step < 0) {
            (Axis::Vertical, true) => Side::Top,
            (Axis::Vertical, false) => Side::Bottom,
            (Axis::Horizontal, true) => Side::Left,
            (Axis::Horizontal, false) => Side::Right,
        }
    }

    /// Quadrants of a wall that can never be lit from this octant
    pub fn always_hidden(&self, on_centerline: bool) -> QuadrantSet {
        let hidden = QuadrantSet::EMPTY.with(self.hidden_corner);
        if on_centerline {
            hidden.union(self.far_side().quadrants())
        } else {
            hidden
        }
    }
}
