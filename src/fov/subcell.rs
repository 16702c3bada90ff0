//! Sub-cell visibility buffer
//!
//! Every grid cell is split into four quadrants so that partially lit walls can be
//! drawn at twice the map resolution. Cell `(x, y)` owns sub-cells `(2x, 2y)` through
//! `(2x + 1, 2y + 1)`; increasing y is "down".

use crate::world::Position;

/// One quarter of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

impl Quadrant {
    /// All quadrants in sub-cell query order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::BottomLeft,
        Quadrant::TopRight,
        Quadrant::BottomRight,
    ];

    /// Offset of this quadrant from the cell's top-left sub-cell
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Quadrant::TopLeft => (0, 0),
            Quadrant::BottomLeft => (0, 1),
            Quadrant::TopRight => (1, 0),
            Quadrant::BottomRight => (1, 1),
        }
    }

    /// Sub-cell coordinate of this quadrant of cell `(x, y)`
    pub fn sub_cell_of(&self, x: i32, y: i32) -> Position {
        let (dx, dy) = self.offset();
        Position::new(2 * x + dx, 2 * y + dy)
    }

    fn bit(&self) -> u8 {
        match self {
            Quadrant::TopLeft => 0b0001,
            Quadrant::BottomLeft => 0b0010,
            Quadrant::TopRight => 0b0100,
            Quadrant::BottomRight => 0b1000,
        }
    }
}

/// A side of a cell, naming both a neighbour direction and the two quadrants along it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Step from a cell to its neighbour on this side
    pub fn step(&self) -> (i32, i32) {
        match self {
            Side::Left => (-1, 0),
            Side::Right => (1, 0),
            Side::Top => (0, -1),
            Side::Bottom => (0, 1),
        }
    }

    /// The two quadrants lying along this side
    pub fn quadrants(&self) -> QuadrantSet {
        match self {
            Side::Left => QuadrantSet::of(&[Quadrant::TopLeft, Quadrant::BottomLeft]),
            Side::Right => QuadrantSet::of(&[Quadrant::TopRight, Quadrant::BottomRight]),
            Side::Top => QuadrantSet::of(&[Quadrant::TopLeft, Quadrant::TopRight]),
            Side::Bottom => QuadrantSet::of(&[Quadrant::BottomLeft, Quadrant::BottomRight]),
        }
    }
}

/// A small set of quadrants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuadrantSet(u8);

impl QuadrantSet {
    pub const EMPTY: QuadrantSet = QuadrantSet(0);
    pub const FULL: QuadrantSet = QuadrantSet(0b1111);

    pub fn of(quadrants: &[Quadrant]) -> Self {
        quadrants
            .iter()
            .fold(Self::EMPTY, |set, q| set.with(*q))
    }

    pub fn with(self, quadrant: Quadrant) -> Self {
        Self(self.0 | quadrant.bit())
    }

    pub fn without(self, quadrant: Quadrant) -> Self {
        Self(self.0 & !quadrant.bit())
    }

    pub fn union(self, other: QuadrantSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn difference(self, other: QuadrantSet) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn contains(&self, quadrant: Quadrant) -> bool {
        self.0 & quadrant.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Quadrant> + '_ {
        Quadrant::ALL.into_iter().filter(move |q| self.contains(*q))
    }
}

/// Visibility flags at twice the width and height of the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCellBuffer {
    width: i32,
    height: i32,
    visible: Vec<bool>,
}

impl SubCellBuffer {
    /// Buffer for a map of `map_width` x `map_height` cells, all hidden
    pub fn new(map_width: i32, map_height: i32) -> Self {
        let width = map_width.max(0).saturating_mul(2);
        let height = map_height.max(0).saturating_mul(2);
        Self {
            width,
            height,
            visible: vec![false; width as usize * height as usize],
        }
    }

    /// Width in sub-cells
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in sub-cells
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn in_bounds(&self, sx: i32, sy: i32) -> bool {
        sx >= 0 && sx < self.width && sy >= 0 && sy < self.height
    }

    #[inline]
    fn index(&self, sx: i32, sy: i32) -> usize {
        sy as usize * self.width as usize + sx as usize
    }

    /// Hide every sub-cell
    pub fn clear(&mut self) {
        self.visible.fill(false);
    }

    /// Visibility of one sub-cell; anything outside the buffer is hidden
    pub fn is_visible(&self, sx: i32, sy: i32) -> bool {
        self.in_bounds(sx, sy) && self.visible[self.index(sx, sy)]
    }

    fn mark(&mut self, sx: i32, sy: i32) {
        if self.in_bounds(sx, sy) {
            let idx = self.index(sx, sy);
            self.visible[idx] = true;
        }
    }

    /// Mark the given quadrants of cell `(x, y)` visible
    pub fn reveal(&mut self, x: i32, y: i32, quadrants: QuadrantSet) {
        for quadrant in quadrants.iter() {
            let p = quadrant.sub_cell_of(x, y);
            self.mark(p.x, p.y);
        }
    }

    /// Mark all four quadrants of cell `(x, y)` visible
    pub fn reveal_all(&mut self, x: i32, y: i32) {
        self.reveal(x, y, QuadrantSet::FULL);
    }

    /// Which quadrants of cell `(x, y)` are visible
    pub fn quadrants_of(&self, x: i32, y: i32) -> QuadrantSet {
        Quadrant::ALL
            .into_iter()
            .filter(|q| {
                let p = q.sub_cell_of(x, y);
                self.is_visible(p.x, p.y)
            })
            .fold(QuadrantSet::EMPTY, |set, q| set.with(q))
    }

    /// Number of visible sub-cells
    pub fn count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }
}

/// The four sub-cells of cell `(x, y)`: top-left, bottom-left, top-right, bottom-right
pub fn sub_cells_of_cell(x: i32, y: i32) -> [Position; 4] {
    Quadrant::ALL.map(|q| q.sub_cell_of(x, y))
}
