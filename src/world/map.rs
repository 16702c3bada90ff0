//! Map data structure
//!
//! The fixed-size 2D grid of open and opaque cells that sight is cast over.

use std::fmt;

use super::position::Position;
use super::tile::Cell;

/// A rectangular grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Longest side a map may have; the sub-cell grid doubles it
    pub const MAX_SIDE: i32 = i32::MAX / 2;

    /// Create a new map filled with open cells. Sides are clamped to `0..=MAX_SIDE`.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.clamp(0, Self::MAX_SIDE);
        let height = height.clamp(0, Self::MAX_SIDE);
        Self {
            width,
            height,
            cells: vec![Cell::Open; width as usize * height as usize],
        }
    }

    /// Build a map from text rows (`#` = opaque). Short rows are padded with open cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut map = Self::new(width, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                map.set(x as i32, y as i32, Cell::from_glyph(ch));
            }
        }
        map
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let width = self.width as usize;
        ((idx % width) as i32, (idx / width) as i32)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get the cell at a position, `None` outside the map
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Set the cell at a position. Writes outside the map are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.cells[idx] = cell;
        }
    }

    /// True only for in-bounds open cells
    #[inline]
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|c| c.is_open())
    }

    /// True only for in-bounds opaque cells
    #[inline]
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|c| c.is_opaque())
    }

    /// Opaque, or past the edge of the map
    #[inline]
    pub fn blocks_sight(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(true, |c| c.is_opaque())
    }

    /// Get all open positions
    pub fn open_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_open())
            .map(|(idx, _)| {
                let (x, y) = self.idx_to_xy(idx);
                Position::new(x, y)
            })
            .collect()
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.cells[self.xy_to_idx(x, y)].glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
