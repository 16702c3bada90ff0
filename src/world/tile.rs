//! Cell definitions
//!
//! A grid cell either lets sight through or blocks it.

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Transparent and walkable
    #[default]
    Open,
    /// Blocks line of sight and movement
    Opaque,
}

impl Cell {
    pub fn is_open(&self) -> bool {
        matches!(self, Cell::Open)
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Cell::Opaque)
    }

    /// Parse a map character: `#` is a wall, anything else is floor
    pub fn from_glyph(ch: char) -> Self {
        if ch == '#' {
            Cell::Opaque
        } else {
            Cell::Open
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Opaque => '#',
        }
    }

    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            Cell::Open => (110, 105, 95),
            Cell::Opaque => (170, 145, 115),
        }
    }
}
