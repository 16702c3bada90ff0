//! Grid coordinates

/// A cell (or sub-cell) coordinate on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This position shifted by an offset
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(Position::new(3, 4).offset(-1, 2), Position::new(2, 6));
    }

    #[test]
    fn test_from_tuple() {
        let p: Position = (7, -2).into();
        assert_eq!(p, Position::new(7, -2));
    }
}
