//! Field of view engine
//!
//! Owns the map, the viewer and the sub-cell visibility buffer, and recomputes
//! the buffer whenever the viewer moves.

use std::fmt;

use super::octant::Octant;
use super::scanner::Scanner;
use super::subcell::{self, SubCellBuffer};
use crate::world::{Cell, GridMap, Position};

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The viewer now stands on the new cell and visibility was recomputed
    Moved(Position),
    /// Target was off the map or opaque; nothing changed
    Rejected,
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

type MoveListener = Box<dyn FnMut(Position)>;

/// Viewer, map and visibility state for one observer
pub struct FovEngine {
    map: GridMap,
    visibility: SubCellBuffer,
    player: Position,
    visual_range: i32,
    last_frames: usize,
    listeners: Vec<MoveListener>,
}

impl FovEngine {
    pub const DEFAULT_VISUAL_RANGE: i32 = 5;

    /// Create an engine over an all-open map of the given size
    pub fn new(width: i32, height: i32) -> Self {
        Self::from_map(GridMap::new(width, height))
    }

    /// Create an engine over an existing map. The viewer starts at (0, 0) with nothing visible.
    pub fn from_map(map: GridMap) -> Self {
        let visibility = SubCellBuffer::new(map.width(), map.height());
        Self {
            map,
            visibility,
            player: Position::default(),
            visual_range: Self::DEFAULT_VISUAL_RANGE,
            last_frames: 0,
            listeners: Vec::new(),
        }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn width(&self) -> i32 {
        self.map.width()
    }

    pub fn height(&self) -> i32 {
        self.map.height()
    }

    /// Check if a cell coordinate is on the map
    pub fn valid(&self, x: i32, y: i32) -> bool {
        self.map.in_bounds(x, y)
    }

    /// Cell at a coordinate, `None` outside the map
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.map.get(x, y)
    }

    /// Change a cell. Writes outside the map are ignored; visibility is not recomputed.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        self.map.set(x, y, cell);
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn visual_range(&self) -> i32 {
        self.visual_range
    }

    /// Set the radius of sight (at least 1).
    ///
    /// Visibility is left as it is until the next `recompute` or successful move.
    pub fn set_visual_range(&mut self, range: i32) {
        self.visual_range = range.max(1);
    }

    /// Register a callback run after every successful move
    pub fn on_player_moved(&mut self, listener: impl FnMut(Position) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Recalculate which sub-cells the viewer can see
    pub fn recompute(&mut self) {
        self.visibility.clear();
        self.visibility.reveal_all(self.player.x, self.player.y);

        let mut scanner = Scanner::new(
            &self.map,
            &mut self.visibility,
            self.player,
            self.visual_range,
        );
        for octant in Octant::ALL.iter() {
            let before = scanner.frames();
            scanner.scan_octant(octant);
            log::trace!(
                "Octant {} ({}): {} frames",
                octant.number,
                octant.name,
                scanner.frames() - before
            );
        }
        self.last_frames = scanner.frames();

        log::debug!(
            "FOV recomputed at ({}, {}) range {}: {} frames",
            self.player.x,
            self.player.y,
            self.visual_range,
            self.last_frames
        );
    }

    /// Move the viewer by an offset if the target cell is on the map and open
    pub fn move_player(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        let target = self.player.offset(dx, dy);
        self.set_player(target.x, target.y)
    }

    /// Place the viewer on a cell if it is on the map and open
    pub fn set_player(&mut self, x: i32, y: i32) -> MoveOutcome {
        if !self.map.is_open(x, y) {
            log::trace!("Move to ({}, {}) rejected", x, y);
            return MoveOutcome::Rejected;
        }

        self.player = Position::new(x, y);
        self.recompute();

        for listener in self.listeners.iter_mut() {
            listener(self.player);
        }
        MoveOutcome::Moved(self.player)
    }

    /// Visibility of one sub-cell; coordinates outside the buffer are hidden
    pub fn is_sub_cell_visible(&self, sx: i32, sy: i32) -> bool {
        self.visibility.is_visible(sx, sy)
    }

    /// Sub-cells of a cell: top-left, bottom-left, top-right, bottom-right
    pub fn sub_cells_of_cell(&self, x: i32, y: i32) -> [Position; 4] {
        subcell::sub_cells_of_cell(x, y)
    }

    /// Whether any part of a cell is visible
    pub fn is_cell_visible(&self, x: i32, y: i32) -> bool {
        !self.visibility.quadrants_of(x, y).is_empty()
    }

    /// Every cell with at least one visible sub-cell, row by row
    pub fn visible_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for y in 0..self.map.height() {
            for x in 0..self.map.width() {
                if self.is_cell_visible(x, y) {
                    cells.push(Position::new(x, y));
                }
            }
        }
        cells
    }

    pub fn visible_sub_cell_count(&self) -> usize {
        self.visibility.count()
    }

    /// The raw sub-cell buffer from the last recompute
    pub fn visibility(&self) -> &SubCellBuffer {
        &self.visibility
    }

    /// Frames the last recompute expanded
    pub fn last_frame_count(&self) -> usize {
        self.last_frames
    }
}

impl fmt::Debug for FovEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FovEngine")
            .field("width", &self.map.width())
            .field("height", &self.map.height())
            .field("player", &self.player)
            .field("visual_range", &self.visual_range)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
