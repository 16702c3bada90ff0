//! Text map loader
//!
//! Reads plain-text maps: one line per row, `#` is a wall, any other
//! character is floor. Every row must be as wide as the first.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::world::{Cell, GridMap, Position};

/// Errors raised while loading a map
#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("empty map file")]
    Empty,

    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("map is {width}x{height} cells, larger than supported")]
    TooLarge { width: usize, height: usize },

    #[error("map has no open cell to start on")]
    NoOpenCell,
}

/// Check parsed dimensions against the largest grid the engine can index
fn checked_size(width: usize, height: usize) -> Result<(i32, i32), MapLoadError> {
    let limit = GridMap::MAX_SIDE as usize;
    if width > limit || height > limit {
        return Err(MapLoadError::TooLarge { width, height });
    }
    Ok((width as i32, height as i32))
}

/// Parse map text into a grid
pub fn parse_map(text: &str) -> Result<GridMap, MapLoadError> {
    let rows: Vec<&str> = text.lines().collect();
    let Some(first) = rows.first() else {
        return Err(MapLoadError::Empty);
    };

    let expected = first.chars().count();
    if expected == 0 {
        return Err(MapLoadError::Empty);
    }

    let (width, height) = checked_size(expected, rows.len())?;
    let mut map = GridMap::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != expected {
            return Err(MapLoadError::Ragged {
                row: y,
                expected,
                found,
            });
        }
        for (x, ch) in row.chars().enumerate() {
            map.set(x as i32, y as i32, Cell::from_glyph(ch));
        }
    }

    log::debug!("Parsed {}x{} map", map.width(), map.height());
    Ok(map)
}

/// Load a map from a text file
pub fn load_map(path: &Path) -> Result<GridMap, MapLoadError> {
    let text = fs::read_to_string(path).map_err(|source| MapLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse_map(&text)?;
    log::info!(
        "Loaded map {} ({}x{})",
        path.display(),
        map.width(),
        map.height()
    );
    Ok(map)
}

/// First open cell, scanning column by column from the top-left corner
pub fn first_open_cell(map: &GridMap) -> Option<Position> {
    (0..map.width())
        .flat_map(|x| (0..map.height()).map(move |y| Position::new(x, y)))
        .find(|p| map.is_open(p.x, p.y))
}

/// Load a map and pick the viewer's starting cell
pub fn load_map_with_start(path: &Path) -> Result<(GridMap, Position), MapLoadError> {
    let map = load_map(path)?;
    let start = first_open_cell(&map).ok_or(MapLoadError::NoOpenCell)?;
    Ok((map, start))
}
