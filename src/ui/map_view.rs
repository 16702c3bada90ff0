//! Map widget
//!
//! Draws the sub-cell buffer at full resolution: every map cell takes two
//! terminal columns, and each character stacks two sub-cells with the upper
//! half block (top sub-cell in the foreground, bottom one in the background).

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::fov::FovEngine;
use crate::world::{Cell, Position};

const HALF_BLOCK: char = '▀';

const HIDDEN: Color = Color::Rgb(8, 8, 10);
const OFF_MAP: Color = Color::Rgb(3, 3, 4);
const PLAYER: Color = Color::Rgb(255, 210, 60);

/// Colour of one sub-cell
pub fn sub_cell_color(fov: &FovEngine, sx: i32, sy: i32) -> Color {
    let (x, y) = (sx.div_euclid(2), sy.div_euclid(2));
    let Some(cell) = fov.cell(x, y) else {
        return OFF_MAP;
    };

    if fov.player() == Position::new(x, y) {
        return PLAYER;
    }
    if !fov.is_sub_cell_visible(sx, sy) {
        return HIDDEN;
    }

    let (r, g, b) = match cell {
        Cell::Open => {
            let (r, g, b) = cell.fg_color();
            (r / 2, g / 2, b / 2)
        }
        Cell::Opaque => cell.fg_color(),
    };
    Color::Rgb(r, g, b)
}

/// Viewport onto the engine, centred on the viewer
pub struct MapView<'a> {
    fov: &'a FovEngine,
}

impl<'a> MapView<'a> {
    pub fn new(fov: &'a FovEngine) -> Self {
        Self { fov }
    }

    /// Top-left map cell shown in an area of the given size
    pub fn camera(&self, area: Rect) -> Position {
        let cells_wide = (area.width / 2) as i32;
        let cells_high = area.height as i32;
        let player = self.fov.player();
        Position::new(player.x - cells_wide / 2, player.y - cells_high / 2)
    }
}

impl Widget for MapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let camera = self.camera(area);

        for row in 0..area.height {
            let y = camera.y + row as i32;
            for col in 0..area.width {
                let sx = 2 * camera.x + col as i32;

                let top = sub_cell_color(self.fov, sx, 2 * y);
                let bottom = sub_cell_color(self.fov, sx, 2 * y + 1);

                let cell = &mut buf[(area.x + col, area.y + row)];
                cell.set_char(HALF_BLOCK);
                cell.set_fg(top);
                cell.set_bg(bottom);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GridMap;

    fn engine() -> FovEngine {
        let map = GridMap::from_rows(&[".....", "..#..", ".....", ".....", "....."]);
        let mut fov = FovEngine::from_map(map);
        fov.set_player(2, 2);
        fov
    }

    #[test]
    fn test_sub_cell_colors() {
        let fov = engine();
        assert_eq!(sub_cell_color(&fov, 4, 4), PLAYER);
        assert_eq!(sub_cell_color(&fov, -1, 0), OFF_MAP);
        assert_eq!(sub_cell_color(&fov, 10, 0), OFF_MAP);
        // back face of the wall north of the viewer
        assert_eq!(sub_cell_color(&fov, 4, 2), HIDDEN);
        assert_eq!(sub_cell_color(&fov, 4, 3), Color::Rgb(170, 145, 115));
    }

    #[test]
    fn test_render_centres_on_player() {
        let fov = engine();
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        MapView::new(&fov).render(area, &mut buf);

        // the viewer's cell lands in the middle row, columns 4 and 5
        assert_eq!(buf[(4, 2)].fg, PLAYER);
        assert_eq!(buf[(5, 2)].bg, PLAYER);
        assert_eq!(buf[(0, 0)].symbol(), HALF_BLOCK.to_string());
    }
}
