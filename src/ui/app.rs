//! Main UI Application
//!
//! Turns key presses into engine calls and draws the map with a status panel.

use std::cell::Cell as Counter;
use std::rc::Rc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::map_view::MapView;
use crate::fov::{FovEngine, MoveOutcome};

/// Width of the status panel in columns
const PANEL_WIDTH: u16 = 34;

/// Main UI application
pub struct App {
    /// Successful moves, counted by the engine's move listener
    moves: Rc<Counter<u32>>,
    /// Last status line
    message: String,
}

impl App {
    /// Create the UI and subscribe to the engine's move notifications
    pub fn new(fov: &mut FovEngine) -> Self {
        let moves = Rc::new(Counter::new(0));
        let counter = Rc::clone(&moves);
        fov.on_player_moved(move |pos| {
            counter.set(counter.get() + 1);
            log::debug!("Player moved to ({}, {})", pos.x, pos.y);
        });

        Self {
            moves,
            message: String::from("Explore!"),
        }
    }

    pub fn moves(&self) -> u32 {
        self.moves.get()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input(&mut self, key: KeyEvent, fov: &mut FovEngine) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.try_move(fov, 0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.try_move(fov, 0, 1),
            KeyCode::Left | KeyCode::Char('h') => self.try_move(fov, -1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.try_move(fov, 1, 0),

            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.change_range(fov, 1);
            }
            KeyCode::Char('-') => {
                if fov.visual_range() > 1 {
                    self.change_range(fov, -1);
                } else {
                    self.message = String::from("Range cannot go below 1.");
                }
            }

            KeyCode::Esc | KeyCode::Char('q') => return Ok(true),
            _ => {}
        }

        Ok(false)
    }

    fn try_move(&mut self, fov: &mut FovEngine, dx: i32, dy: i32) {
        match fov.move_player(dx, dy) {
            MoveOutcome::Moved(_) => self.message.clear(),
            MoveOutcome::Rejected => self.message = String::from("Something blocks the way."),
        }
    }

    /// Range changes only take effect once the viewer is placed again
    fn change_range(&mut self, fov: &mut FovEngine, delta: i32) {
        fov.set_visual_range(fov.visual_range().saturating_add(delta));
        let player = fov.player();
        fov.set_player(player.x, player.y);
        self.message = format!("Visual range: {}", fov.visual_range());
    }

    /// Render the whole screen
    pub fn render(&self, frame: &mut Frame, fov: &FovEngine) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(PANEL_WIDTH)])
            .split(frame.area());

        self.render_map(frame, fov, chunks[0]);
        self.render_panel(frame, fov, chunks[1]);
    }

    fn render_map(&self, frame: &mut Frame, fov: &FovEngine, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {}x{} ", fov.width(), fov.height()))
            .border_style(Style::default().fg(Color::Rgb(110, 95, 75)));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(MapView::new(fov), inner);
    }

    fn render_panel(&self, frame: &mut Frame, fov: &FovEngine, area: Rect) {
        let label = Style::default().fg(Color::Gray);
        let value = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let player = fov.player();

        let lines = vec![
            Line::from(Span::styled("Controls", value)),
            Line::from("  Esc / q   exit"),
            Line::from("  arrows    move"),
            Line::from("  + / -     visual range"),
            Line::from(""),
            Line::from(vec![
                Span::styled("Visual range: ", label),
                Span::styled(fov.visual_range().to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Position:     ", label),
                Span::styled(format!("{}, {}", player.x, player.y), value),
            ]),
            Line::from(vec![
                Span::styled("Moves:        ", label),
                Span::styled(self.moves().to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Cells seen:   ", label),
                Span::styled(fov.visible_cells().len().to_string(), value),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                self.message.as_str(),
                Style::default().fg(Color::Rgb(200, 120, 90)),
            )),
        ];

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Quadsight "),
        );
        frame.render_widget(panel, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GridMap;

    fn setup() -> (App, FovEngine) {
        let map = GridMap::from_rows(&["#####", "#...#", "#.#.#", "#...#", "#####"]);
        let mut fov = FovEngine::from_map(map);
        let app = App::new(&mut fov);
        fov.set_player(1, 1);
        (app, fov)
    }

    fn press(app: &mut App, fov: &mut FovEngine, code: KeyCode) -> bool {
        app.handle_input(KeyEvent::new(code, KeyModifiers::NONE), fov)
            .unwrap()
    }

    #[test]
    fn test_movement_keys() {
        let (mut app, mut fov) = setup();
        assert_eq!(app.moves(), 1);

        press(&mut app, &mut fov, KeyCode::Right);
        assert_eq!(fov.player().x, 2);
        press(&mut app, &mut fov, KeyCode::Char('j'));
        // (2, 2) is a wall
        assert_eq!(fov.player().y, 1);
        assert_eq!(app.message(), "Something blocks the way.");
        assert_eq!(app.moves(), 2);
    }

    #[test]
    fn test_range_keys() {
        let (mut app, mut fov) = setup();
        press(&mut app, &mut fov, KeyCode::Char('+'));
        assert_eq!(fov.visual_range(), 6);
        // re-placing the viewer counts as a move notification
        assert_eq!(app.moves(), 2);

        for _ in 0..10 {
            press(&mut app, &mut fov, KeyCode::Char('-'));
        }
        assert_eq!(fov.visual_range(), 1);
        assert_eq!(app.message(), "Range cannot go below 1.");
    }

    #[test]
    fn test_range_key_saturates() {
        let (mut app, mut fov) = setup();
        fov.set_visual_range(i32::MAX);
        press(&mut app, &mut fov, KeyCode::Char('+'));
        assert_eq!(fov.visual_range(), i32::MAX);
        assert!(fov.is_cell_visible(3, 1));
        assert!(!fov.is_cell_visible(3, 3));
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, mut fov) = setup();
        assert!(press(&mut app, &mut fov, KeyCode::Char('q')));
        assert!(press(&mut app, &mut fov, KeyCode::Esc));
        assert!(!press(&mut app, &mut fov, KeyCode::Char('x')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_input(ctrl_c, &mut fov).unwrap());
    }
}
