//! Crossterm terminal driver for gridway.
//!
//! Provides [`TermDriver`], the concrete render sink and input source for
//! the visualiser: it paints a [`Board`] as coloured blocks and decodes
//! mouse/keyboard events into [`InputEvent`]s. Cell state tags are mapped
//! to colours here, at the display boundary — the model knows nothing about
//! colours.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};

use gridway_core::{Board, CellState, Coord};

/// A decoded input event, one step above raw terminal events and one step
/// below the application's command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary button pressed or dragged over a cell.
    Click(Coord),
    /// Secondary button pressed or dragged over a cell.
    RightClick(Coord),
    /// A printable key.
    Key(char),
    /// Terminal-level quit request (Escape or Ctrl+C).
    Quit,
}

/// Background colour for a cell state tag.
///
/// The palette follows the classic visualiser convention: green frontier,
/// red closed set, purple path, orange/turquoise endpoints.
fn state_color(state: CellState) -> Color {
    match state {
        CellState::Empty => Color::Rgb {
            r: 255,
            g: 255,
            b: 255,
        },
        CellState::Barrier => Color::Rgb { r: 0, g: 0, b: 0 },
        CellState::Start => Color::Rgb {
            r: 255,
            g: 200,
            b: 0,
        },
        CellState::End => Color::Rgb {
            r: 0,
            g: 255,
            b: 255,
        },
        CellState::Open => Color::Rgb { r: 0, g: 255, b: 0 },
        CellState::Closed => Color::Rgb { r: 255, g: 0, b: 0 },
        CellState::Path => Color::Rgb {
            r: 255,
            g: 0,
            b: 255,
        },
    }
}

/// A terminal back-end painting the board and polling for input.
pub struct TermDriver {
    /// Terminal columns per board cell; one terminal row per board row.
    cell_width: u16,
    mouse_enabled: bool,
}

impl TermDriver {
    /// Create a new driver rendering each cell `cell_width` columns wide.
    pub fn new(cell_width: u16) -> Self {
        Self {
            cell_width: cell_width.max(1),
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    /// Restore the terminal. Errors during teardown are ignored.
    pub fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }

    /// Synchronously repaint the whole board. Must not (and cannot) mutate
    /// the board; it only reads cell states.
    pub fn present(&mut self, board: &Board) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        let blank = " ".repeat(self.cell_width as usize);
        for row in 0..board.size() {
            for col in 0..board.size() {
                // In-bounds by construction, Empty only as a fallback.
                let state = board
                    .state(Coord::new(row, col))
                    .unwrap_or(CellState::Empty);
                queue!(stdout, SetBackgroundColor(state_color(state)), Print(&blank))?;
            }
            queue!(stdout, ResetColor, cursor::MoveToNextLine(1))?;
        }
        stdout.flush()
    }

    /// Poll for one input event, waiting at most `timeout`.
    ///
    /// Events that do not decode to an [`InputEvent`] (releases, wheel,
    /// clicks outside the board) are swallowed and reported as `None`.
    pub fn poll_input(&mut self, board_size: i32, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let ev = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc => Some(InputEvent::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::Quit)
                }
                KeyCode::Char(c) => Some(InputEvent::Key(c)),
                _ => None,
            },
            Event::Mouse(mouse) => self.decode_mouse(board_size, mouse),
            _ => None,
        };
        Ok(ev)
    }

    fn decode_mouse(&self, board_size: i32, mouse: MouseEvent) -> Option<InputEvent> {
        let button = match mouse.kind {
            MouseEventKind::Down(b) | MouseEventKind::Drag(b) => b,
            _ => return None,
        };
        let cell = self.cell_at(board_size, mouse.column, mouse.row)?;
        match button {
            MouseButton::Left => Some(InputEvent::Click(cell)),
            MouseButton::Right => Some(InputEvent::RightClick(cell)),
            MouseButton::Middle => None,
        }
    }

    /// Map a terminal position to a board coordinate, or `None` outside the
    /// painted area. Out-of-board positions never reach the model.
    fn cell_at(&self, board_size: i32, column: u16, row: u16) -> Option<Coord> {
        let c = Coord::new(i32::from(row), i32::from(column / self.cell_width));
        if c.row < board_size && c.col < board_size {
            Some(c)
        } else {
            log::debug!("discarding click outside the board at {c}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_mapping_uses_cell_width() {
        let d = TermDriver::new(2);
        assert_eq!(d.cell_at(25, 0, 0), Some(Coord::new(0, 0)));
        assert_eq!(d.cell_at(25, 5, 3), Some(Coord::new(3, 2)));
        assert_eq!(d.cell_at(25, 49, 24), Some(Coord::new(24, 24)));
        // One past the painted area in either axis.
        assert_eq!(d.cell_at(25, 50, 0), None);
        assert_eq!(d.cell_at(25, 0, 25), None);
    }

    #[test]
    fn zero_cell_width_is_clamped() {
        let d = TermDriver::new(0);
        assert_eq!(d.cell_width, 1);
    }
}
