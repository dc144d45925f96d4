//! Crossterm terminal driver for the pathfinding visualizer.
//!
//! [`CrosstermDriver`] implements [`pathviz_core::Driver`]: it paints board
//! labels as two-column blocks, shows the status line and a key legend under
//! the board, and turns terminal keys and mouse events into [`Msg`]s with
//! board coordinates.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{
    Label, Point,
    app::{Context, Driver},
    grid::Frame,
    messages::{Key, Msg, MouseAction},
};

/// Terminal columns used by one board cell.
pub const CELL_WIDTH: u16 = 2;

/// Key help shown under the status line.
pub const LEGEND: &str = "1-4 algorithm  r run  c clear  w walls  m maze  g generate  f/a/s speed  q quit";

/// Glyph and colours for a label.
fn label_style(label: Label) -> (&'static str, Color, Color) {
    match label {
        Label::None => ("  ", Color::Reset, Color::Reset),
        Label::Start => ("S>", Color::Black, Color::Green),
        Label::Finish => ("()", Color::Black, Color::Red),
        Label::Wall => ("##", Color::DarkGrey, Color::DarkGrey),
        Label::Visited => ("  ", Color::Reset, Color::DarkCyan),
        Label::ShortestPath => ("**", Color::Black, Color::Yellow),
    }
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Board cell under terminal position (`column`, `row`).
fn to_board(column: u16, row: u16) -> Point {
    Point::new(row as i32, (column / CELL_WIDTH) as i32)
}

/// Terminal position (`column`, `row`) of the left half of board cell `p`,
/// or `None` when it does not fit in terminal coordinates.
fn to_screen(p: Point) -> Option<(u16, u16)> {
    let row = u16::try_from(p.row).ok()?;
    let col = u16::try_from(p.col).ok()?.checked_mul(CELL_WIDTH)?;
    Some((col, row))
}

fn mouse_msg(me: MouseEvent) -> Option<Msg> {
    let action = match me.kind {
        MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
        MouseEventKind::Down(_) => MouseAction::Secondary,
        MouseEventKind::Up(_) => MouseAction::Release,
        MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseAction::Move,
        _ => return None,
    };
    Some(Msg::mouse(action, to_board(me.column, me.row)))
}

/// Translate one terminal event. Key releases and repeats are dropped.
///
/// Raw mode swallows the interrupt signal, so Ctrl-C quits here. Other
/// Ctrl and Alt chords are ignored.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => {
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                return Some(Msg::Quit);
            }
            if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                return None;
            }
            to_key(code).map(Msg::key)
        }
        Event::Mouse(me) => mouse_msg(me),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
///
/// Mouse capture is always on: the board is edited with the pointer.
pub struct CrosstermDriver {
    rows: u16,
}

impl CrosstermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self { rows: 0 }
    }

    fn draw_status(&self, out: &mut impl Write, status: &str) -> io::Result<()> {
        queue!(
            out,
            ResetColor,
            cursor::MoveTo(0, self.rows.saturating_add(1)),
            terminal::Clear(ClearType::CurrentLine),
            Print(status),
            cursor::MoveTo(0, self.rows.saturating_add(2)),
            terminal::Clear(ClearType::CurrentLine),
            Print(LEGEND)
        )
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        log::debug!("terminal initialised");
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Never block: the app loop waits on its own channel between polls.
        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();
        self.rows = u16::try_from(frame.rows.max(0))?;

        for fc in &frame.cells {
            let Some((column, row)) = to_screen(fc.pos) else {
                continue;
            };
            let (glyph, fg, bg) = label_style(fc.label);
            queue!(
                stdout,
                cursor::MoveTo(column, row),
                SetForegroundColor(fg),
                SetBackgroundColor(bg),
                Print(glyph)
            )?;
        }
        if let Some(status) = &frame.status {
            self.draw_status(&mut stdout, status)?;
        }
        queue!(stdout, ResetColor)?;

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
