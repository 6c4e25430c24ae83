use std::io;
use std::io::Stdout;
use std::io::Write;

use crossterm::cursor;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::PixelSize;
use crate::canvas::Canvas;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("No usable terminal: {0}")]
    Unavailable(#[from] io::Error),

    #[error("Terminal has no room to draw ({cols}x{rows})")]
    Empty { cols: u16, rows: u16 },
}

/// The terminal, used as a drawing surface. Each character holds two device pixels stacked
/// vertically.
///
/// While this is alive the terminal is in raw mode, on the alternate screen, with the cursor
/// hidden. Dropping it restores everything.
pub struct Terminal {
    stdout: Stdout,
    cols: u16,
    rows: u16,
}

impl Terminal {
    pub fn acquire() -> Result<Self, SurfaceError> {
        let (cols, rows) = terminal::size()?;

        if cols == 0 || rows == 0 {
            return Err(SurfaceError::Empty { cols, rows });
        }

        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e.into());
        }

        info!("acquired {cols}x{rows} terminal");

        Ok(Self { stdout, cols, rows })
    }

    /// Size of the surface in device pixels
    pub fn pixel_size(&self) -> (PixelSize, PixelSize) {
        (self.cols as PixelSize, self.rows as PixelSize * 2)
    }

    /// Draw a frame of `canvas` on screen, starting at the top left corner.
    pub fn present(&mut self, canvas: &mut Canvas) -> io::Result<()> {
        let frame = canvas.render();

        for (row, line) in frame.lines().take(self.rows as usize).enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, row as u16),
                style::Print(line)
            )?;
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    /// Exit the application
    Exit,
}

/// Converts a crossterm event into an application event
pub fn convert_event(event: CtEvent) -> Option<Event> {
    match event {
        CtEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CtEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Exit),
            _ => None,
        },

        // The grid keeps the dimensions it was created with
        CtEvent::Resize(cols, rows) => {
            debug!("ignoring resize to {cols}x{rows}");

            None
        }
        _ => None,
    }
}
