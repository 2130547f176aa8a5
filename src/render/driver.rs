//! Crossterm terminal output backend.
//!
//! The `Driver` wraps a buffered stdout writer. It enters the alternate screen
//! with mouse capture, flushes compositor cell updates and restores the
//! terminal on the way out. Color strings are named colors or `#rrggbb` /
//! `#rgb` hex values.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};

use super::compositor::CellUpdate;
use super::strip::CellStyle;

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// Nothing is changed on the terminal until [`Driver::enter`] is called.
pub struct Driver {
    writer: BufWriter<Stdout>,
    active: bool,
}

impl Driver {
    pub fn new() -> io::Result<Self> {
        Ok(Self { writer: BufWriter::new(io::stdout()), active: false })
    }

    /// Enter the alternate screen, raw mode and mouse capture; hide the cursor.
    pub fn enter(&mut self, title: &str) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            SetTitle(title)
        )?;
        self.active = true;
        Ok(())
    }

    /// Undo everything [`Driver::enter`] did.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.writer,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Queue a batch of cell updates. Call [`Driver::flush`] afterwards.
    pub fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            self.apply_cell_style(&update.cell.style)?;
            queue!(self.writer, Print(update.cell.ch), SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Terminal size as (columns, rows).
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn apply_cell_style(&mut self, style: &CellStyle) -> io::Result<()> {
        if let Some(color) = style.fg.as_deref().and_then(parse_color) {
            queue!(self.writer, SetForegroundColor(color))?;
        }
        if let Some(color) = style.bg.as_deref().and_then(parse_color) {
            queue!(self.writer, SetBackgroundColor(color))?;
        }
        let attributes = [
            (style.bold, Attribute::Bold),
            (style.dim, Attribute::Dim),
            (style.italic, Attribute::Italic),
            (style.underline, Attribute::Underlined),
            (style.reverse, Attribute::Reverse),
        ];
        for (on, attribute) in attributes {
            if on {
                queue!(self.writer, SetAttribute(attribute))?;
            }
        }
        Ok(())
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}

// ---------------------------------------------------------------------------
// Color parsing
// ---------------------------------------------------------------------------

/// Parse a color string into a crossterm `Color`.
///
/// Accepts `#rrggbb`, `#rgb`, the eight basic names, their `dark_` variants
/// and `grey`/`gray`. Case-insensitive.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }
    match s.to_ascii_lowercase().replace('_', "").as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "darkred" => Some(Color::DarkRed),
        "darkgreen" => Some(Color::DarkGreen),
        "darkyellow" => Some(Color::DarkYellow),
        "darkblue" => Some(Color::DarkBlue),
        "darkmagenta" => Some(Color::DarkMagenta),
        "darkcyan" => Some(Color::DarkCyan),
        "darkgrey" | "darkgray" => Some(Color::DarkGrey),
        "grey" | "gray" => Some(Color::Grey),
        _ => None,
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb { r: channel(0..2)?, g: channel(2..4)?, b: channel(4..6)? }),
        3 => {
            let (r, g, b) = (channel(0..1)?, channel(1..2)?, channel(2..3)?);
            Some(Color::Rgb { r: r * 17, g: g * 17, b: b * 17 })
        }
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
