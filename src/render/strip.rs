//! Strip: a horizontal run of styled terminal cells.
//!
//! Elements draw by pushing strips into a [`Batch`](super::batch::Batch). A
//! strip is one row of cells at an absolute `(x_offset, y)` position. Cells
//! with no background are see-through: when they land on the screen they keep
//! whatever background is already there.

use unicode_width::UnicodeWidthChar;

/// Number of cells `text` occupies once pushed into a strip.
///
/// Every printable character takes one cell; zero-width characters take none.
pub fn cell_width(text: &str) -> i32 {
    text.chars().filter(|ch| ch.width().unwrap_or(0) > 0).count() as i32
}

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// Colors are named colors or `#rrggbb` / `#rgb` hex strings, parsed by the
/// driver. `None` means "inherit from below".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color (builder).
    pub fn fg(mut self, color: impl Into<String>) -> Self {
        self.fg = Some(color.into());
        self
    }

    /// Set the background color (builder).
    pub fn bg(mut self, color: impl Into<String>) -> Self {
        self.bg = Some(color.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A blank (space) cell with default style.
    pub fn blank() -> Self {
        Self { ch: ' ', style: CellStyle::default() }
    }

    /// A blank (space) cell with the given style.
    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }

    /// Lay this cell on top of `below`.
    ///
    /// The character, foreground and attributes come from `self`; a missing
    /// background or foreground falls back to the one underneath.
    pub fn over(&self, below: &StyledCell) -> StyledCell {
        let mut style = self.style.clone();
        if style.bg.is_none() {
            style.bg = below.style.bg.clone();
        }
        if style.fg.is_none() && self.ch == ' ' {
            style.fg = below.style.fg.clone();
        }
        StyledCell { ch: self.ch, style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// A horizontal line of styled cells at an absolute position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    /// The screen row.
    pub y: i32,
    /// Screen column of the first cell.
    pub x_offset: i32,
    /// The cells in left-to-right order.
    pub cells: Vec<StyledCell>,
}

impl Strip {
    /// Create a new empty strip at the given row and x offset.
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self { y, x_offset, cells: Vec::new() }
    }

    /// A strip of `width` blank cells in `style`.
    pub fn blank(y: i32, x_offset: i32, width: i32, style: CellStyle) -> Self {
        let mut strip = Self::new(y, x_offset);
        strip.cells = vec![StyledCell::blank_styled(style); width.max(0) as usize];
        strip
    }

    /// Push a single character with the given style.
    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    /// Push the characters of `text`, skipping zero-width ones, until the
    /// strip is `max_width` cells wide.
    pub fn push_str(&mut self, text: &str, style: CellStyle, max_width: i32) {
        for ch in text.chars() {
            if self.width() >= max_width {
                break;
            }
            if ch.width().unwrap_or(0) == 0 {
                continue;
            }
            self.cells.push(StyledCell::new(ch, style.clone()));
        }
    }

    /// The width of this strip in cells.
    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// The rightmost x position (exclusive) of this strip.
    pub fn right(&self) -> i32 {
        self.x_offset + self.width()
    }

    /// Keep only cells whose absolute column lies in `[x_start, x_end)`.
    ///
    /// The returned strip starts at the first kept cell.
    pub fn crop(&self, x_start: i32, x_end: i32) -> Strip {
        let from = (x_start - self.x_offset).clamp(0, self.width());
        let to = (x_end - self.x_offset).clamp(from, self.width());
        Strip {
            y: self.y,
            x_offset: self.x_offset + from,
            cells: self.cells[from as usize..to as usize].to_vec(),
        }
    }

    /// The same cells moved by `(dx, dy)`.
    pub fn shifted(mut self, dx: i32, dy: i32) -> Strip {
        self.x_offset += dx;
        self.y += dy;
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
