//! Screen buffer and frame diffing.
//!
//! The `Compositor` holds a grid of `StyledCell`s for the whole terminal. A
//! finished frame batch is painted into it with [`Compositor::paint`], which
//! lays each strip over what is already there. [`Compositor::diff`] compares
//! two frames and produces only the `CellUpdate`s needed to move between them.

use crate::geometry::{Region, Size};

use super::strip::{CellStyle, Strip, StyledCell};

// ---------------------------------------------------------------------------
// CellUpdate
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

// ---------------------------------------------------------------------------
// Compositor
// ---------------------------------------------------------------------------

/// A full-screen cell buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compositor {
    /// Row-major cells, `width * height` long.
    screen: Vec<StyledCell>,
    width: u16,
    height: u16,
}

impl Compositor {
    /// A blank screen of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            screen: vec![StyledCell::blank(); width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    /// The whole screen as a region at the origin.
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Resize the buffer. All cells are reset to blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    /// Fill the entire screen with blank cells in `style`.
    pub fn fill(&mut self, style: &CellStyle) {
        for cell in &mut self.screen {
            *cell = StyledCell::blank_styled(style.clone());
        }
    }

    /// Paint strips in order, each cell laid over the one underneath.
    ///
    /// Cells that fall off the screen are dropped.
    pub fn paint(&mut self, strips: &[Strip]) {
        for strip in strips {
            if strip.y < 0 || strip.y >= self.height as i32 {
                continue;
            }
            for (i, cell) in strip.cells.iter().enumerate() {
                let x = strip.x_offset + i as i32;
                if x < 0 || x >= self.width as i32 {
                    continue;
                }
                let index = self.index(x as u16, strip.y as u16);
                let painted = cell.over(&self.screen[index]);
                self.screen[index] = painted;
            }
        }
    }

    /// Cells of this frame that differ from `previous`.
    ///
    /// When `previous` has other dimensions every cell is reported.
    pub fn diff(&self, previous: &Compositor) -> Vec<CellUpdate> {
        let same_size = self.width == previous.width && self.height == previous.height;
        let mut updates = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let index = self.index(x, y);
                let cell = &self.screen[index];
                if same_size && previous.screen[index] == *cell {
                    continue;
                }
                updates.push(CellUpdate { x, y, cell: cell.clone() });
            }
        }
        updates
    }

    /// The cell at `(x, y)`, or `None` when out of bounds.
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.screen.get(self.index(x, y))
    }

    /// The characters of row `y`.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get_cell(x, y))
            .map(|c| c.ch)
            .collect()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_strip(y: i32, x_offset: i32, text: &str, style: CellStyle) -> Strip {
        let mut strip = Strip::new(y, x_offset);
        strip.push_str(text, style, i32::MAX);
        strip
    }

    fn ch(c: &Compositor, x: u16, y: u16) -> char {
        c.get_cell(x, y).map(|cell| cell.ch).unwrap_or('?')
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn new_compositor_is_blank() {
        let c = Compositor::new(10, 5);
        assert_eq!(c.size(), Size::new(10, 5));
        assert_eq!(c.bounds(), Region::new(0, 0, 10, 5));
        assert_eq!(c.row_text(4), " ".repeat(10));
    }

    #[test]
    fn get_cell_out_of_bounds() {
        let c = Compositor::new(10, 5);
        assert!(c.get_cell(10, 0).is_none());
        assert!(c.get_cell(0, 5).is_none());
    }

    #[test]
    fn resize_resets_screen() {
        let mut c = Compositor::new(10, 5);
        c.paint(&[make_strip(0, 0, "Hello", CellStyle::default())]);
        c.resize(20, 10);
        assert_eq!(c.width(), 20);
        assert_eq!(c.height(), 10);
        assert_eq!(ch(&c, 0, 0), ' ');
    }

    // -----------------------------------------------------------------------
    // paint
    // -----------------------------------------------------------------------

    #[test]
    fn paint_places_text_at_offset() {
        let mut c = Compositor::new(10, 5);
        c.paint(&[make_strip(2, 3, "AB", CellStyle::default())]);
        assert_eq!(ch(&c, 3, 2), 'A');
        assert_eq!(ch(&c, 4, 2), 'B');
        assert_eq!(ch(&c, 2, 2), ' ');
        assert_eq!(ch(&c, 5, 2), ' ');
    }

    #[test]
    fn paint_drops_offscreen_cells() {
        let mut c = Compositor::new(4, 2);
        c.paint(&[
            make_strip(0, -2, "xxAB", CellStyle::default()),
            make_strip(10, 0, "Ghost", CellStyle::default()),
            make_strip(1, 2, "CDEF", CellStyle::default()),
        ]);
        assert_eq!(c.row_text(0), "AB  ");
        assert_eq!(c.row_text(1), "  CD");
    }

    #[test]
    fn text_keeps_background_painted_below() {
        let mut c = Compositor::new(5, 1);
        c.fill(&CellStyle::new().bg("blue"));
        c.paint(&[make_strip(0, 1, "X", CellStyle::new().fg("red"))]);
        let cell = c.get_cell(1, 0).cloned().unwrap_or_default();
        assert_eq!(cell.ch, 'X');
        assert_eq!(cell.style.fg.as_deref(), Some("red"));
        assert_eq!(cell.style.bg.as_deref(), Some("blue"));
    }

    // -----------------------------------------------------------------------
    // diff
    // -----------------------------------------------------------------------

    #[test]
    fn diff_identical_frames_is_empty() {
        assert!(Compositor::new(10, 5).diff(&Compositor::new(10, 5)).is_empty());
    }

    #[test]
    fn diff_reports_changed_cells_only() {
        let prev = Compositor::new(10, 5);
        let mut curr = Compositor::new(10, 5);
        curr.paint(&[make_strip(1, 2, "ABC", CellStyle::default())]);

        let updates = curr.diff(&prev);
        assert_eq!(updates.len(), 3);
        assert_eq!((updates[0].x, updates[0].y, updates[0].cell.ch), (2, 1, 'A'));
    }

    #[test]
    fn diff_style_change() {
        let mut prev = Compositor::new(10, 5);
        prev.paint(&[make_strip(0, 0, "X", CellStyle::default())]);
        let mut curr = Compositor::new(10, 5);
        curr.paint(&[make_strip(0, 0, "X", CellStyle::new().fg("red"))]);

        let updates = curr.diff(&prev);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].cell.style.fg.as_deref(), Some("red"));
    }

    #[test]
    fn diff_after_resize_is_full() {
        let prev = Compositor::new(2, 2);
        let curr = Compositor::new(3, 2);
        assert_eq!(curr.diff(&prev).len(), 6);
    }
}
