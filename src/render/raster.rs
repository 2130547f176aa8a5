//! Flattened cell rasters for the render cache.
//!
//! A [`Raster`] is the captured output of one render pass over a region: the
//! strips are composited in paint order into a grid, relative to the region's
//! top-left corner. Cells nothing painted stay transparent, so replaying a
//! raster leaves whatever is underneath visible.

use crate::geometry::{Offset, Region, Size};

use super::strip::{Strip, StyledCell};

/// Captured cells of a rendered region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    size: Size,
    cells: Vec<Option<StyledCell>>,
}

impl Raster {
    /// Composite `strips` into a raster covering `region`.
    ///
    /// Cells outside the region are ignored.
    pub fn capture(strips: &[Strip], region: Region) -> Self {
        let size = region.size();
        let mut cells = vec![None; size.area() as usize];
        for strip in strips {
            let row = strip.y - region.y;
            if row < 0 || row >= size.height {
                continue;
            }
            for (i, cell) in strip.cells.iter().enumerate() {
                let col = strip.x_offset + i as i32 - region.x;
                if col < 0 || col >= size.width {
                    continue;
                }
                let slot: &mut Option<StyledCell> = &mut cells[(row * size.width + col) as usize];
                *slot = Some(match slot.as_ref() {
                    Some(below) => cell.over(below),
                    None => cell.clone(),
                });
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The captured cell at `(col, row)` relative to the raster origin.
    pub fn cell(&self, col: i32, row: i32) -> Option<&StyledCell> {
        if col < 0 || row < 0 || col >= self.size.width || row >= self.size.height {
            return None;
        }
        self.cells[(row * self.size.width + col) as usize].as_ref()
    }

    /// Number of painted (non-transparent) cells.
    pub fn painted(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Strips that redraw this raster with its top-left corner at `origin`.
    ///
    /// Each row becomes one strip per run of painted cells.
    pub fn replay(&self, origin: Offset) -> Vec<Strip> {
        let mut strips = Vec::new();
        for row in 0..self.size.height {
            let mut run: Option<Strip> = None;
            for col in 0..self.size.width {
                match self.cell(col, row) {
                    Some(cell) => run
                        .get_or_insert_with(|| Strip::new(origin.y + row, origin.x + col))
                        .cells
                        .push(cell.clone()),
                    None => strips.extend(run.take()),
                }
            }
            strips.extend(run.take());
        }
        strips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip::CellStyle;

    fn strip(y: i32, x: i32, text: &str) -> Strip {
        let mut s = Strip::new(y, x);
        s.push_str(text, CellStyle::new(), 100);
        s
    }

    #[test]
    fn capture_is_relative_to_region() {
        let raster = Raster::capture(&[strip(5, 10, "ab")], Region::new(10, 5, 4, 2));
        assert_eq!(raster.size(), Size::new(4, 2));
        assert_eq!(raster.cell(0, 0).map(|c| c.ch), Some('a'));
        assert_eq!(raster.cell(1, 0).map(|c| c.ch), Some('b'));
        assert!(raster.cell(2, 0).is_none());
        assert_eq!(raster.painted(), 2);
    }

    #[test]
    fn capture_composites_in_paint_order() {
        let mut bg = Strip::blank(0, 0, 3, CellStyle::new().bg("blue"));
        bg.cells[1].ch = ' ';
        let raster = Raster::capture(&[bg, strip(0, 1, "x")], Region::new(0, 0, 3, 1));
        let cell = raster.cell(1, 0).cloned().unwrap_or_default();
        assert_eq!(cell.ch, 'x');
        assert_eq!(cell.style.bg.as_deref(), Some("blue"));
    }

    #[test]
    fn capture_drops_cells_outside() {
        let raster = Raster::capture(&[strip(0, -1, "abc"), strip(3, 0, "zz")], Region::new(0, 0, 2, 2));
        assert_eq!(raster.cell(0, 0).map(|c| c.ch), Some('b'));
        assert_eq!(raster.cell(1, 0).map(|c| c.ch), Some('c'));
        assert_eq!(raster.painted(), 2);
    }

    #[test]
    fn replay_splits_transparent_gaps() {
        let raster = Raster::capture(&[strip(0, 0, "a"), strip(0, 2, "b")], Region::new(0, 0, 3, 1));
        let strips = raster.replay(Offset::new(20, 7));
        assert_eq!(strips.len(), 2);
        assert_eq!((strips[0].x_offset, strips[0].y), (20, 7));
        assert_eq!((strips[1].x_offset, strips[1].y), (22, 7));
    }

    #[test]
    fn replay_roundtrips_through_capture() {
        let region = Region::new(0, 0, 5, 2);
        let raster = Raster::capture(&[strip(0, 0, "hello"), strip(1, 1, "abc")], region);
        let moved = Region::new(30, 10, 5, 2);
        let again = Raster::capture(&raster.replay(moved.origin()), moved);
        assert_eq!(again, raster);
    }
}
