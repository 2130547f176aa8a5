//! Snapshot rendering helpers.
//!
//! Turn strips, compositor screens and whole elements into plain text for
//! assertions and `insta` snapshots. Every row keeps its full width so cell
//! positions stay visible; rows are joined with `'\n'` and the last row has no
//! trailing newline.

use crate::element::{Element, Frame};
use crate::geometry::Region;
use crate::render::cache::RenderCache;
use crate::render::compositor::Compositor;
use crate::render::strip::Strip;

/// Draw `element` into a fresh `width` x `height` surface and return the text.
///
/// The element is drawn uncached with its own render cache, exactly as a
/// screen would draw its root.
pub fn render_to_string(element: &mut dyn Element, width: i32, height: i32) -> String {
    let mut cache = RenderCache::new();
    render_with_cache(element, &mut cache, width, height)
}

/// Like [`render_to_string`], but reusing `cache` so repeated draws can hit it.
pub fn render_with_cache(element: &mut dyn Element, cache: &mut RenderCache, width: i32, height: i32) -> String {
    let region = Region::new(0, 0, width.max(0), height.max(0));
    let mut frame = Frame::new(cache, region);
    element.draw(region, &mut frame, false);
    strips_to_string(&frame.finish(), width, height)
}

/// Lay `strips` over a blank `width` x `height` grid.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }
    let mut grid = vec![vec![' '; width as usize]; height as usize];
    for strip in strips {
        if strip.y < 0 || strip.y >= height {
            continue;
        }
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if (0..width).contains(&x) {
                grid[strip.y as usize][x as usize] = cell.ch;
            }
        }
    }
    grid.into_iter().map(|row| row.into_iter().collect::<String>()).collect::<Vec<_>>().join("\n")
}

/// Every row of a compositor screen.
pub fn compositor_to_string(compositor: &Compositor) -> String {
    (0..compositor.height()).map(|y| compositor.row_text(y)).collect::<Vec<_>>().join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip::CellStyle;
    use crate::widgets::label::Label;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_land_on_their_cells() {
        let mut strip = Strip::new(1, 2);
        strip.push_str("ab", CellStyle::new(), 10);
        assert_eq!(strips_to_string(&[strip], 5, 2), "     \n  ab ");
    }

    #[test]
    fn off_grid_cells_are_dropped() {
        let mut strip = Strip::new(0, -1);
        strip.push_str("xyz", CellStyle::new(), 10);
        let below = Strip::blank(5, 0, 3, CellStyle::new());
        assert_eq!(strips_to_string(&[strip, below], 3, 1), "yz ");
    }

    #[test]
    fn zero_sized_render_is_empty() {
        assert_eq!(render_to_string(&mut Label::new("hi"), 0, 0), "");
    }

    #[test]
    fn compositor_rows_keep_full_width() {
        let mut compositor = Compositor::new(4, 2);
        let mut strip = Strip::new(1, 1);
        strip.push_str("ok", CellStyle::new(), 4);
        compositor.paint(&[strip]);
        assert_eq!(compositor_to_string(&compositor), "    \n ok ");
    }

    #[test]
    fn uncached_root_stores_nothing() {
        let mut cache = RenderCache::new();
        let mut label = Label::new("hi").with_key("greeting");
        render_with_cache(&mut label, &mut cache, 4, 1);
        assert!(cache.is_empty());
    }
}
