//! Draw batches with a clip stack.
//!
//! A [`Batch`] collects the strips of one render pass in paint order. Strips
//! are cropped to the innermost clip when they are pushed, so whatever lands
//! in a batch is already inside the drawable area.

use crate::geometry::Region;

use super::strip::{CellStyle, Strip};

/// Ordered strips plus the clip rectangles they are cut to.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    strips: Vec<Strip>,
    clips: Vec<Region>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty batch that starts out clipped to `clip`.
    ///
    /// Used for private sub-batches so they crop exactly like their parent.
    pub fn clipped_to(clip: Option<Region>) -> Self {
        Self { strips: Vec::new(), clips: clip.into_iter().collect() }
    }

    /// The innermost clip, if any.
    pub fn clip(&self) -> Option<Region> {
        self.clips.last().copied()
    }

    /// Narrow the clip to `region` (intersected with the current clip).
    pub fn push_clip(&mut self, region: Region) {
        let next = match self.clip() {
            Some(current) => current.intersection(region),
            None => region,
        };
        self.clips.push(next);
    }

    /// Restore the clip that was active before the last [`push_clip`](Self::push_clip).
    pub fn pop_clip(&mut self) {
        self.clips.pop();
    }

    /// Append a strip, cropped to the current clip. Empty results are dropped.
    pub fn push(&mut self, strip: Strip) {
        let strip = match self.clip() {
            Some(clip) => {
                if strip.y < clip.y || strip.y >= clip.bottom() {
                    return;
                }
                strip.crop(clip.x, clip.right())
            }
            None => strip,
        };
        if !strip.cells.is_empty() {
            self.strips.push(strip);
        }
    }

    /// Append every strip of `strips`, cropping each.
    pub fn extend<I: IntoIterator<Item = Strip>>(&mut self, strips: I) {
        for strip in strips {
            self.push(strip);
        }
    }

    /// Move all strips of `other` onto the end of this batch, cropped to this
    /// batch's clip.
    pub fn append(&mut self, other: Batch) {
        self.extend(other.strips);
    }

    /// Fill `region` with blank cells in `style`.
    pub fn fill(&mut self, region: Region, style: &CellStyle) {
        for row in region.y..region.bottom() {
            self.push(Strip::blank(row, region.x, region.width, style.clone()));
        }
    }

    /// Write `text` starting at `(x, y)`, at most `max_width` cells wide.
    pub fn text(&mut self, x: i32, y: i32, text: &str, style: &CellStyle, max_width: i32) {
        let mut strip = Strip::new(y, x);
        strip.push_str(text, style.clone(), max_width);
        self.push(strip);
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    pub fn into_strips(self) -> Vec<Strip> {
        self.strips
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strips.len()
    }
}
