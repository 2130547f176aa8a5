//! The drawing target handed to every element during a render pass.

use crate::geometry::Region;
use crate::render::batch::Batch;
use crate::render::cache::RenderCache;
use crate::render::strip::{CellStyle, Strip};

/// One render pass: the batch being filled, the surface it will land on and
/// the render cache lent out by the screen.
pub struct Frame<'a> {
    batch: Batch,
    cache: &'a mut RenderCache,
    surface: Region,
}

impl<'a> Frame<'a> {
    /// A pass over `surface`, clipped to it.
    pub fn new(cache: &'a mut RenderCache, surface: Region) -> Self {
        let batch = Batch::clipped_to(Some(surface));
        Self { batch, cache, surface }
    }

    pub fn surface(&self) -> Region {
        self.surface
    }

    /// The area strips can actually reach: the surface cut by the current clip.
    pub fn drawable(&self) -> Region {
        match self.batch.clip() {
            Some(clip) => clip.intersection(self.surface),
            None => self.surface,
        }
    }

    pub fn cache(&mut self) -> &mut RenderCache {
        &mut *self.cache
    }

    pub fn batch(&mut self) -> &mut Batch {
        &mut self.batch
    }

    /// Run `draw` against a private sub-batch and hand that batch back.
    ///
    /// The sub-batch starts with the current clip, so it crops exactly like the
    /// outer batch would.
    pub fn capture<F>(&mut self, draw: F) -> Batch
    where
        F: FnOnce(&mut Self),
    {
        let sub = Batch::clipped_to(self.batch.clip());
        let outer = std::mem::replace(&mut self.batch, sub);
        draw(self);
        std::mem::replace(&mut self.batch, outer)
    }

    pub fn push_clip(&mut self, region: Region) {
        self.batch.push_clip(region);
    }

    pub fn pop_clip(&mut self) {
        self.batch.pop_clip();
    }

    pub fn fill(&mut self, region: Region, style: &CellStyle) {
        self.batch.fill(region, style);
    }

    pub fn text(&mut self, x: i32, y: i32, text: &str, style: &CellStyle, max_width: i32) {
        self.batch.text(x, y, text, style, max_width);
    }

    pub fn extend(&mut self, strips: impl IntoIterator<Item = Strip>) {
        self.batch.extend(strips);
    }

    pub fn append(&mut self, batch: Batch) {
        self.batch.append(batch);
    }

    /// Finish the pass and take the strips in paint order.
    pub fn finish(self) -> Vec<Strip> {
        self.batch.into_strips()
    }
}
