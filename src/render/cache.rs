//! Render cache: identity plus fingerprint to captured raster.
//!
//! The cache keeps at most one entry per identity. Each entry remembers the
//! fingerprint it was rendered with and the region it covered. A lookup with a
//! different fingerprint throws the stale entry away. A hit is only usable for
//! a draw of exactly the same size; the raster is replayed at the new origin.

use std::collections::HashMap;

use tracing::trace;

use crate::element::identity::{Fingerprint, Key};
use crate::geometry::{Region, Size};

use super::raster::Raster;
use super::strip::Strip;

// ---------------------------------------------------------------------------
// CacheEntry
// ---------------------------------------------------------------------------

/// A captured render of one element.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fingerprint: Fingerprint,
    /// Where the element was when it was captured.
    pub region: Region,
    pub raster: Raster,
    /// Where the element's descendants were, relative to `region`, in walk
    /// order. Replayed so hit testing keeps working on a cache hit.
    pub placements: Vec<Option<Region>>,
}

impl CacheEntry {
    pub fn new(fingerprint: Fingerprint, region: Region, raster: Raster) -> Self {
        Self { fingerprint, region, raster, placements: Vec::new() }
    }

    /// Attach descendant placements given in absolute coordinates.
    pub fn with_placements(mut self, placements: impl IntoIterator<Item = Option<Region>>) -> Self {
        let origin = self.region.origin();
        self.placements = placements
            .into_iter()
            .map(|p| p.map(|r| r.moved_to(r.origin() - origin)))
            .collect();
        self
    }

    /// Descendant placements moved to sit under `target`.
    pub fn placements_at(&self, target: Region) -> impl Iterator<Item = Option<Region>> + '_ {
        let origin = target.origin();
        self.placements
            .iter()
            .map(move |p| p.map(|r| r.moved_to(r.origin() + origin)))
    }

    /// Strips redrawing this entry into `target`, or `None` when the sizes
    /// differ and the caller has to render for real.
    pub fn replay_into(&self, target: Region) -> Option<Vec<Strip>> {
        if target.size() != self.region.size() {
            return None;
        }
        Some(self.raster.replay(target.origin()))
    }
}

// ---------------------------------------------------------------------------
// CacheStats
// ---------------------------------------------------------------------------

/// Counters for cache behaviour since creation or the last [`RenderCache::clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub stores: u64,
    /// Renders that were eligible but fell partly outside the drawable area.
    pub skipped: u64,
}

// ---------------------------------------------------------------------------
// RenderCache
// ---------------------------------------------------------------------------

/// Persistent render cache, retained across frames and tree rebuilds.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<Key, CacheEntry>,
    stats: CacheStats,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the entry for `key` rendered with `fingerprint`.
    ///
    /// An entry for `key` with another fingerprint is evicted and the lookup
    /// misses.
    pub fn lookup(&mut self, key: &Key, fingerprint: Fingerprint) -> Option<&CacheEntry> {
        self.find(key, fingerprint, None)
    }

    /// Like [`lookup`](Self::lookup), but only an entry captured at `size`
    /// counts as a hit. A size mismatch misses and keeps the entry.
    pub fn lookup_sized(&mut self, key: &Key, fingerprint: Fingerprint, size: Size) -> Option<&CacheEntry> {
        self.find(key, fingerprint, Some(size))
    }

    fn find(&mut self, key: &Key, fingerprint: Fingerprint, size: Option<Size>) -> Option<&CacheEntry> {
        let usable = |e: &CacheEntry| size.map_or(true, |size| e.region.size() == size);
        match self.entries.get(key).map(|e| (e.fingerprint == fingerprint, usable(e))) {
            Some((true, true)) => {
                self.stats.hits += 1;
                self.entries.get(key)
            }
            Some((true, false)) => {
                self.stats.misses += 1;
                trace!(%key, ?size, "render cache: size changed");
                None
            }
            Some((false, _)) => {
                self.entries.remove(key);
                self.stats.evictions += 1;
                self.stats.misses += 1;
                trace!(%key, "render cache: stale fingerprint evicted");
                None
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Record a render of `key`, replacing anything stored for it before.
    pub fn store(&mut self, key: Key, fingerprint: Fingerprint, region: Region, raster: Raster) {
        self.insert(key, CacheEntry::new(fingerprint, region, raster));
    }

    /// Like [`store`](Self::store) for a fully built entry.
    pub fn insert(&mut self, key: Key, entry: CacheEntry) {
        if self.entries.insert(key, entry).is_some() {
            self.stats.evictions += 1;
        }
        self.stats.stores += 1;
    }

    /// Note an eligible render that was not stored because it was clipped.
    pub fn note_skipped(&mut self, key: &Key, region: Region) {
        self.stats.skipped += 1;
        trace!(%key, ?region, "render cache: capture outside drawable area, not stored");
    }

    /// Drop the entry for `key`, if any.
    pub fn evict(&mut self, key: &Key) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Offset;
    use crate::render::strip::CellStyle;
    use pretty_assertions::assert_eq;

    fn raster(text: &str) -> (Region, Raster) {
        let region = Region::new(0, 0, text.len() as i32, 1);
        let mut strip = Strip::new(0, 0);
        strip.push_str(text, CellStyle::new(), 100);
        (region, Raster::capture(&[strip], region))
    }

    #[test]
    fn store_then_lookup_hits() {
        let mut cache = RenderCache::new();
        let key = Key::new("label");
        let fp = Fingerprint::of("hello");
        let (region, r) = raster("hello");
        cache.store(key.clone(), fp, region, r.clone());

        let entry = cache.lookup(&key, fp).cloned();
        assert_eq!(entry.map(|e| e.raster), Some(r));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn lookup_unknown_key_misses() {
        let mut cache = RenderCache::new();
        assert!(cache.lookup(&Key::new("nope"), Fingerprint::EMPTY).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn fingerprint_mismatch_evicts() {
        let mut cache = RenderCache::new();
        let key = Key::new("label");
        let old = Fingerprint::of("old");
        let (region, r) = raster("old");
        cache.store(key.clone(), old, region, r);

        assert!(cache.lookup(&key, Fingerprint::of("new")).is_none());
        assert!(!cache.contains(&key));
        // the old fingerprint is gone too
        assert!(cache.lookup(&key, old).is_none());
        assert_eq!(cache.stats().evictions, 1);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn store_replaces_previous_entry() {
        let mut cache = RenderCache::new();
        let key = Key::new("label");
        let (region, a) = raster("aaa");
        let (_, b) = raster("bbb");
        cache.store(key.clone(), Fingerprint::of("a"), region, a);
        cache.store(key.clone(), Fingerprint::of("b"), region, b.clone());

        assert_eq!(cache.len(), 1);
        assert!(cache.lookup(&key, Fingerprint::of("a")).is_none());
        cache.store(key.clone(), Fingerprint::of("b"), region, b);
        assert!(cache.lookup(&key, Fingerprint::of("b")).is_some());
    }

    #[test]
    fn sized_lookup_misses_on_a_new_size_and_keeps_the_entry() {
        let mut cache = RenderCache::new();
        let key = Key::new("label");
        let (region, r) = raster("abc");
        cache.store(key.clone(), Fingerprint::EMPTY, region, r);

        assert!(cache.lookup_sized(&key, Fingerprint::EMPTY, Size::new(5, 1)).is_none());
        assert!(cache.contains(&key));
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().evictions, 0);

        assert!(cache.lookup_sized(&key, Fingerprint::EMPTY, region.size()).is_some());
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn replay_requires_matching_size() {
        let (region, r) = raster("abc");
        let entry = CacheEntry::new(Fingerprint::EMPTY, region, r);

        let moved = entry.replay_into(Region::new(10, 4, 3, 1)).unwrap_or_default();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].x_offset, 10);
        assert_eq!(moved[0].y, 4);

        assert!(entry.replay_into(Region::new(10, 4, 4, 1)).is_none());
        assert!(entry.replay_into(Region::at(Offset::new(0, 0), region.size())).is_some());
    }

    #[test]
    fn placements_follow_the_entry() {
        let region = Region::new(10, 5, 6, 2);
        let (_, r) = raster("abcdef");
        let entry = CacheEntry::new(Fingerprint::EMPTY, region, r)
            .with_placements([Some(Region::new(12, 6, 2, 1)), None]);
        let moved: Vec<_> = entry.placements_at(Region::new(0, 20, 6, 2)).collect();
        assert_eq!(moved, vec![Some(Region::new(2, 21, 2, 1)), None]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut cache = RenderCache::new();
        let (region, r) = raster("x");
        cache.store(Key::new("k"), Fingerprint::EMPTY, region, r);
        cache.note_skipped(&Key::new("k"), region);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
