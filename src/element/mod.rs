//! Element trait: measure, draw through the render cache, handle input.
//!
//! Everything drawable implements [`Element`]. Elements are built fresh each
//! time a view rebuilds and keep their per-instance bookkeeping in a [`Node`]:
//! identity, layout priorities, the memoized desired size and the region they
//! were last drawn into.
//!
//! Drawing always goes through the provided [`Element::draw`], which consults
//! the render cache before asking the element to paint itself.

pub mod container;
pub mod frame;
pub mod identity;
pub mod modifier;

use std::any::Any;

use tracing::trace;

use crate::event::context::EventCtx;
use crate::event::input::KeyEvent;
use crate::geometry::{Axis, Offset, Region, Size};
use crate::layout::priority::LayoutSpec;
use crate::render::cache::CacheEntry;
use crate::render::raster::Raster;

pub use container::Container;
pub use frame::Frame;
pub use identity::{Fingerprint, Key};
pub use modifier::{Background, Border, ElementExt, OnClick, Padding};

/// Cells between neighbouring children of a container unless set otherwise.
pub const DEFAULT_GUTTER: i32 = 1;

// ---------------------------------------------------------------------------
// ParentLink
// ---------------------------------------------------------------------------

/// What an element knows about the container holding it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParentLink {
    pub axis: Axis,
    pub gutter: i32,
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Per-element bookkeeping shared by every element type.
#[derive(Debug, Clone)]
pub struct Node {
    /// Identity across rebuilds. Elements without one are never cached.
    pub key: Option<Key>,
    pub layout: LayoutSpec,
    /// Whether this element may be served from the render cache at all.
    pub caching: bool,
    parent: Option<ParentLink>,
    desired: Option<Size>,
    placed: Option<Region>,
}

impl Node {
    pub fn new(layout: LayoutSpec) -> Self {
        Self { key: None, layout, caching: true, parent: None, desired: None, placed: None }
    }

    pub fn with_key(mut self, key: Option<Key>) -> Self {
        self.key = key;
        self
    }

    pub fn parent(&self) -> Option<ParentLink> {
        self.parent
    }

    pub fn set_parent(&mut self, link: ParentLink) {
        self.parent = Some(link);
        self.desired = None;
    }

    /// The memoized result of the last measure, if still valid.
    pub fn desired(&self) -> Option<Size> {
        self.desired
    }

    pub fn set_desired(&mut self, size: Size) {
        self.desired = Some(size);
    }

    /// Forget the memoized desired size.
    pub fn invalidate(&mut self) {
        self.desired = None;
    }

    /// Where the element was last drawn.
    pub fn placed(&self) -> Option<Region> {
        self.placed
    }

    pub fn place(&mut self, region: Region) {
        self.placed = Some(region);
    }

    /// Whether `pos` falls on this element. Never-drawn elements are never hit.
    pub fn hit(&self, pos: Offset) -> bool {
        self.placed.is_some_and(|region| region.contains(pos))
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// The capability set of everything drawable.
pub trait Element: Any {
    /// Short type name, used in logs.
    fn kind(&self) -> &'static str;

    fn node(&self) -> &Node;

    fn node_mut(&mut self) -> &mut Node;

    /// Intrinsic size. Called through [`desired_size`](Element::desired_size),
    /// which memoizes it.
    fn measure(&mut self) -> Size;

    /// Paint into `region`. Called by [`draw`](Element::draw) on a cache miss.
    fn draw_content(&mut self, region: Region, frame: &mut Frame<'_>);

    /// Summary of the visual state. `None` opts out of caching.
    fn fingerprint(&self) -> Option<Fingerprint> {
        None
    }

    /// Called by a container when this element is added to it.
    fn attach(&mut self, link: ParentLink) {
        self.node_mut().set_parent(link);
    }

    /// Call `f` on each direct child in declared order.
    fn visit_children(&mut self, _f: &mut dyn FnMut(&mut dyn Element)) {}

    fn can_focus(&self) -> bool {
        false
    }

    fn set_focused(&mut self, _focused: bool) {}

    /// The element's own click behaviour. Return `true` to consume the click.
    fn activate(&mut self, _pos: Offset, _cx: &mut EventCtx) -> bool {
        false
    }

    fn on_key(&mut self, _key: &KeyEvent, _cx: &mut EventCtx) -> bool {
        false
    }

    fn on_text(&mut self, _text: &str, _cx: &mut EventCtx) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    // -- provided ----------------------------------------------------------

    fn key(&self) -> Option<&Key> {
        self.node().key.as_ref()
    }

    /// The memoized intrinsic size.
    fn desired_size(&mut self) -> Size {
        if let Some(size) = self.node().desired() {
            return size;
        }
        let size = self.measure();
        self.node_mut().set_desired(size);
        size
    }

    /// Draw into `region`, replaying from the render cache when allowed.
    ///
    /// Returns `true` when the output came from the cache.
    fn draw(&mut self, region: Region, frame: &mut Frame<'_>, cached: bool) -> bool {
        let identity = match self.node().key.clone() {
            Some(key) if cached && self.node().caching => Some(key),
            _ => None,
        };
        let Some((key, fingerprint)) = identity.and_then(|key| Some((key, self.fingerprint()?)))
        else {
            self.draw_content(region, frame);
            self.node_mut().place(region);
            return false;
        };

        let replay = frame.cache().lookup_sized(&key, fingerprint, region.size()).and_then(|entry| {
            let strips = entry.replay_into(region)?;
            Some((strips, entry.placements_at(region).collect::<Vec<_>>()))
        });
        if let Some((strips, placements)) = replay {
            frame.extend(strips);
            self.node_mut().place(region);
            let mut placements = placements.into_iter();
            self.visit_children(&mut |child| {
                for_each_descendant(child, &mut |el| {
                    if let Some(Some(region)) = placements.next() {
                        el.node_mut().place(region);
                    }
                })
            });
            return true;
        }

        let sub = frame.capture(|f| self.draw_content(region, f));
        self.node_mut().place(region);
        if frame.drawable().contains_region(region) {
            let mut placements = Vec::new();
            self.visit_children(&mut |child| {
                for_each_descendant(child, &mut |el| placements.push(el.node().placed()))
            });
            let entry = CacheEntry::new(fingerprint, region, Raster::capture(sub.strips(), region))
                .with_placements(placements);
            trace!(%key, kind = self.kind(), ?region, "render cache: stored");
            frame.cache().insert(key, entry);
        } else {
            frame.cache().note_skipped(&key, region);
        }
        frame.append(sub);
        false
    }

    /// Deliver a click: the element's own handler first, then its children.
    fn click(&mut self, pos: Offset, cx: &mut EventCtx) -> bool {
        if !self.node().hit(pos) {
            return false;
        }
        if self.activate(pos, cx) {
            return true;
        }
        let mut handled = false;
        self.visit_children(&mut |child| {
            if !handled {
                handled = child.click(pos, cx);
            }
        });
        handled
    }

    /// Broadcast pointer motion to the whole subtree.
    fn pointer_moved(&mut self, pos: Offset) {
        self.visit_children(&mut |child| child.pointer_moved(pos));
    }

    /// The pointer moved to `pos` with the left button held. Only the
    /// focused element receives drags.
    fn drag(&mut self, _pos: Offset) {}

    /// Broadcast a wheel movement to the whole subtree.
    fn scroll(&mut self, pos: Offset, delta: i32, cx: &mut EventCtx) {
        self.visit_children(&mut |child| child.scroll(pos, delta, cx));
    }
}

/// Visit `element` and then every descendant, depth first in declared order.
pub fn for_each_descendant(element: &mut dyn Element, f: &mut dyn FnMut(&mut dyn Element)) {
    f(element);
    element.visit_children(&mut |child| for_each_descendant(child, &mut *f));
}

/// Keys of every focusable element under `root`, in tree order.
pub fn focusable_keys(root: &mut dyn Element) -> Vec<Key> {
    let mut keys = Vec::new();
    for_each_descendant(root, &mut |el| {
        if el.can_focus() {
            keys.extend(el.key().cloned());
        }
    });
    keys
}

/// Run `f` on the first element under `root` whose key is `key`.
///
/// Returns whether such an element was found.
pub fn with_keyed(root: &mut dyn Element, key: &Key, f: &mut dyn FnMut(&mut dyn Element)) -> bool {
    let mut found = false;
    for_each_descendant(root, &mut |el| {
        if !found && el.key() == Some(key) {
            found = true;
            f(el);
        }
    });
    found
}

// ===========================================================================
// Tests
// ===========================================================================
