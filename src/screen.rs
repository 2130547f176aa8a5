//! View building, the screen and focus handling.
//!
//! A [`View`] turns application state into a fresh element tree. The
//! [`Screen`] keeps the latest tree, rebuilds it when the screen is marked
//! dirty or a registered model asks for a redraw, and renders it through the
//! render cache into a compositor. It also routes input to the tree and keeps
//! the keyboard focus.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::app::AppConfig;
use crate::element::{focusable_keys, for_each_descendant, with_keyed, Container, Element, Frame, Key};
use crate::event::context::EventCtx;
use crate::event::input::KeyEvent;
use crate::geometry::{Axis, Offset};
use crate::render::cache::{CacheStats, RenderCache};
use crate::render::compositor::{CellUpdate, Compositor};
use crate::render::strip::CellStyle;
use crate::widgets::table::{TableState, TableStateStore, ViewModel};

// ---------------------------------------------------------------------------
// View / BuildContext
// ---------------------------------------------------------------------------

/// Application state that can describe itself as an element tree.
pub trait View {
    fn content(&mut self, cx: &mut BuildContext<'_>) -> Box<dyn Element>;
}

/// What a view can reach while it builds: per-table state and the config.
pub struct BuildContext<'a> {
    tables: &'a mut TableStateStore,
    config: &'a AppConfig,
}

impl<'a> BuildContext<'a> {
    pub fn new(tables: &'a mut TableStateStore, config: &'a AppConfig) -> Self {
        Self { tables, config }
    }

    /// The persistent state of the table called `id`.
    pub fn table_state(&mut self, id: &str) -> Rc<RefCell<TableState>> {
        self.tables.state(id)
    }

    pub fn config(&self) -> &AppConfig {
        self.config
    }

    /// A column using the configured gutter.
    pub fn vertical(&self, children: Vec<Box<dyn Element>>) -> Container {
        Container::new(Axis::Vertical, children).with_gutter(self.config.gutter)
    }

    /// A row using the configured gutter.
    pub fn horizontal(&self, children: Vec<Box<dyn Element>>) -> Container {
        Container::new(Axis::Horizontal, children).with_gutter(self.config.gutter)
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// The live element tree plus everything that outlives a rebuild.
pub struct Screen {
    root: Option<Box<dyn Element>>,
    models: Vec<Rc<RefCell<dyn ViewModel>>>,
    cache: RenderCache,
    tables: TableStateStore,
    compositor: Compositor,
    previous: Compositor,
    focused: Option<Key>,
    dirty: bool,
    full_repaint: bool,
    config: AppConfig,
    backdrop: CellStyle,
    rebuilds: u64,
}

impl Screen {
    pub fn new(width: u16, height: u16, config: AppConfig) -> Self {
        let backdrop = match &config.backdrop {
            Some(color) => CellStyle::new().bg(color.as_str()),
            None => CellStyle::new(),
        };
        Self {
            root: None,
            models: Vec::new(),
            cache: RenderCache::new(),
            tables: TableStateStore::new(),
            compositor: Compositor::new(width, height),
            previous: Compositor::new(width, height),
            focused: None,
            dirty: true,
            full_repaint: true,
            config,
            backdrop,
            rebuilds: 0,
        }
    }

    /// Watch `model`: the view is rebuilt whenever it needs a redraw.
    pub fn register_model(&mut self, model: Rc<RefCell<dyn ViewModel>>) {
        self.models.push(model);
        self.dirty = true;
    }

    /// Stop watching `model`. Returns `false` if it was not registered.
    pub fn remove_model(&mut self, model: &Rc<RefCell<dyn ViewModel>>) -> bool {
        let before = self.models.len();
        self.models.retain(|m| !Rc::ptr_eq(m, model));
        before != self.models.len()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Force a rebuild before the next frame.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Resize the screen. The next frame is rebuilt and repainted in full.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.compositor.resize(width, height);
        self.previous.resize(width, height);
        self.full_repaint = true;
        self.dirty = true;
    }

    pub fn root(&self) -> Option<&dyn Element> {
        self.root.as_deref()
    }

    pub fn root_mut(&mut self) -> Option<&mut (dyn Element + 'static)> {
        self.root.as_deref_mut()
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn tables(&self) -> &TableStateStore {
        &self.tables
    }

    /// How many times the view has been rebuilt.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Rebuild the tree if anything asked for it. Returns whether it did.
    ///
    /// Every registered model's redraw flag is consumed, even after the first
    /// one that is set.
    pub fn layout<V: View + ?Sized>(&mut self, view: &mut V) -> bool {
        let mut models_changed = false;
        for model in &self.models {
            models_changed |= model.borrow_mut().needs_redraw();
        }
        if !(self.dirty || models_changed || self.root.is_none()) {
            return false;
        }

        let mut cx = BuildContext::new(&mut self.tables, &self.config);
        let mut root = view.content(&mut cx);
        let size = root.desired_size();

        if let Some(key) = self.focused.clone() {
            if !with_keyed(root.as_mut(), &key, &mut |el| el.set_focused(true)) {
                debug!(%key, "focused element is gone after rebuild");
                self.focused = None;
            }
        }

        self.root = Some(root);
        self.dirty = false;
        self.rebuilds += 1;
        debug!(rebuilds = self.rebuilds, models_changed, width = size.width, height = size.height, "view rebuilt");
        true
    }

    /// Produce the next frame and the cells that changed since the last one.
    pub fn render<V: View + ?Sized>(&mut self, view: &mut V) -> Vec<CellUpdate> {
        self.layout(view);

        std::mem::swap(&mut self.compositor, &mut self.previous);
        self.compositor.fill(&self.backdrop);

        let bounds = self.compositor.bounds();
        let mut frame = Frame::new(&mut self.cache, bounds);
        if let Some(root) = self.root.as_mut() {
            root.draw(bounds, &mut frame, true);
        }
        let strips = frame.finish();
        self.compositor.paint(&strips);

        let updates = if std::mem::take(&mut self.full_repaint) {
            // a size mismatch makes the diff report every cell
            self.compositor.diff(&Compositor::new(0, 0))
        } else {
            self.compositor.diff(&self.previous)
        };
        trace!(strips = strips.len(), updates = updates.len(), "frame rendered");
        updates
    }

    // -----------------------------------------------------------------------
    // Input routing
    // -----------------------------------------------------------------------

    /// Deliver a click. Focus is dropped first; the clicked element may take it.
    pub fn click(&mut self, pos: Offset, cx: &mut EventCtx) -> bool {
        self.blur();
        let handled = match self.root.as_mut() {
            Some(root) => root.click(pos, cx),
            None => false,
        };
        self.apply_focus_request(cx);
        handled
    }

    pub fn pointer_moved(&mut self, pos: Offset) {
        if let Some(root) = self.root.as_mut() {
            root.pointer_moved(pos);
        }
    }

    /// Pointer motion with the left button held: hover for everyone, the drag
    /// itself for the focused element.
    pub fn drag(&mut self, pos: Offset) {
        self.pointer_moved(pos);
        if let (Some(root), Some(key)) = (self.root.as_mut(), self.focused.as_ref()) {
            with_keyed(root.as_mut(), key, &mut |el| el.drag(pos));
        }
    }

    pub fn scroll(&mut self, pos: Offset, delta: i32, cx: &mut EventCtx) {
        if let Some(root) = self.root.as_mut() {
            root.scroll(pos, delta, cx);
        }
    }

    /// Send a key to the focused element.
    pub fn key(&mut self, event: &KeyEvent, cx: &mut EventCtx) -> bool {
        let handled = self.with_focused(|el, cx| el.on_key(event, cx), cx);
        self.apply_focus_request(cx);
        handled
    }

    /// Send pasted or composed text to the focused element.
    pub fn text(&mut self, text: &str, cx: &mut EventCtx) -> bool {
        let handled = self.with_focused(|el, cx| el.on_text(text, cx), cx);
        self.apply_focus_request(cx);
        handled
    }

    fn with_focused<F>(&mut self, mut f: F, cx: &mut EventCtx) -> bool
    where
        F: FnMut(&mut dyn Element, &mut EventCtx) -> bool,
    {
        let (Some(root), Some(key)) = (self.root.as_mut(), self.focused.clone()) else {
            return false;
        };
        let mut handled = false;
        with_keyed(root.as_mut(), &key, &mut |el| handled = f(el, cx));
        handled
    }

    fn apply_focus_request(&mut self, cx: &mut EventCtx) {
        if let Some(key) = cx.take_focus_request() {
            self.focus(&key);
        }
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    pub fn focused(&self) -> Option<&Key> {
        self.focused.as_ref()
    }

    /// Focus the element keyed `key`. Returns `false` if there is none.
    pub fn focus(&mut self, key: &Key) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        let mut focusable = false;
        with_keyed(root.as_mut(), key, &mut |el| focusable = el.can_focus());
        if !focusable {
            return false;
        }
        self.blur();
        if let Some(root) = self.root.as_mut() {
            with_keyed(root.as_mut(), key, &mut |el| el.set_focused(true));
        }
        debug!(%key, "focus moved");
        self.focused = Some(key.clone());
        true
    }

    /// Drop the keyboard focus.
    pub fn blur(&mut self) {
        let Some(key) = self.focused.take() else {
            return;
        };
        if let Some(root) = self.root.as_mut() {
            with_keyed(root.as_mut(), &key, &mut |el| el.set_focused(false));
        }
    }

    pub fn focus_next(&mut self) -> Option<Key> {
        self.cycle_focus(1)
    }

    pub fn focus_previous(&mut self) -> Option<Key> {
        self.cycle_focus(-1)
    }

    /// Focusable keys of the current tree, in tab order.
    pub fn focus_chain(&mut self) -> Vec<Key> {
        self.root.as_mut().map(|root| focusable_keys(root.as_mut())).unwrap_or_default()
    }

    fn cycle_focus(&mut self, step: isize) -> Option<Key> {
        let chain = self.focus_chain();
        if chain.is_empty() {
            return None;
        }
        let len = chain.len() as isize;
        let current = self.focused.as_ref().and_then(|key| chain.iter().position(|k| k == key));
        let next = match current {
            Some(index) => (index as isize + step).rem_euclid(len),
            None if step > 0 => 0,
            None => len - 1,
        };
        let key = chain[next as usize].clone();
        self.focus(&key);
        Some(key)
    }

    /// Number of elements in the current tree.
    pub fn element_count(&mut self) -> usize {
        let mut count = 0;
        if let Some(root) = self.root.as_mut() {
            for_each_descendant(root.as_mut(), &mut |_| count += 1);
        }
        count
    }
}

// ===========================================================================
// Tests
// ===========================================================================
