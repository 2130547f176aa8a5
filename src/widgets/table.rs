//! Virtualized table.
//!
//! Only the rows intersecting the viewport are materialized as elements. The
//! scroll offset and every materialized row cell live in a [`TableState`]
//! kept by the screen's [`TableStateStore`], so both survive view rebuilds.
//! The cells are dropped as a whole when the model's state fingerprint
//! changes.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::element::{Container, Element, ElementExt, Fingerprint, Frame, Key, Node, ParentLink};
use crate::event::context::EventCtx;
use crate::geometry::{Axis, Offset, Region, Size};
use crate::layout::distribute::{ceil_div, floor_div};
use crate::layout::priority::LayoutSpec;
use crate::screen::BuildContext;

use super::spacer::Spacer;

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// Anything a screen watches for changes.
pub trait ViewModel {
    /// Whether the view must be rebuilt. Edge-triggered: reading the flag
    /// clears it.
    fn needs_redraw(&mut self) -> bool;

    fn request_redraw(&mut self);
}

/// An edge-triggered redraw flag for models to embed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawFlag(bool);

impl RedrawFlag {
    pub fn set(&mut self) {
        self.0 = true;
    }

    /// Read and clear.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.0)
    }
}

/// The data behind a [`Table`]: an ordered, finite row collection.
pub trait TableModel: ViewModel {
    type Row;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn row(&self, index: usize) -> Option<&Self::Row>;

    /// Summary of whatever changes which rows are shown (filters, search).
    fn state_fingerprint(&self) -> String;

    /// A row to jump to on the next draw, if any.
    fn scroll_position(&self) -> Option<usize> {
        None
    }

    /// Forget the explicit scroll position after the user scrolled.
    fn invalidate_scroll_position(&mut self) {}

    fn register_table_delegate(&mut self, _delegate: TableDelegate) {}
}

/// A non-owning handle a model can use to ask its table where it is.
#[derive(Clone)]
pub struct TableDelegate(Weak<RefCell<TableState>>);

impl TableDelegate {
    /// Index of the topmost visible row. 0 once the table is gone.
    pub fn current_row(&self) -> usize {
        self.0
            .upgrade()
            .and_then(|state| state.try_borrow().ok().map(|state| state.current_row()))
            .unwrap_or(0)
    }
}

impl fmt::Debug for TableDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TableDelegate").field(&self.current_row()).finish()
    }
}

// ---------------------------------------------------------------------------
// TableState
// ---------------------------------------------------------------------------

/// Scroll position and materialized cells of one table.
#[derive(Default)]
pub struct TableState {
    offset: i32,
    row_height: i32,
    gutter: i32,
    len: usize,
    model_fingerprint: Option<String>,
    cells: HashMap<usize, Box<dyn Element>>,
    window: Range<usize>,
}

impl TableState {
    /// Scroll offset in cells from the top of row 0.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    /// Distance between the tops of neighbouring rows.
    pub fn stride(&self) -> i32 {
        self.row_height + self.gutter
    }

    /// Rows drawn by the last draw.
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    /// Number of materialized row cells.
    pub fn cached_rows(&self) -> usize {
        self.cells.len()
    }

    /// Scroll so `row` sits at the top. Rows past the end clamp to the last
    /// row; an empty table stays at 0.
    fn jump_to(&mut self, row: usize, len: usize) {
        self.offset = match len {
            0 => 0,
            _ => row.min(len - 1) as i32 * self.stride(),
        };
    }

    pub fn current_row(&self) -> usize {
        let stride = self.stride();
        if self.len == 0 || stride <= 0 {
            return 0;
        }
        let row = floor_div(i64::from(self.offset + self.gutter), i64::from(stride));
        row.clamp(0, self.len as i64) as usize
    }
}

impl fmt::Debug for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableState")
            .field("offset", &self.offset)
            .field("row_height", &self.row_height)
            .field("gutter", &self.gutter)
            .field("len", &self.len)
            .field("cached_rows", &self.cells.len())
            .field("window", &self.window)
            .finish()
    }
}

/// Table states by table id, owned by the screen.
#[derive(Debug, Default)]
pub struct TableStateStore {
    states: HashMap<String, Rc<RefCell<TableState>>>,
}

impl TableStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The state for `id`, created on first use.
    pub fn state(&mut self, id: &str) -> Rc<RefCell<TableState>> {
        Rc::clone(self.states.entry(id.to_string()).or_default())
    }

    pub fn get(&self, id: &str) -> Option<Rc<RefCell<TableState>>> {
        self.states.get(id).cloned()
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.states.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}

/// Rows of a table that intersect a viewport of `viewport` cells scrolled by
/// `offset`.
pub fn visible_window(offset: i32, viewport: i32, row_height: i32, gutter: i32, len: usize) -> Range<usize> {
    let stride = i64::from(row_height + gutter);
    if len == 0 || stride <= 0 {
        return 0..0;
    }
    let len = len as i64;
    let first = floor_div(i64::from(offset + gutter), stride).clamp(0, len);
    let last = ceil_div(i64::from(offset + viewport + gutter), stride).clamp(first, len);
    first as usize..last as usize
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

type CellBuilder<R> = Box<dyn Fn(&R, usize) -> Box<dyn Element>>;

/// A scrolling list of model rows, materialized on demand.
///
/// `cell` turns a row into an element. Row cells should carry keys so they
/// can be served from the render cache.
pub struct Table<M: TableModel> {
    node: Node,
    id: String,
    model: Rc<RefCell<M>>,
    state: Rc<RefCell<TableState>>,
    cell: CellBuilder<M::Row>,
    sample: Size,
    scroll_step: i32,
}

impl<M: TableModel + 'static> Table<M> {
    pub fn new(
        cx: &mut BuildContext<'_>,
        id: impl Into<String>,
        model: Rc<RefCell<M>>,
        cell: impl Fn(&M::Row, usize) -> Box<dyn Element> + 'static,
    ) -> Self {
        let id = id.into();
        let state = cx.table_state(&id);
        let gutter = cx.config().gutter;
        let scroll_step = cx.config().scroll_step;
        model.borrow_mut().register_table_delegate(TableDelegate(Rc::downgrade(&state)));

        let mut table = Self {
            node: Node::new(LayoutSpec::TABLE).with_key(Some(Key::new(&id))),
            id,
            model,
            state,
            cell: Box::new(cell),
            sample: Size::ZERO,
            scroll_step,
        };
        table.sync(gutter);
        table
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> Rc<RefCell<TableState>> {
        Rc::clone(&self.state)
    }

    /// Bring the shared state in line with the model and measure row 0.
    fn sync(&mut self, gutter: i32) {
        let model = self.model.borrow();
        let fingerprint = model.state_fingerprint();
        let mut state = self.state.borrow_mut();

        if state.model_fingerprint.as_ref() != Some(&fingerprint) {
            if !state.cells.is_empty() {
                debug!(table = %self.id, dropped = state.cells.len(), "table model changed, dropping cells");
            }
            state.cells.clear();
            state.model_fingerprint = Some(fingerprint);
        }
        state.len = model.len();
        state.gutter = gutter;

        let link = ParentLink { axis: Axis::Vertical, gutter };
        if !state.cells.contains_key(&0) {
            if let Some(row) = model.row(0) {
                let mut cell = (self.cell)(row, 0);
                cell.attach(link);
                state.cells.insert(0, cell);
            }
        }
        self.sample = state.cells.get_mut(&0).map(|cell| cell.desired_size()).unwrap_or(Size::ZERO);
        state.row_height = self.sample.height;

        if let Some(position) = model.scroll_position() {
            let len = state.len;
            state.jump_to(position, len);
        }
    }

    /// Take the cells for `window` out of the state, materializing missing
    /// rows. Stops early at the first row the model cannot produce.
    fn take_window(&self, window: Range<usize>) -> Vec<Box<dyn Element>> {
        let model = self.model.borrow();
        let mut state = self.state.borrow_mut();
        let link = ParentLink { axis: Axis::Vertical, gutter: state.gutter };

        let mut cells = Vec::with_capacity(window.len());
        for index in window {
            let cell = match state.cells.remove(&index) {
                Some(cell) => cell,
                None => match model.row(index) {
                    Some(row) => {
                        let mut cell = (self.cell)(row, index);
                        cell.attach(link);
                        cell
                    }
                    None => {
                        warn!(table = %self.id, index, len = state.len, "model row missing");
                        break;
                    }
                },
            };
            cells.push(cell);
        }
        cells
    }

    fn return_cells(&self, first: usize, cells: Vec<Box<dyn Element>>) {
        let mut state = self.state.borrow_mut();
        for (index, cell) in (first..).zip(cells) {
            state.cells.insert(index, cell);
        }
    }
}

impl<M: TableModel> fmt::Debug for Table<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table").field("id", &self.id).field("state", &self.state).finish_non_exhaustive()
    }
}

impl<M: TableModel + 'static> Element for Table<M> {
    fn kind(&self) -> &'static str {
        "Table"
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn measure(&mut self) -> Size {
        self.sample
    }

    fn draw_content(&mut self, region: Region, frame: &mut Frame<'_>) {
        let len = self.model.borrow().len();
        if len == 0 {
            self.state.borrow_mut().window = 0..0;
            Spacer::new().draw(region, frame, false);
            return;
        }

        let (window, offset, stride, gutter) = {
            let mut state = self.state.borrow_mut();
            if let Some(position) = self.model.borrow().scroll_position() {
                state.jump_to(position, len);
            }
            let window = visible_window(state.offset, region.height, state.row_height, state.gutter, len);
            (window, state.offset, state.stride(), state.gutter)
        };

        let first = window.start;
        let cells = self.take_window(window);
        let count = cells.len();
        if count == 0 {
            self.state.borrow_mut().window = first..first;
            return;
        }

        let mut rows = Container::vertical(cells).with_gutter(gutter).with_key(format!("{}-container", self.id));
        rows.push(Spacer::new().boxed());
        let top = region.y + first as i32 * stride - offset;
        let height = stride * count as i32 - gutter;

        frame.push_clip(region);
        rows.draw(Region::new(region.x, top, region.width, height), frame, true);
        frame.pop_clip();

        let mut cells = rows.into_children();
        cells.pop();
        self.return_cells(first, cells);
        self.state.borrow_mut().window = first..first + count;
        trace!(table = %self.id, first, last = first + count, offset, "table window");
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        let state = self.state.try_borrow().ok()?;
        let pending = self.model.try_borrow().ok()?.scroll_position();
        Some(Fingerprint::of(&(&state.model_fingerprint, state.offset, pending, state.len, state.row_height)))
    }

    fn visit_children(&mut self, f: &mut dyn FnMut(&mut dyn Element)) {
        let window = self.state.borrow().window.clone();
        let first = window.start;
        let mut cells: Vec<Box<dyn Element>> = {
            let mut state = self.state.borrow_mut();
            window.map_while(|index| state.cells.remove(&index)).collect()
        };
        for cell in &mut cells {
            f(cell.as_mut());
        }
        self.return_cells(first, cells);
    }

    fn scroll(&mut self, pos: Offset, delta: i32, cx: &mut EventCtx) {
        if !self.node.hit(pos) {
            return;
        }
        let len = self.model.borrow().len();
        let (offset, current_row) = {
            let mut state = self.state.borrow_mut();
            let max = ((len as i32 - 1) * state.stride()).max(0);
            state.offset = (state.offset + delta * self.scroll_step).clamp(0, max);
            (state.offset, state.current_row())
        };
        {
            let mut model = self.model.borrow_mut();
            model.invalidate_scroll_position();
            model.request_redraw();
        }
        cx.request_redraw();
        debug!(table = %self.id, delta, offset, current_row, "table scrolled");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
