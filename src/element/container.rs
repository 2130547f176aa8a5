//! Stacks of children laid out along one axis.
//!
//! A [`Container`] measures bottom-up (children's main extents plus gutters,
//! widest cross extent) and on draw hands the allocation to
//! [`distribute`](crate::layout::distribute::distribute), then draws each
//! child in declared order at the size it was given.

use std::any::Any;

use tracing::trace;

use crate::geometry::{Axis, Region, Size};
use crate::layout::distribute::{combine, distribute, Slot};
use crate::layout::priority::{AxisPriority, LayoutSpec};

use super::frame::Frame;
use super::identity::{Fingerprint, Key};
use super::{Element, Node, ParentLink, DEFAULT_GUTTER};

/// An ordered stack of children along one axis.
pub struct Container {
    node: Node,
    axis: Axis,
    gutter: i32,
    children: Vec<Box<dyn Element>>,
}

impl Container {
    pub fn new(axis: Axis, children: Vec<Box<dyn Element>>) -> Self {
        let layout = match axis {
            Axis::Horizontal => LayoutSpec::HORIZONTAL_STACK,
            Axis::Vertical => LayoutSpec::VERTICAL_STACK,
        };
        let mut container = Self { node: Node::new(layout), axis, gutter: DEFAULT_GUTTER, children };
        container.attach_children();
        container
    }

    /// Children side by side, left to right.
    pub fn horizontal(children: Vec<Box<dyn Element>>) -> Self {
        Self::new(Axis::Horizontal, children)
    }

    /// Children stacked top to bottom.
    pub fn vertical(children: Vec<Box<dyn Element>>) -> Self {
        Self::new(Axis::Vertical, children)
    }

    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.node.key = Some(key.into());
        self
    }

    pub fn with_gutter(mut self, gutter: i32) -> Self {
        self.gutter = gutter.max(0);
        self.attach_children();
        self
    }

    pub fn push(&mut self, mut child: Box<dyn Element>) {
        child.attach(ParentLink { axis: self.axis, gutter: self.gutter });
        self.children.push(child);
        self.node.invalidate();
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn gutter(&self) -> i32 {
        self.gutter
    }

    pub fn children(&self) -> &[Box<dyn Element>] {
        &self.children
    }

    pub fn into_children(self) -> Vec<Box<dyn Element>> {
        self.children
    }

    fn attach_children(&mut self) {
        let link = ParentLink { axis: self.axis, gutter: self.gutter };
        for child in &mut self.children {
            child.attach(link);
        }
        self.node.invalidate();
    }

    /// The weakest priorities among the children along this container's axis.
    fn softest_child(&self) -> Option<AxisPriority> {
        self.children
            .iter()
            .map(|c| c.node().layout.along(self.axis))
            .reduce(AxisPriority::min)
    }
}

impl Element for Container {
    fn kind(&self) -> &'static str {
        match self.axis {
            Axis::Horizontal => "HContainer",
            Axis::Vertical => "VContainer",
        }
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn attach(&mut self, link: ParentLink) {
        self.node.set_parent(link);
        if link.axis == self.axis {
            if let Some(priority) = self.softest_child() {
                *self.node.layout.along_mut(self.axis) = priority;
            }
        }
    }

    fn measure(&mut self) -> Size {
        let sizes: Vec<Size> = self.children.iter_mut().map(|c| c.desired_size()).collect();
        combine(sizes, self.axis, self.gutter)
    }

    fn draw_content(&mut self, region: Region, frame: &mut Frame<'_>) {
        let axis = self.axis;
        let slots: Vec<Slot> = self
            .children
            .iter_mut()
            .map(|child| {
                let priority = child.node().layout.along(axis);
                Slot::new(axis.main_of(child.desired_size()), priority.resistance, priority.hugging)
            })
            .collect();

        let distribution = distribute(&slots, self.gutter, axis.main_of(region.size()));
        if !distribution.is_exact() {
            trace!(
                key = ?self.node.key,
                overflow = distribution.overflow,
                allocated = axis.main_of(region.size()),
                "container overflow"
            );
        }

        let cached = self.children.len() > 1;
        let mut cursor = axis.start_of(region);
        for (child, size) in self.children.iter_mut().zip(distribution.sizes) {
            child.draw(axis.slice(region, cursor, size), frame, cached);
            cursor += size + self.gutter;
        }
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        Fingerprint::all(self.children.iter().map(|c| c.fingerprint()))
            .map(|fp| fp.with(&(self.axis, self.gutter)))
    }

    fn visit_children(&mut self, f: &mut dyn FnMut(&mut dyn Element)) {
        for child in &mut self.children {
            f(child.as_mut());
        }
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
