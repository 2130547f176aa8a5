//! Decorators that wrap a single element: background, padding, border and
//! click handling.
//!
//! Each decorator takes the wrapped element's layout priorities, derives its
//! identity from the wrapped element's key, and always draws the child fresh
//! since the decorator itself is the unit the parent caches.

use std::any::Any;
use std::fmt;

use crate::event::context::EventCtx;
use crate::geometry::{Offset, Region, Size, Spacing};
use crate::render::strip::{CellStyle, Strip};

use super::frame::Frame;
use super::identity::Fingerprint;
use super::{Element, Node, ParentLink};

// ---------------------------------------------------------------------------
// ElementExt
// ---------------------------------------------------------------------------

/// Builder methods available on every element.
pub trait ElementExt: Sized {
    fn boxed(self) -> Box<dyn Element>;

    /// Fill the element's region with `color` behind it.
    fn background(self, color: impl Into<String>) -> Background {
        Background::new(self.boxed(), color)
    }

    /// Surround the element with empty cells.
    fn padding(self, spacing: Spacing) -> Padding {
        Padding::new(self.boxed(), spacing)
    }

    /// Frame the element with box-drawing glyphs.
    fn border(self, thickness: i32, radius: i32, color: impl Into<String>) -> Border {
        Border::new(self.boxed(), thickness, radius, color)
    }

    /// Run `handler` when the element is clicked.
    fn on_click(self, handler: impl FnMut(&mut EventCtx) + 'static) -> OnClick {
        OnClick::new(self.boxed(), handler)
    }
}

impl<T: Element> ElementExt for T {
    fn boxed(self) -> Box<dyn Element> {
        Box::new(self)
    }
}

impl ElementExt for Box<dyn Element> {
    fn boxed(self) -> Box<dyn Element> {
        self
    }
}

/// Node for a decorator around `child`: same priorities, derived key.
fn wrapper_node(child: &dyn Element, suffix: &str) -> Node {
    let mut node = Node::new(child.node().layout);
    node.key = child.key().map(|key| key.child(suffix));
    node
}

/// Forward `link` to the child and pick up its (possibly updated) priorities.
fn attach_wrapper(node: &mut Node, child: &mut dyn Element, link: ParentLink) {
    child.attach(link);
    node.layout = child.node().layout;
    node.set_parent(link);
}

macro_rules! impl_wrapper_plumbing {
    () => {
        fn node(&self) -> &Node {
            &self.node
        }

        fn node_mut(&mut self) -> &mut Node {
            &mut self.node
        }

        fn attach(&mut self, link: ParentLink) {
            attach_wrapper(&mut self.node, self.child.as_mut(), link);
        }

        fn visit_children(&mut self, f: &mut dyn FnMut(&mut dyn Element)) {
            f(self.child.as_mut());
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    };
}

// ---------------------------------------------------------------------------
// Background
// ---------------------------------------------------------------------------

/// Fills its region with a solid color, then draws the child on top.
pub struct Background {
    node: Node,
    child: Box<dyn Element>,
    color: String,
}

impl Background {
    pub fn new(child: Box<dyn Element>, color: impl Into<String>) -> Self {
        Self { node: wrapper_node(child.as_ref(), "background"), child, color: color.into() }
    }
}

impl Element for Background {
    fn kind(&self) -> &'static str {
        "Background"
    }

    fn measure(&mut self) -> Size {
        self.child.desired_size()
    }

    fn draw_content(&mut self, region: Region, frame: &mut Frame<'_>) {
        frame.fill(region, &CellStyle::new().bg(self.color.as_str()));
        self.child.draw(region, frame, false);
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        Some(self.child.fingerprint()?.with(&("background", &self.color)))
    }

    impl_wrapper_plumbing!();
}

// ---------------------------------------------------------------------------
// Padding
// ---------------------------------------------------------------------------

/// Insets the child by a fixed amount on each side.
pub struct Padding {
    node: Node,
    child: Box<dyn Element>,
    spacing: Spacing,
}

impl Padding {
    pub fn new(child: Box<dyn Element>, spacing: Spacing) -> Self {
        Self { node: wrapper_node(child.as_ref(), "padding"), child, spacing }
    }
}

impl Element for Padding {
    fn kind(&self) -> &'static str {
        "Padding"
    }

    fn measure(&mut self) -> Size {
        self.child.desired_size().pad(self.spacing)
    }

    fn draw_content(&mut self, region: Region, frame: &mut Frame<'_>) {
        self.child.draw(region.shrink(self.spacing), frame, false);
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        Some(self.child.fingerprint()?.with(&("padding", self.spacing)))
    }

    impl_wrapper_plumbing!();
}

// ---------------------------------------------------------------------------
// Border
// ---------------------------------------------------------------------------

const SQUARE: [char; 6] = ['┌', '┐', '└', '┘', '─', '│'];
const ROUNDED: [char; 6] = ['╭', '╮', '╰', '╯', '─', '│'];

/// Frames the child. The outer ring uses box-drawing glyphs, with rounded
/// corners when `radius > 0`; any further rings stay empty. The child is
/// clipped to the inner area.
pub struct Border {
    node: Node,
    child: Box<dyn Element>,
    thickness: i32,
    radius: i32,
    color: String,
}

impl Border {
    pub fn new(child: Box<dyn Element>, thickness: i32, radius: i32, color: impl Into<String>) -> Self {
        Self {
            node: wrapper_node(child.as_ref(), "border"),
            child,
            thickness: thickness.max(0),
            radius: radius.max(0),
            color: color.into(),
        }
    }

    fn inner(&self, region: Region) -> Region {
        region.shrink(Spacing::all(self.thickness))
    }

    fn draw_frame(&self, region: Region, frame: &mut Frame<'_>) {
        if self.thickness == 0 || region.is_empty() {
            return;
        }
        let [tl, tr, bl, br, h, v] = if self.radius > 0 { ROUNDED } else { SQUARE };
        let style = CellStyle::new().fg(self.color.as_str());
        let (left, right) = (region.x, region.right() - 1);
        let (top, bottom) = (region.y, region.bottom() - 1);

        let edge = |y: i32, first: char, fill: char, last: char| {
            let mut strip = Strip::new(y, left);
            for x in left..=right {
                let ch = match x {
                    _ if x == left => first,
                    _ if x == right => last,
                    _ => fill,
                };
                strip.push(ch, style.clone());
            }
            strip
        };
        frame.extend([edge(top, tl, h, tr)]);
        if bottom > top {
            frame.extend([edge(bottom, bl, h, br)]);
        }
        for y in top + 1..bottom {
            let mut left_edge = Strip::new(y, left);
            left_edge.push(v, style.clone());
            frame.extend([left_edge]);
            if right > left {
                let mut right_edge = Strip::new(y, right);
                right_edge.push(v, style.clone());
                frame.extend([right_edge]);
            }
        }
    }
}

impl Element for Border {
    fn kind(&self) -> &'static str {
        "Border"
    }

    fn measure(&mut self) -> Size {
        self.child.desired_size().pad(Spacing::all(self.thickness))
    }

    fn draw_content(&mut self, region: Region, frame: &mut Frame<'_>) {
        let inner = self.inner(region);
        frame.push_clip(inner);
        self.child.draw(inner, frame, false);
        frame.pop_clip();
        self.draw_frame(region, frame);
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        let style = ("border", self.thickness, self.radius, &self.color);
        Some(self.child.fingerprint()?.with(&style))
    }

    impl_wrapper_plumbing!();
}

// ---------------------------------------------------------------------------
// OnClick
// ---------------------------------------------------------------------------

/// Calls a handler when a click lands on the child.
pub struct OnClick {
    node: Node,
    child: Box<dyn Element>,
    handler: Box<dyn FnMut(&mut EventCtx)>,
}

impl OnClick {
    pub fn new(child: Box<dyn Element>, handler: impl FnMut(&mut EventCtx) + 'static) -> Self {
        Self { node: wrapper_node(child.as_ref(), "click"), child, handler: Box::new(handler) }
    }
}

impl fmt::Debug for OnClick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnClick").field("key", &self.node.key).finish_non_exhaustive()
    }
}

impl Element for OnClick {
    fn kind(&self) -> &'static str {
        "OnClick"
    }

    fn measure(&mut self) -> Size {
        self.child.desired_size()
    }

    fn draw_content(&mut self, region: Region, frame: &mut Frame<'_>) {
        self.child.draw(region, frame, false);
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        self.child.fingerprint()
    }

    fn activate(&mut self, _pos: Offset, cx: &mut EventCtx) -> bool {
        (self.handler)(cx);
        true
    }

    impl_wrapper_plumbing!();
}

// ===========================================================================
// Tests
// ===========================================================================
