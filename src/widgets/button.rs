//! Button: a bordered, background-filled label that lights up under the
//! pointer.
//!
//! The button only draws; attach behaviour with
//! [`ElementExt::on_click`](crate::element::ElementExt::on_click).

use std::any::Any;

use crate::element::{Element, ElementExt, Fingerprint, Frame, Key, Node, ParentLink};
use crate::geometry::{Offset, Region, Size};
use crate::render::strip::CellStyle;

use super::label::Label;

/// Colors of a [`Button`] in its two pointer states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ButtonStyle {
    pub fg: String,
    pub bg: String,
    pub hover_fg: String,
    pub hover_bg: String,
    pub border: String,
    pub radius: i32,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            fg: "#d2d2d2".into(),
            bg: "#0a1e64".into(),
            hover_fg: "white".into(),
            hover_bg: "#1e3278".into(),
            border: "#647878".into(),
            radius: 1,
        }
    }
}

pub struct Button {
    node: Node,
    text: String,
    style: ButtonStyle,
    hover: bool,
    inner: Box<dyn Element>,
}

impl Button {
    pub fn new(key: impl Into<Key>, text: impl Into<String>) -> Self {
        let key = key.into();
        let text = text.into();
        let style = ButtonStyle::default();
        let inner = decorate(&key, &text, &style, false);
        let node = Node::new(inner.node().layout).with_key(Some(key));
        Self { node, text, style, hover: false, inner }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self.rebuild();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_hovered(&self) -> bool {
        self.hover
    }

    fn rebuild(&mut self) {
        let Some(key) = self.node.key.clone() else {
            return;
        };
        self.inner = decorate(&key, &self.text, &self.style, self.hover);
        if let Some(link) = self.node.parent() {
            self.inner.attach(link);
        }
        self.node.invalidate();
    }
}

/// The label, background and border stack for one pointer state.
fn decorate(key: &Key, text: &str, style: &ButtonStyle, hover: bool) -> Box<dyn Element> {
    let (fg, bg) = if hover { (&style.hover_fg, &style.hover_bg) } else { (&style.fg, &style.bg) };
    Label::new(text)
        .with_key(key.child("label"))
        .with_style(CellStyle::new().fg(fg.as_str()))
        .background(bg.as_str())
        .border(1, style.radius, style.border.as_str())
        .boxed()
}

impl Element for Button {
    fn kind(&self) -> &'static str {
        "Button"
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn attach(&mut self, link: ParentLink) {
        self.inner.attach(link);
        self.node.layout = self.inner.node().layout;
        self.node.set_parent(link);
    }

    fn measure(&mut self) -> Size {
        self.inner.desired_size()
    }

    fn draw_content(&mut self, region: Region, frame: &mut Frame<'_>) {
        self.inner.draw(region, frame, false);
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        Some(self.inner.fingerprint()?.with(&self.hover))
    }

    fn visit_children(&mut self, f: &mut dyn FnMut(&mut dyn Element)) {
        f(self.inner.as_mut());
    }

    fn pointer_moved(&mut self, pos: Offset) {
        let hover = self.node.hit(pos);
        if hover != self.hover {
            self.hover = hover;
            self.rebuild();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
