//! Spacer: flexible empty space.

use std::any::Any;

use crate::element::{Element, Fingerprint, Frame, Node};
use crate::geometry::{Region, Size};
use crate::layout::priority::LayoutSpec;

/// Empty space that soaks up slack before anything else grows.
///
/// A spacer measures minus one gutter along its container's axis, so a spacer
/// that receives no extra space also cancels the gutter in front of it.
#[derive(Debug, Clone)]
pub struct Spacer {
    node: Node,
}

impl Spacer {
    pub fn new() -> Self {
        let mut node = Node::new(LayoutSpec::SPACER);
        node.caching = false;
        Self { node }
    }
}

impl Default for Spacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for Spacer {
    fn kind(&self) -> &'static str {
        "Spacer"
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn measure(&mut self) -> Size {
        match self.node.parent() {
            Some(link) => link.axis.size(-link.gutter, 0),
            None => Size::ZERO,
        }
    }

    fn draw_content(&mut self, _region: Region, _frame: &mut Frame<'_>) {}

    fn fingerprint(&self) -> Option<Fingerprint> {
        Some(Fingerprint::EMPTY)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
