//! Label: static text centered in its region.

use std::any::Any;

use crate::element::{Element, Fingerprint, Frame, Key, Node};
use crate::geometry::{Region, Size, Spacing};
use crate::layout::priority::LayoutSpec;
use crate::render::strip::{cell_width, CellStyle};

/// One or more lines of text.
///
/// The text block is centered inside the padded region. Text wider than the
/// region is cut off at the region's right edge.
#[derive(Debug, Clone)]
pub struct Label {
    node: Node,
    text: String,
    style: CellStyle,
    padding: Spacing,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            node: Node::new(LayoutSpec::LABEL),
            text: text.into(),
            style: CellStyle::new(),
            padding: Spacing::symmetric(1, 0),
        }
    }

    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.node.key = Some(key.into());
        self
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self.node.invalidate();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.node.invalidate();
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

impl Element for Label {
    fn kind(&self) -> &'static str {
        "Label"
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn measure(&mut self) -> Size {
        let width = self.lines().map(cell_width).max().unwrap_or(0);
        let height = self.lines().count() as i32;
        Size::new(width, height).pad(self.padding)
    }

    fn draw_content(&mut self, region: Region, frame: &mut Frame<'_>) {
        let avail_w = region.width - self.padding.width();
        let avail_h = region.height - self.padding.height();
        let block_h = self.lines().count() as i32;
        let top = region.y + self.padding.top + ((avail_h - block_h) / 2).max(0);

        for (row, line) in self.lines().enumerate() {
            let y = top + row as i32;
            if y >= region.bottom() {
                break;
            }
            let x = region.x + self.padding.left + ((avail_w - cell_width(line)) / 2).max(0);
            frame.text(x, y, line, &self.style, region.right() - x);
        }
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        Some(Fingerprint::of(&(&self.text, &self.style, self.padding)))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::snapshot::render_to_string;
    use pretty_assertions::assert_eq;

    #[test]
    fn measure_includes_padding() {
        assert_eq!(Label::new("hello").desired_size(), Size::new(7, 1));
        assert_eq!(
            Label::new("hello").with_padding(Spacing::ZERO).desired_size(),
            Size::new(5, 1)
        );
    }

    #[test]
    fn multi_line_measure_takes_widest_line() {
        assert_eq!(Label::new("ab\nabcd\n").desired_size(), Size::new(6, 3));
    }

    #[test]
    fn text_is_centered() {
        assert_eq!(render_to_string(&mut Label::new("hi"), 8, 3), "        \n   hi   \n        ");
    }

    #[test]
    fn wide_text_is_cut_at_the_edge() {
        assert_eq!(render_to_string(&mut Label::new("abcdefgh"), 5, 1), " abcd");
    }

    #[test]
    fn fingerprint_tracks_text_and_style() {
        let plain = Label::new("x").fingerprint();
        assert_eq!(plain, Label::new("x").fingerprint());
        assert_ne!(plain, Label::new("y").fingerprint());
        assert_ne!(plain, Label::new("x").with_style(CellStyle::new().bold()).fingerprint());
    }

    #[test]
    fn set_text_invalidates_measure() {
        let mut label = Label::new("a");
        assert_eq!(label.desired_size().width, 3);
        label.set_text("abc");
        assert_eq!(label.desired_size().width, 5);
    }
}
