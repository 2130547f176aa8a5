//! TextInput: a focusable single-line text field.
//!
//! Supports cursor movement, a selection extended with Shift+motion or a
//! pointer drag, character insertion and deletion, and placeholder text. The
//! field scrolls horizontally to keep the cursor in view. Every edit is reported to the `on_change` callback, which is how a
//! model attribute is bound to the field.

use std::any::Any;
use std::fmt;
use std::ops::Range;

use crate::element::{Element, Fingerprint, Frame, Key, Node};
use crate::event::context::EventCtx;
use crate::event::input::{KeyCode, KeyEvent, Modifiers};
use crate::geometry::{Offset, Region, Size};
use crate::layout::priority::LayoutSpec;
use crate::render::strip::{CellStyle, Strip};

/// Display length used when none is given.
pub const DEFAULT_LENGTH: i32 = 20;

type ChangeHandler = Box<dyn FnMut(&str)>;

/// A text field with a cursor and placeholder.
///
/// The cursor position is a byte offset into the value and always sits on a
/// char boundary. The selection runs from `anchor` to the cursor.
pub struct TextInput {
    node: Node,
    value: String,
    placeholder: String,
    cursor: usize,
    anchor: Option<usize>,
    /// Columns hidden on the left by the last draw.
    skip: i32,
    length: i32,
    focused: bool,
    style: CellStyle,
    on_change: Option<ChangeHandler>,
}

impl TextInput {
    pub fn new(key: impl Into<Key>) -> Self {
        let mut node = Node::new(LayoutSpec::TEXT_INPUT).with_key(Some(key.into()));
        node.caching = false;
        Self {
            node,
            value: String::new(),
            placeholder: String::new(),
            cursor: 0,
            anchor: None,
            skip: 0,
            length: DEFAULT_LENGTH,
            focused: false,
            style: CellStyle::new().underline(),
            on_change: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.value.len();
        self.anchor = None;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Width of the field in cells.
    pub fn with_length(mut self, length: i32) -> Self {
        self.length = length.max(1);
        self.node.invalidate();
        self
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    /// Call `handler` with the new value after every edit.
    pub fn on_change(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Byte offset of the cursor.
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Byte range of the selected text, if anything is selected.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor.filter(|&a| a != self.cursor)?;
        Some(anchor.min(self.cursor)..anchor.max(self.cursor))
    }

    pub fn selected_text(&self) -> &str {
        self.selection().map_or("", |range| &self.value[range])
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.cursor = self.value.len();
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    pub fn insert_char(&mut self, ch: char) {
        self.remove_selection();
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.changed();
    }

    pub fn insert_str(&mut self, text: &str) {
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        if text.is_empty() {
            return;
        }
        self.remove_selection();
        self.value.insert_str(self.cursor, &text);
        self.cursor += text.len();
        self.changed();
    }

    /// Backspace. Deletes the selection instead when there is one.
    pub fn delete_char(&mut self) {
        if self.remove_selection() {
            self.changed();
            return;
        }
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_char_boundary();
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
        self.changed();
    }

    /// Delete the character under the cursor, or the selection.
    pub fn delete_forward(&mut self) {
        if self.remove_selection() {
            self.changed();
            return;
        }
        if self.cursor >= self.value.len() {
            return;
        }
        let next = self.next_char_boundary();
        self.value.drain(self.cursor..next);
        self.changed();
    }

    pub fn move_cursor_left(&mut self) {
        self.motion(KeyCode::Left, false);
    }

    pub fn move_cursor_right(&mut self) {
        self.motion(KeyCode::Right, false);
    }

    pub fn move_cursor_home(&mut self) {
        self.motion(KeyCode::Home, false);
    }

    pub fn move_cursor_end(&mut self) {
        self.motion(KeyCode::End, false);
    }

    /// Move the cursor for `code`. With `extend` the selection follows the
    /// cursor, otherwise it is dropped. Returns `false` for non-motion keys.
    fn motion(&mut self, code: KeyCode, extend: bool) -> bool {
        let target = match code {
            KeyCode::Left if self.cursor > 0 => self.prev_char_boundary(),
            KeyCode::Right if self.cursor < self.value.len() => self.next_char_boundary(),
            KeyCode::Left | KeyCode::Right => self.cursor,
            KeyCode::Home => 0,
            KeyCode::End => self.value.len(),
            _ => return false,
        };
        self.move_to(target, extend);
        true
    }

    fn move_to(&mut self, target: usize, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
        self.cursor = target;
    }

    /// Remove the selected text without reporting it. Returns whether there
    /// was a selection.
    fn remove_selection(&mut self) -> bool {
        let Some(range) = self.selection() else {
            self.anchor = None;
            return false;
        };
        self.cursor = range.start;
        self.value.drain(range);
        self.anchor = None;
        true
    }

    /// Byte offset of the character at `column`, or the end of the value.
    fn offset_at_column(&self, column: i32) -> usize {
        self.value
            .char_indices()
            .nth(column.max(0) as usize)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Byte offset under the screen position `pos`, using the last draw.
    fn offset_at(&self, pos: Offset) -> Option<usize> {
        let region = self.node.placed()?;
        Some(self.offset_at_column(pos.x - region.x + self.skip))
    }

    fn changed(&mut self) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(&self.value);
        }
    }

    fn prev_char_boundary(&self) -> usize {
        let mut pos = self.cursor.saturating_sub(1);
        while pos > 0 && !self.value.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn next_char_boundary(&self) -> usize {
        let mut pos = self.cursor + 1;
        while pos < self.value.len() && !self.value.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }

    /// Column of the byte offset `at` within the value, in characters.
    fn column_of(&self, at: usize) -> i32 {
        self.value[..at].chars().count() as i32
    }

    fn cursor_column(&self) -> i32 {
        self.column_of(self.cursor)
    }
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextInput")
            .field("key", &self.node.key)
            .field("value", &self.value)
            .field("cursor", &self.cursor)
            .field("selection", &self.selection())
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl Element for TextInput {
    fn kind(&self) -> &'static str {
        "TextInput"
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn measure(&mut self) -> Size {
        Size::new(self.length, 1)
    }

    fn draw_content(&mut self, region: Region, frame: &mut Frame<'_>) {
        if region.is_empty() {
            return;
        }
        frame.fill(Region::new(region.x, region.y, region.width, 1), &self.style);

        let y = region.y;
        // scroll so the cursor cell stays inside the field
        let skip = (self.cursor_column() - region.width + 1).max(0);
        self.skip = skip;
        if self.value.is_empty() {
            if !self.placeholder.is_empty() {
                frame.text(region.x, y, &self.placeholder, &self.style.clone().dim(), region.width);
            }
        } else {
            let selected = self
                .selection()
                .map_or(0..0, |range| self.column_of(range.start)..self.column_of(range.end));
            let highlight = self.style.clone().reverse();
            let mut line = Strip::new(y, region.x);
            for (column, ch) in self.value.chars().enumerate().skip(skip as usize) {
                if line.width() >= region.width {
                    break;
                }
                let style = if selected.contains(&(column as i32)) { &highlight } else { &self.style };
                line.push(ch, style.clone());
            }
            frame.extend([line]);
        }

        if self.focused {
            let column = self.cursor_column() - skip;
            let under = self.value[self.cursor..].chars().next().unwrap_or(' ');
            let mut cursor = Strip::new(y, region.x + column);
            cursor.push(under, self.style.clone().reverse());
            frame.extend([cursor]);
        }
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        Some(Fingerprint::of(&(&self.value, &self.placeholder, self.cursor, self.anchor, self.focused)))
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn activate(&mut self, pos: Offset, cx: &mut EventCtx) -> bool {
        if let Some(at) = self.offset_at(pos) {
            self.move_to(at, false);
        }
        match self.node.key.clone() {
            Some(key) => {
                cx.request_focus(key);
                true
            }
            None => false,
        }
    }

    /// Extend the selection to the dragged-over character.
    fn drag(&mut self, pos: Offset) {
        if !self.focused {
            return;
        }
        if let Some(at) = self.offset_at(pos) {
            self.move_to(at, true);
        }
    }

    fn on_key(&mut self, key: &KeyEvent, _cx: &mut EventCtx) -> bool {
        if let Some(ch) = key.typed_char() {
            self.insert_char(ch);
            return true;
        }
        if self.motion(key.code, key.modifiers.contains(Modifiers::SHIFT)) {
            return true;
        }
        match key.code {
            KeyCode::Char('a') if key.modifiers.contains(Modifiers::CTRL) => self.select_all(),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Delete => self.delete_forward(),
            _ => return false,
        }
        true
    }

    fn on_text(&mut self, text: &str, _cx: &mut EventCtx) -> bool {
        self.insert_str(text);
        true
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
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::render::cache::RenderCache;
    use crate::testing::snapshot::render_to_string;
    use pretty_assertions::assert_eq;

    fn input() -> TextInput {
        TextInput::new("field")
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    #[test]
    fn insert_and_backspace() {
        let mut field = input();
        field.insert_char('a');
        field.insert_char('b');
        assert_eq!(field.value(), "ab");
        field.delete_char();
        assert_eq!(field.value(), "a");
        assert_eq!(field.cursor_position(), 1);
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut field = input().with_value("aé");
        field.move_cursor_left();
        assert_eq!(field.cursor_position(), 1);
        field.delete_forward();
        assert_eq!(field.value(), "a");
        field.move_cursor_home();
        field.insert_char('ü');
        assert_eq!(field.value(), "üa");
        assert_eq!(field.cursor_position(), 2);
    }

    #[test]
    fn editing_at_the_edges_is_a_no_op() {
        let mut field = input();
        field.delete_char();
        field.delete_forward();
        field.move_cursor_left();
        field.move_cursor_right();
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor_position(), 0);
    }

    #[test]
    fn every_edit_reports_the_new_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut field = input().on_change(move |value| sink.borrow_mut().push(value.to_string()));

        let mut cx = EventCtx::new();
        field.on_key(&KeyEvent::plain(KeyCode::Char('h')), &mut cx);
        field.on_text("i!", &mut cx);
        field.on_key(&KeyEvent::plain(KeyCode::Left), &mut cx);
        field.on_key(&KeyEvent::plain(KeyCode::Backspace), &mut cx);

        assert_eq!(*seen.borrow(), vec!["h", "hi!", "h!"]);
    }

    #[test]
    fn unhandled_keys_fall_through() {
        let mut cx = EventCtx::new();
        assert!(!input().on_key(&KeyEvent::plain(KeyCode::Enter), &mut cx));
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    fn shifted(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, Modifiers::SHIFT)
    }

    #[test]
    fn shift_motion_extends_the_selection() {
        let mut field = input().with_value("hello");
        let mut cx = EventCtx::new();
        field.on_key(&shifted(KeyCode::Left), &mut cx);
        field.on_key(&shifted(KeyCode::Left), &mut cx);
        assert_eq!(field.selection(), Some(3..5));
        assert_eq!(field.selected_text(), "lo");

        // a plain motion drops it
        field.on_key(&KeyEvent::plain(KeyCode::Left), &mut cx);
        assert_eq!(field.selection(), None);
        assert_eq!(field.cursor_position(), 2);
    }

    #[test]
    fn typing_replaces_the_selection() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut field = input().with_value("hello").on_change(move |value| sink.borrow_mut().push(value.to_string()));
        let mut cx = EventCtx::new();

        field.on_key(&shifted(KeyCode::Home), &mut cx);
        assert_eq!(field.selected_text(), "hello");
        field.on_key(&KeyEvent::plain(KeyCode::Char('j')), &mut cx);
        assert_eq!(field.value(), "j");
        assert_eq!(*seen.borrow(), vec!["j"]);
    }

    #[test]
    fn deleting_removes_the_selection_first() {
        let mut field = input().with_value("abcdef");
        let mut cx = EventCtx::new();
        field.move_cursor_home();
        field.on_key(&shifted(KeyCode::Right), &mut cx);
        field.on_key(&shifted(KeyCode::Right), &mut cx);
        field.on_key(&KeyEvent::plain(KeyCode::Backspace), &mut cx);
        assert_eq!(field.value(), "cdef");
        assert_eq!(field.cursor_position(), 0);

        field.on_key(&KeyEvent::plain(KeyCode::Delete), &mut cx);
        assert_eq!(field.value(), "def");
    }

    #[test]
    fn ctrl_a_selects_everything_and_paste_replaces_it() {
        let mut field = input().with_value("old");
        let mut cx = EventCtx::new();
        assert!(field.on_key(&KeyEvent::new(KeyCode::Char('a'), Modifiers::CTRL), &mut cx));
        assert_eq!(field.selected_text(), "old");
        field.on_text("new", &mut cx);
        assert_eq!(field.value(), "new");
    }

    #[test]
    fn selected_cells_are_reversed() {
        let mut field = input().with_value("abcd");
        let mut cx = EventCtx::new();
        field.on_key(&shifted(KeyCode::Left), &mut cx);
        field.on_key(&shifted(KeyCode::Left), &mut cx);

        let mut cache = RenderCache::new();
        let region = Region::new(0, 0, 6, 1);
        let mut frame = Frame::new(&mut cache, region);
        field.draw(region, &mut frame, false);
        let strips = frame.finish();
        let line = strips.iter().find(|s| s.cells.first().map(|c| c.ch) == Some('a'));
        let reversed: Vec<bool> = line.map(|s| s.cells.iter().map(|c| c.style.reverse).collect()).unwrap_or_default();
        assert_eq!(reversed, vec![false, false, true, true]);
    }

    #[test]
    fn click_places_the_cursor_and_drag_selects() {
        let mut field = input().with_value("hello");
        render_to_string(&mut field, 8, 1);
        field.set_focused(true);

        let mut cx = EventCtx::new();
        assert!(field.click(Offset::new(1, 0), &mut cx));
        assert_eq!(field.cursor_position(), 1);
        assert_eq!(field.selection(), None);

        field.drag(Offset::new(4, 0));
        assert_eq!(field.selected_text(), "ell");
        field.drag(Offset::new(7, 0));
        assert_eq!(field.selected_text(), "ello");
    }

    #[test]
    fn drag_is_ignored_without_focus() {
        let mut field = input().with_value("hello");
        render_to_string(&mut field, 8, 1);
        field.drag(Offset::new(2, 0));
        assert_eq!(field.selection(), None);
        assert_eq!(field.cursor_position(), 5);
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    #[test]
    fn measures_its_length() {
        assert_eq!(input().with_length(12).desired_size(), Size::new(12, 1));
    }

    #[test]
    fn placeholder_shows_when_empty() {
        let mut field = input().with_placeholder("Search");
        assert_eq!(render_to_string(&mut field, 8, 1), "Search  ");
    }

    #[test]
    fn long_value_scrolls_to_the_cursor() {
        let mut field = input().with_value("abcdefgh");
        field.set_focused(true);
        assert_eq!(render_to_string(&mut field, 5, 1), "efgh ");
        field.move_cursor_home();
        assert_eq!(render_to_string(&mut field, 5, 1), "abcde");
    }

    #[test]
    fn click_requests_focus() {
        let mut field = input();
        render_to_string(&mut field, 5, 1);
        let mut cx = EventCtx::new();
        assert!(field.click(Offset::new(1, 0), &mut cx));
        assert_eq!(cx.take_focus_request(), Some(Key::new("field")));
    }
}
