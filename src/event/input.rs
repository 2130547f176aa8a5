//! Input event types wrapping crossterm for decoupling.
//!
//! Defines [`InputEvent`], [`KeyEvent`], [`MouseEvent`] and supporting types.
//! Crossterm events are converted with [`from_crossterm`] so the rest of the
//! crate never depends on crossterm directly.

use std::ops::{BitAnd, BitOr};

use crossterm::event as ct;

// ---------------------------------------------------------------------------
// KeyCode
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press without modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self { code, modifiers: Modifiers::NONE }
    }

    /// The character this key types, if it is a plain or shifted character.
    pub fn typed_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.modifiers.contains(Modifiers::CTRL) && !self.modifiers.contains(Modifiers::ALT) => {
                Some(c)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// MouseBtn / MouseAction / MouseEvent
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
    /// Wheel notches; positive scrolls the content down.
    Scroll(i32),
}

/// A mouse event with action, position, and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(kind: MouseAction, x: u16, y: u16) -> Self {
        Self { kind, x, y, modifiers: Modifiers::NONE }
    }

    /// The same event with its position divided by `scale`.
    ///
    /// Backends that report positions in device units use a scale above 1.
    pub fn scaled(mut self, scale: u16) -> Self {
        if scale > 1 {
            self.x /= scale;
            self.y /= scale;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    Paste(String),
}

// ---------------------------------------------------------------------------
// Conversion from crossterm
// ---------------------------------------------------------------------------

fn convert_modifiers(m: ct::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(ct::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(ct::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(ct::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

fn convert_key_code(code: ct::KeyCode) -> Option<KeyCode> {
    Some(match code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Esc => KeyCode::Escape,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::BackTab => KeyCode::BackTab,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Delete => KeyCode::Delete,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        ct::KeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    })
}

fn convert_mouse_button(b: ct::MouseButton) -> MouseBtn {
    match b {
        ct::MouseButton::Left => MouseBtn::Left,
        ct::MouseButton::Right => MouseBtn::Right,
        ct::MouseButton::Middle => MouseBtn::Middle,
    }
}

/// Convert a crossterm key event. Key releases and unsupported keys give `None`.
pub fn key_from_crossterm(event: ct::KeyEvent) -> Option<KeyEvent> {
    if event.kind == ct::KeyEventKind::Release {
        return None;
    }
    Some(KeyEvent::new(convert_key_code(event.code)?, convert_modifiers(event.modifiers)))
}

/// Convert a crossterm event. Events the crate does not handle give `None`.
pub fn from_crossterm(event: ct::Event) -> Option<InputEvent> {
    match event {
        ct::Event::Key(key) => key_from_crossterm(key).map(InputEvent::Key),
        ct::Event::Mouse(mouse) => {
            let kind = match mouse.kind {
                ct::MouseEventKind::Down(b) => MouseAction::Down(convert_mouse_button(b)),
                ct::MouseEventKind::Up(b) => MouseAction::Up(convert_mouse_button(b)),
                ct::MouseEventKind::Drag(b) => MouseAction::Drag(convert_mouse_button(b)),
                ct::MouseEventKind::Moved => MouseAction::Moved,
                ct::MouseEventKind::ScrollDown => MouseAction::Scroll(1),
                ct::MouseEventKind::ScrollUp => MouseAction::Scroll(-1),
                _ => return None,
            };
            Some(InputEvent::Mouse(MouseEvent {
                kind,
                x: mouse.column,
                y: mouse.row,
                modifiers: convert_modifiers(mouse.modifiers),
            }))
        }
        ct::Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        ct::Event::Paste(text) => Some(InputEvent::Paste(text)),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Modifiers ────────────────────────────────────────────────────

    #[test]
    fn modifiers_combine_and_test() {
        let mods = Modifiers::CTRL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert_eq!(mods & Modifiers::CTRL, Modifiers::CTRL);
        assert!(Modifiers::NONE.is_empty());
    }

    // ── KeyEvent ─────────────────────────────────────────────────────

    #[test]
    fn typed_char_ignores_control_chords() {
        assert_eq!(KeyEvent::plain(KeyCode::Char('a')).typed_char(), Some('a'));
        assert_eq!(KeyEvent::new(KeyCode::Char('A'), Modifiers::SHIFT).typed_char(), Some('A'));
        assert_eq!(KeyEvent::new(KeyCode::Char('c'), Modifiers::CTRL).typed_char(), None);
        assert_eq!(KeyEvent::plain(KeyCode::Enter).typed_char(), None);
    }

    // ── crossterm keys ───────────────────────────────────────────────

    #[test]
    fn from_crossterm_key_with_modifiers() {
        let event = ct::KeyEvent::new(ct::KeyCode::Char('c'), ct::KeyModifiers::CONTROL);
        let ke = key_from_crossterm(event);
        assert_eq!(ke, Some(KeyEvent::new(KeyCode::Char('c'), Modifiers::CTRL)));
    }

    #[test]
    fn from_crossterm_key_navigation() {
        for (code, expected) in [
            (ct::KeyCode::Left, KeyCode::Left),
            (ct::KeyCode::Home, KeyCode::Home),
            (ct::KeyCode::BackTab, KeyCode::BackTab),
            (ct::KeyCode::Esc, KeyCode::Escape),
            (ct::KeyCode::F(5), KeyCode::F(5)),
        ] {
            let ke = key_from_crossterm(ct::KeyEvent::new(code, ct::KeyModifiers::NONE));
            assert_eq!(ke.map(|k| k.code), Some(expected));
        }
    }

    #[test]
    fn key_release_is_dropped() {
        let event = ct::KeyEvent::new_with_kind(
            ct::KeyCode::Char('x'),
            ct::KeyModifiers::NONE,
            ct::KeyEventKind::Release,
        );
        assert_eq!(key_from_crossterm(event), None);
    }

    #[test]
    fn unsupported_key_is_dropped() {
        let event = ct::KeyEvent::new(ct::KeyCode::CapsLock, ct::KeyModifiers::NONE);
        assert_eq!(key_from_crossterm(event), None);
    }

    // ── crossterm mouse / other ──────────────────────────────────────

    fn mouse(kind: ct::MouseEventKind) -> ct::Event {
        ct::Event::Mouse(ct::MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: ct::KeyModifiers::NONE,
        })
    }

    #[test]
    fn wheel_maps_to_signed_scroll() {
        let down = from_crossterm(mouse(ct::MouseEventKind::ScrollDown));
        let up = from_crossterm(mouse(ct::MouseEventKind::ScrollUp));
        assert_eq!(down, Some(InputEvent::Mouse(MouseEvent::new(MouseAction::Scroll(1), 7, 3))));
        assert_eq!(up, Some(InputEvent::Mouse(MouseEvent::new(MouseAction::Scroll(-1), 7, 3))));
        assert_eq!(from_crossterm(mouse(ct::MouseEventKind::ScrollLeft)), None);
    }

    #[test]
    fn mouse_down_keeps_position() {
        let event = from_crossterm(mouse(ct::MouseEventKind::Down(ct::MouseButton::Left)));
        assert_eq!(
            event,
            Some(InputEvent::Mouse(MouseEvent::new(MouseAction::Down(MouseBtn::Left), 7, 3)))
        );
    }

    #[test]
    fn resize_and_paste_convert() {
        assert_eq!(
            from_crossterm(ct::Event::Resize(80, 24)),
            Some(InputEvent::Resize { width: 80, height: 24 })
        );
        assert_eq!(
            from_crossterm(ct::Event::Paste("hi".into())),
            Some(InputEvent::Paste("hi".into()))
        );
        assert_eq!(from_crossterm(ct::Event::FocusGained), None);
    }

    #[test]
    fn scaled_divides_position() {
        let event = MouseEvent::new(MouseAction::Moved, 20, 9).scaled(2);
        assert_eq!((event.x, event.y), (10, 4));
        let same = MouseEvent::new(MouseAction::Moved, 20, 9).scaled(0);
        assert_eq!((same.x, same.y), (20, 9));
    }
}
