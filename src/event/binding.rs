//! Key binding registry and resolution.
//!
//! [`KeyBindings`] maps key+modifier combinations to [`BindingAction`]s. The
//! defaults quit on Esc and Ctrl+C and move focus on Tab / Shift+Tab.

use std::collections::HashMap;

use super::input::{KeyCode, KeyEvent, Modifiers};

/// Action to take when a key binding is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingAction {
    Quit,
    FocusNext,
    FocusPrevious,
}

/// Registry of key bindings.
#[derive(Debug, Default)]
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, Modifiers), BindingAction>,
}

impl KeyBindings {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the standard bindings.
    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();
        bindings.bind(KeyCode::Escape, Modifiers::NONE, BindingAction::Quit);
        bindings.bind(KeyCode::Char('c'), Modifiers::CTRL, BindingAction::Quit);
        bindings.bind(KeyCode::Tab, Modifiers::NONE, BindingAction::FocusNext);
        bindings.bind(KeyCode::BackTab, Modifiers::NONE, BindingAction::FocusPrevious);
        // terminals report Shift+Tab as BackTab, most with SHIFT set
        bindings.bind(KeyCode::BackTab, Modifiers::SHIFT, BindingAction::FocusPrevious);
        bindings
    }

    /// Register a binding, replacing any previous one for the same chord.
    pub fn bind(&mut self, code: KeyCode, modifiers: Modifiers, action: BindingAction) {
        self.bindings.insert((code, modifiers), action);
    }

    pub fn unbind(&mut self, code: KeyCode, modifiers: Modifiers) -> Option<BindingAction> {
        self.bindings.remove(&(code, modifiers))
    }

    /// The action bound to exactly this key and modifier set.
    pub fn resolve(&self, event: &KeyEvent) -> Option<BindingAction> {
        self.bindings.get(&(event.code, event.modifiers)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_quit_and_move_focus() {
        let bindings = KeyBindings::with_defaults();
        let resolve = |code, mods| bindings.resolve(&KeyEvent::new(code, mods));
        assert_eq!(resolve(KeyCode::Escape, Modifiers::NONE), Some(BindingAction::Quit));
        assert_eq!(resolve(KeyCode::Char('c'), Modifiers::CTRL), Some(BindingAction::Quit));
        assert_eq!(resolve(KeyCode::Tab, Modifiers::NONE), Some(BindingAction::FocusNext));
        assert_eq!(resolve(KeyCode::BackTab, Modifiers::SHIFT), Some(BindingAction::FocusPrevious));
        assert_eq!(resolve(KeyCode::Char('c'), Modifiers::NONE), None);
    }

    #[test]
    fn bind_replaces_and_unbind_removes() {
        let mut bindings = KeyBindings::new();
        assert!(bindings.is_empty());
        bindings.bind(KeyCode::Char('q'), Modifiers::NONE, BindingAction::FocusNext);
        bindings.bind(KeyCode::Char('q'), Modifiers::NONE, BindingAction::Quit);
        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings.resolve(&KeyEvent::plain(KeyCode::Char('q'))),
            Some(BindingAction::Quit)
        );
        assert_eq!(bindings.unbind(KeyCode::Char('q'), Modifiers::NONE), Some(BindingAction::Quit));
        assert!(bindings.is_empty());
    }
}
