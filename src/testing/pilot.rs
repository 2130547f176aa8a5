//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` wraps an [`App`] without a terminal and offers high-level input
//! simulation plus access to the rendered screen as text.

use std::cell::RefCell;
use std::rc::Rc;

use crate::app::{App, AppConfig};
use crate::error::Result;
use crate::event::input::{InputEvent, KeyCode, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
use crate::screen::View;
use crate::widgets::table::ViewModel;

use super::snapshot::compositor_to_string;

/// A headless app driver for tests.
///
/// ```ignore
/// let mut pilot = Pilot::new(Directory::new(), 40, 12);
/// pilot.click(3, 1);
/// pilot.type_text("ada");
/// insta::assert_snapshot!(pilot.screen_text());
/// ```
pub struct Pilot<V: View> {
    app: App<V>,
}

impl<V: View> Pilot<V> {
    pub fn new(view: V, width: u16, height: u16) -> Self {
        let mut pilot = Self { app: App::new_headless(view, width, height) };
        pilot.frame();
        pilot
    }

    /// A pilot running with `config`. Fails if the config is invalid.
    pub fn with_config(view: V, config: AppConfig, width: u16, height: u16) -> Result<Self> {
        let mut pilot = Self { app: App::headless_with_config(view, config, width, height)? };
        pilot.frame();
        Ok(pilot)
    }

    /// Watch `model` for redraw requests and render a fresh frame.
    pub fn register_model(&mut self, model: Rc<RefCell<dyn ViewModel>>) {
        self.app.register_model(model);
        self.frame();
    }

    // ── Input simulation ─────────────────────────────────────────────

    pub fn press(&mut self, code: KeyCode) {
        self.press_with(code, Modifiers::NONE);
    }

    pub fn press_with(&mut self, code: KeyCode, modifiers: Modifiers) {
        self.send(InputEvent::Key(KeyEvent::new(code, modifiers)));
    }

    /// Type `text` one key press per character.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.send(InputEvent::Paste(text.to_string()));
    }

    /// Left click at `(x, y)`.
    pub fn click(&mut self, x: u16, y: u16) {
        self.mouse(MouseAction::Down(MouseBtn::Left), x, y);
    }

    /// Move the pointer to `(x, y)` with the left button held.
    pub fn drag(&mut self, x: u16, y: u16) {
        self.mouse(MouseAction::Drag(MouseBtn::Left), x, y);
    }

    pub fn hover(&mut self, x: u16, y: u16) {
        self.mouse(MouseAction::Moved, x, y);
    }

    /// Turn the wheel by `notches` at `(x, y)`. Positive scrolls down.
    pub fn scroll(&mut self, x: u16, y: u16, notches: i32) {
        self.mouse(MouseAction::Scroll(notches), x, y);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.send(InputEvent::Resize { width, height });
    }

    fn mouse(&mut self, kind: MouseAction, x: u16, y: u16) {
        self.send(InputEvent::Mouse(MouseEvent::new(kind, x, y)));
    }

    /// Deliver `event` and render the frame that follows it.
    pub fn send(&mut self, event: InputEvent) {
        self.app.handle_input(event);
        self.frame();
    }

    /// Render one frame. Returns how many cells changed.
    pub fn frame(&mut self) -> usize {
        // no driver in headless mode, so no I/O error
        self.app.render().unwrap_or(0)
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn app(&self) -> &App<V> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App<V> {
        &mut self.app
    }

    pub fn view(&self) -> &V {
        &self.app.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.app.view
    }

    pub fn is_running(&self) -> bool {
        !self.app.should_quit()
    }

    /// The last rendered frame as text.
    pub fn screen_text(&self) -> String {
        compositor_to_string(self.app.screen.compositor())
    }

    /// Row `y` of the last rendered frame.
    pub fn row(&self, y: u16) -> String {
        self.app.screen.compositor().row_text(y)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::element::{Element, ElementExt, Key};
    use crate::screen::BuildContext;
    use crate::widgets::button::Button;
    use crate::widgets::input::TextInput;
    use crate::widgets::label::Label;
    use pretty_assertions::assert_eq;

    struct Clicker {
        clicks: Rc<Cell<u32>>,
    }

    impl View for Clicker {
        fn content(&mut self, cx: &mut BuildContext<'_>) -> Box<dyn Element> {
            let clicks = Rc::clone(&self.clicks);
            cx.vertical(vec![
                Label::new(format!("clicks {}", self.clicks.get())).with_key("count").boxed(),
                Button::new("more", "+1").on_click(move |cx| {
                    clicks.set(clicks.get() + 1);
                    cx.request_redraw();
                }).boxed(),
                TextInput::new("note").with_length(8).boxed(),
            ])
            .boxed()
        }
    }

    fn pilot() -> Pilot<Clicker> {
        Pilot::new(Clicker { clicks: Rc::new(Cell::new(0)) }, 12, 7)
    }

    #[test]
    fn starts_running_with_a_frame() {
        let pilot = pilot();
        assert!(pilot.is_running());
        assert!(!pilot.app().has_driver());
        assert!(pilot.screen_text().contains("clicks 0"));
    }

    #[test]
    fn clicking_the_button_updates_the_label() {
        let mut pilot = pilot();
        // button occupies rows 2..5
        pilot.click(5, 3);
        assert_eq!(pilot.view().clicks.get(), 1);
        assert!(pilot.row(0).contains("clicks 1"));
    }

    #[test]
    fn typing_goes_to_the_clicked_input() {
        let mut pilot = pilot();
        pilot.click(1, 6);
        assert_eq!(pilot.app().screen.focused(), Some(&Key::new("note")));
        pilot.type_text("hey");
        assert!(pilot.row(6).starts_with("hey"));
    }

    #[test]
    fn dragging_selects_text_to_replace() {
        let mut pilot = pilot();
        pilot.click(1, 6);
        pilot.type_text("hello");
        pilot.click(0, 6);
        pilot.drag(3, 6);
        pilot.type_text("J");
        assert!(pilot.row(6).starts_with("Jlo"));
    }

    #[test]
    fn quit_binding_stops_the_app() {
        let mut pilot = pilot();
        pilot.press_with(KeyCode::Char('c'), Modifiers::CTRL);
        assert!(!pilot.is_running());
    }

    #[test]
    fn unchanged_frame_sends_nothing() {
        let mut pilot = pilot();
        assert_eq!(pilot.frame(), 0);
    }

    #[test]
    fn invalid_config_is_refused() {
        let view = Clicker { clicks: Rc::new(Cell::new(0)) };
        assert!(Pilot::with_config(view, AppConfig::new().with_fps(0), 10, 5).is_err());
    }
}
