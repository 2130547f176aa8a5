//! Per-event side channel from elements back to the screen.

use crate::element::identity::Key;

/// Requests an element handler can make while handling an input event.
#[derive(Debug, Default)]
pub struct EventCtx {
    focus: Option<Key>,
    quit: bool,
    redraw: bool,
}

impl EventCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for `key` to receive keyboard focus.
    pub fn request_focus(&mut self, key: Key) {
        self.focus = Some(key);
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Ask for the view to be rebuilt before the next frame.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn take_focus_request(&mut self) -> Option<Key> {
        self.focus.take()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }
}
