//! App: configuration, input handling and the frame loop.
//!
//! [`App`] ties together the screen, the view, key bindings and the terminal
//! driver. [`App::new_headless`] builds one without a terminal for tests.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::event::binding::{BindingAction, KeyBindings};
use crate::event::context::EventCtx;
use crate::event::input::{InputEvent, MouseAction, MouseBtn, MouseEvent};
use crate::event::source::{EventSource, TerminalEvents};
use crate::geometry::Offset;
use crate::logging;
use crate::render::driver::Driver;
use crate::screen::{Screen, View};
use crate::widgets::table::ViewModel;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Terminal window title.
    pub title: String,
    /// Target frames per second for the render loop.
    pub fps: u32,
    /// Pointer positions are divided by this before they reach elements.
    pub pointer_scale: u16,
    /// Cells a table scrolls per wheel notch.
    pub scroll_step: i32,
    /// Gutter used by containers built through the build context.
    pub gutter: i32,
    /// Color behind everything, if any.
    pub backdrop: Option<String>,
    /// Where to write logs. Nothing is logged when unset.
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "retained-tui".into(),
            fps: 60,
            pointer_scale: 1,
            scroll_step: 1,
            gutter: 1,
            backdrop: None,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_pointer_scale(mut self, scale: u16) -> Self {
        self.pointer_scale = scale;
        self
    }

    pub fn with_scroll_step(mut self, step: i32) -> Self {
        self.scroll_step = step;
        self
    }

    pub fn with_gutter(mut self, gutter: i32) -> Self {
        self.gutter = gutter;
        self
    }

    pub fn with_backdrop(mut self, color: impl Into<String>) -> Self {
        self.backdrop = Some(color.into());
        self
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Reject values the frame loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(Error::Config("fps must be at least 1".into()));
        }
        if self.pointer_scale == 0 {
            return Err(Error::Config("pointer_scale must be at least 1".into()));
        }
        if self.gutter < 0 {
            return Err(Error::Config(format!("gutter must not be negative, got {}", self.gutter)));
        }
        Ok(())
    }

    /// Time between two frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application struct.
///
/// The driver is optional so the whole app can run headless in tests.
pub struct App<V: View> {
    pub screen: Screen,
    pub view: V,
    /// Terminal output driver. `None` in headless mode.
    driver: Option<Driver>,
    pub bindings: KeyBindings,
    config: AppConfig,
    running: bool,
}

impl<V: View> App<V> {
    /// An app on the real terminal, sized to it.
    ///
    /// Installs the file logger when the config names a log path.
    pub fn new(view: V, config: AppConfig) -> Result<Self> {
        config.validate()?;
        if let Some(path) = &config.log_path {
            logging::init(path)?;
        }
        let (width, height) = Driver::terminal_size()?;
        let driver = Driver::new()?;
        info!(width, height, fps = config.fps, "starting app");
        Ok(Self::assemble(view, config, width, height, Some(driver)))
    }

    /// An app without a terminal, using the default config.
    pub fn new_headless(view: V, width: u16, height: u16) -> Self {
        Self::assemble(view, AppConfig::default(), width, height, None)
    }

    /// An app without a terminal.
    pub fn headless_with_config(view: V, config: AppConfig, width: u16, height: u16) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(view, config, width, height, None))
    }

    fn assemble(view: V, config: AppConfig, width: u16, height: u16, driver: Option<Driver>) -> Self {
        Self {
            screen: Screen::new(width, height, config.clone()),
            view,
            driver,
            bindings: KeyBindings::with_defaults(),
            config,
            running: true,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Rebuild the view whenever `model` asks for a redraw.
    pub fn register_model(&mut self, model: Rc<RefCell<dyn ViewModel>>) {
        self.screen.register_model(model);
    }

    pub fn remove_model(&mut self, model: &Rc<RefCell<dyn ViewModel>>) -> bool {
        self.screen.remove_model(model)
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Route one input event: key bindings first, then the screen.
    pub fn handle_input(&mut self, event: InputEvent) {
        let mut cx = EventCtx::new();
        match event {
            InputEvent::Key(key) => match self.bindings.resolve(&key) {
                Some(BindingAction::Quit) => self.running = false,
                Some(BindingAction::FocusNext) => {
                    self.screen.focus_next();
                }
                Some(BindingAction::FocusPrevious) => {
                    self.screen.focus_previous();
                }
                None => {
                    self.screen.key(&key, &mut cx);
                }
            },
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, &mut cx),
            InputEvent::Resize { width, height } => {
                debug!(width, height, "resized");
                self.screen.resize(width, height);
            }
            InputEvent::Paste(text) => {
                self.screen.text(&text, &mut cx);
            }
        }
        self.finish_event(&cx);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, cx: &mut EventCtx) {
        let mouse = mouse.scaled(self.config.pointer_scale);
        let pos = Offset::new(i32::from(mouse.x), i32::from(mouse.y));
        match mouse.kind {
            MouseAction::Down(MouseBtn::Left) => {
                self.screen.click(pos, cx);
            }
            MouseAction::Drag(MouseBtn::Left) => self.screen.drag(pos),
            MouseAction::Moved | MouseAction::Drag(_) => self.screen.pointer_moved(pos),
            MouseAction::Scroll(delta) => self.screen.scroll(pos, delta, cx),
            MouseAction::Down(_) | MouseAction::Up(_) => {}
        }
    }

    fn finish_event(&mut self, cx: &EventCtx) {
        if cx.quit_requested() {
            self.running = false;
        }
        if cx.redraw_requested() {
            self.screen.mark_dirty();
        }
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Render one frame and flush it to the terminal, if there is one.
    ///
    /// Returns how many cells changed.
    pub fn render(&mut self) -> Result<usize> {
        let updates = self.screen.render(&mut self.view);
        if let Some(driver) = self.driver.as_mut() {
            driver.apply_updates(&updates)?;
            driver.flush()?;
        }
        Ok(updates.len())
    }

    /// Run on the terminal until a quit binding or request.
    pub async fn run(self) -> Result<()> {
        self.run_with(TerminalEvents).await
    }

    /// Run the frame loop on `events`: every tick drains the pending events
    /// and renders a frame.
    pub async fn run_with(mut self, mut events: impl EventSource) -> Result<()> {
        if let Some(driver) = self.driver.as_mut() {
            driver.enter(&self.config.title)?;
        }
        let mut ticker = time::interval(self.config.frame_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let outcome = loop {
            ticker.tick().await;
            let pending = match events.drain() {
                Ok(pending) => pending,
                Err(err) => break Err(Error::Io(err)),
            };
            for event in pending {
                self.handle_input(event);
            }
            if self.should_quit() {
                break Ok(());
            }
            if let Err(err) = self.render() {
                break Err(err);
            }
        };

        if let Some(driver) = self.driver.as_mut() {
            driver.leave()?;
        }
        info!(rebuilds = self.screen.rebuilds(), "app stopped");
        outcome
    }

    pub fn should_quit(&self) -> bool {
        !self.running
    }

    pub fn request_quit(&mut self) {
        self.running = false;
    }

    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
