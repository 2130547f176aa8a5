//! # retained-tui
//!
//! A retained-mode terminal UI layer. Views build element trees that are laid
//! out along one axis at a time by resistance and hugging priorities, drawn
//! through a render cache keyed by identity plus state fingerprint, and
//! composited into cell updates for a crossterm terminal. Long row
//! collections go through a virtualized table that only materializes the rows
//! on screen.
//!
//! ## Core Systems
//!
//! - **[`layout`]**: priority-driven space distribution along one axis
//! - **[`element`]**: the element trait, containers, decorators, cached drawing
//! - **[`widgets`]**: Label, Spacer, Button, TextInput, Table
//! - **[`render`]**: strips, batches, the render cache, compositor and driver
//! - **[`event`]**: input events, key bindings, event sources
//! - **[`screen`]**: views, rebuilds, input routing and focus
//! - **[`app`]**: configuration and the frame loop
//! - **[`testing`]**: the headless pilot and snapshot helpers

// Foundation
pub mod error;
pub mod geometry;
pub mod logging;

// Layout and elements
pub mod element;
pub mod layout;
pub mod widgets;

// Events
pub mod event;

// Rendering
pub mod render;

// Application
pub mod app;
pub mod screen;

// Test support
pub mod testing;

pub use app::{App, AppConfig};
pub use element::{Element, ElementExt, Fingerprint, Key};
pub use error::{Error, Result};
pub use screen::{BuildContext, Screen, View};
