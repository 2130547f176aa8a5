//! Headless testing tools: the [`Pilot`] and snapshot helpers.
//!
//! Use the [`Pilot`] to drive an [`App`](crate::app::App) without a terminal,
//! and [`render_to_string`] to capture an element's output as plain text.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{compositor_to_string, render_to_string, strips_to_string};
