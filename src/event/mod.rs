//! Input events, key bindings, event sources and the handler context.

pub mod binding;
pub mod context;
pub mod input;
pub mod source;

pub use binding::{BindingAction, KeyBindings};
pub use context::EventCtx;
pub use input::{
    from_crossterm, InputEvent, KeyCode, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent,
};
pub use source::{ChannelEvents, EventSource, ScriptedEvents, TerminalEvents};
