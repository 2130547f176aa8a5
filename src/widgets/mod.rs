//! Built-in widgets: Label, Spacer, Button, TextInput and the virtualized
//! Table.

pub mod button;
pub mod input;
pub mod label;
pub mod spacer;
pub mod table;

pub use button::{Button, ButtonStyle};
pub use input::TextInput;
pub use label::Label;
pub use spacer::Spacer;
pub use table::{
    visible_window, RedrawFlag, Table, TableDelegate, TableModel, TableState, TableStateStore, ViewModel,
};
