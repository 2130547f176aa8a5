//! One-dimensional box layout: priorities and space distribution.

pub mod distribute;
pub mod priority;

pub use distribute::{combine, distribute, Distribution, Slot};
pub use priority::{AxisPriority, LayoutSpec};
