//! Per-element layout priorities.
//!
//! Every element carries a [`LayoutSpec`]: a compression resistance and a
//! hugging force for each axis. Lower resistance gives up space first when a
//! container is too small; lower hugging takes surplus space first when it is
//! too big.

use crate::geometry::Axis;

/// Resistance and hugging along one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisPriority {
    /// Lower values shrink first.
    pub resistance: u32,
    /// Lower values grow first.
    pub hugging: u32,
}

impl AxisPriority {
    pub const fn new(resistance: u32, hugging: u32) -> Self {
        Self { resistance, hugging }
    }

    /// Same value for resistance and hugging.
    pub const fn uniform(value: u32) -> Self {
        Self { resistance: value, hugging: value }
    }

    /// Component-wise minimum.
    pub fn min(self, other: AxisPriority) -> AxisPriority {
        AxisPriority {
            resistance: self.resistance.min(other.resistance),
            hugging: self.hugging.min(other.hugging),
        }
    }
}

/// Layout priorities for both axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutSpec {
    pub horizontal: AxisPriority,
    pub vertical: AxisPriority,
}

impl LayoutSpec {
    /// Plain elements.
    pub const DEFAULT: LayoutSpec = LayoutSpec::uniform(750);
    /// Vertical stacks give way a little earlier along their own axis.
    pub const VERTICAL_STACK: LayoutSpec = LayoutSpec {
        horizontal: AxisPriority::uniform(750),
        vertical: AxisPriority::uniform(700),
    };
    /// Horizontal stacks give way a little earlier along their own axis.
    pub const HORIZONTAL_STACK: LayoutSpec = LayoutSpec {
        horizontal: AxisPriority::uniform(700),
        vertical: AxisPriority::uniform(750),
    };
    pub const LABEL: LayoutSpec = LayoutSpec::uniform(500);
    /// Spacers absorb all slack before anything else moves.
    pub const SPACER: LayoutSpec = LayoutSpec::uniform(0);
    /// Text inputs stretch horizontally but keep their height.
    pub const TEXT_INPUT: LayoutSpec = LayoutSpec {
        horizontal: AxisPriority::new(700, 400),
        vertical: AxisPriority::new(780, 700),
    };
    /// Tables take vertical slack ahead of everything but spacers.
    pub const TABLE: LayoutSpec = LayoutSpec {
        horizontal: AxisPriority::uniform(400),
        vertical: AxisPriority::uniform(200),
    };

    pub const fn uniform(value: u32) -> Self {
        Self {
            horizontal: AxisPriority::uniform(value),
            vertical: AxisPriority::uniform(value),
        }
    }

    /// Priorities along `axis`.
    pub const fn along(&self, axis: Axis) -> AxisPriority {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Mutable priorities along `axis`.
    pub fn along_mut(&mut self, axis: Axis) -> &mut AxisPriority {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Replace the priorities along `axis` (builder).
    pub fn with(mut self, axis: Axis, priority: AxisPriority) -> Self {
        *self.along_mut(axis) = priority;
        self
    }
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_750_everywhere() {
        let spec = LayoutSpec::default();
        assert_eq!(spec.along(Axis::Horizontal), AxisPriority::uniform(750));
        assert_eq!(spec.along(Axis::Vertical), AxisPriority::uniform(750));
    }

    #[test]
    fn stacks_soften_their_own_axis() {
        assert_eq!(LayoutSpec::VERTICAL_STACK.along(Axis::Vertical).resistance, 700);
        assert_eq!(LayoutSpec::VERTICAL_STACK.along(Axis::Horizontal).resistance, 750);
        assert_eq!(LayoutSpec::HORIZONTAL_STACK.along(Axis::Horizontal).hugging, 700);
    }

    #[test]
    fn text_input_differs_per_axis() {
        let spec = LayoutSpec::TEXT_INPUT;
        assert_eq!(spec.horizontal, AxisPriority::new(700, 400));
        assert_eq!(spec.vertical, AxisPriority::new(780, 700));
    }

    #[test]
    fn with_replaces_one_axis() {
        let spec = LayoutSpec::LABEL.with(Axis::Vertical, AxisPriority::uniform(10));
        assert_eq!(spec.horizontal, AxisPriority::uniform(500));
        assert_eq!(spec.vertical, AxisPriority::uniform(10));
    }

    #[test]
    fn min_is_component_wise() {
        let a = AxisPriority::new(100, 900);
        let b = AxisPriority::new(300, 200);
        assert_eq!(a.min(b), AxisPriority::new(100, 200));
    }
}
