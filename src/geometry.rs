//! Core geometry types: Axis, Offset, Size, Region, Spacing.
//!
//! All distances are whole terminal cells. The vertical axis grows downward, so
//! row 0 is the top of the screen. [`Axis`] lets the layout engine talk about
//! "main" and "cross" extents without caring which way a container stacks.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// The direction along which a container stacks its children.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other axis.
    #[inline]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Extent of `size` along this axis.
    #[inline]
    pub const fn main_of(self, size: Size) -> i32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Extent of `size` across this axis.
    #[inline]
    pub const fn cross_of(self, size: Size) -> i32 {
        self.cross().main_of(size)
    }

    /// Build a [`Size`] from a main-axis and a cross-axis extent.
    #[inline]
    pub const fn size(self, main: i32, cross: i32) -> Size {
        match self {
            Axis::Horizontal => Size { width: main, height: cross },
            Axis::Vertical => Size { width: cross, height: main },
        }
    }

    /// Position of `region`'s leading edge along this axis.
    #[inline]
    pub const fn start_of(self, region: Region) -> i32 {
        match self {
            Axis::Horizontal => region.x,
            Axis::Vertical => region.y,
        }
    }

    /// A slice of `region` that starts `main_start` cells along this axis and is
    /// `main_len` cells long, spanning the full cross extent.
    #[inline]
    pub const fn slice(self, region: Region, main_start: i32, main_len: i32) -> Region {
        match self {
            Axis::Horizontal => Region {
                x: main_start,
                y: region.y,
                width: main_len,
                height: region.height,
            },
            Axis::Vertical => Region {
                x: region.x,
                y: main_start,
                width: region.width,
                height: main_len,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A position or displacement in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in terminal cells (width x height).
///
/// Sizes produced by measurement may be negative along one axis: a spacer
/// measures `-gutter` so that it cancels the gutter its parent inserts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Total area, zero when either side is not positive.
    #[inline]
    pub const fn area(self) -> i32 {
        if self.width <= 0 || self.height <= 0 {
            0
        } else {
            self.width * self.height
        }
    }

    /// Grow by a [`Spacing`] on every side.
    #[inline]
    pub const fn pad(self, spacing: Spacing) -> Size {
        Size {
            width: self.width + spacing.width(),
            height: self.height + spacing.height(),
        }
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

impl Sub for Size {
    type Output = Size;
    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size { width: self.width - rhs.width, height: self.height - rhs.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle in terminal cells defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// A region of `size` placed at `origin`.
    #[inline]
    pub const fn at(origin: Offset, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner as an [`Offset`].
    #[inline]
    pub const fn origin(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether the region covers no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the cell at `point` lies inside this region.
    #[inline]
    pub const fn contains(self, point: Offset) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Whether `other` is entirely contained within this region.
    #[inline]
    pub const fn contains_region(self, other: Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// The overlap of two regions, or [`Region::EMPTY`] when they do not meet.
    #[inline]
    pub const fn intersection(self, other: Region) -> Region {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };
        let x2 = if self.right() < other.right() { self.right() } else { other.right() };
        let y2 = if self.bottom() < other.bottom() { self.bottom() } else { other.bottom() };

        if x2 <= x1 || y2 <= y1 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: x2 - x1, height: y2 - y1 }
        }
    }

    /// Move the region so its top-left corner sits at `origin`.
    #[inline]
    pub const fn moved_to(self, origin: Offset) -> Region {
        Region { x: origin.x, y: origin.y, width: self.width, height: self.height }
    }

    /// Contract the region inward by `spacing`.
    ///
    /// Width and height never go below zero.
    #[inline]
    pub const fn shrink(self, spacing: Spacing) -> Region {
        let w = self.width - spacing.width();
        let h = self.height - spacing.height();
        Region {
            x: self.x + spacing.left,
            y: self.y + spacing.top,
            width: if w > 0 { w } else { 0 },
            height: if h > 0 { h } else { 0 },
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Insets on the four sides of a rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0, right: 0, bottom: 0, left: 0 };

    /// Create spacing in `(left, top, right, bottom)` order.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// `horizontal` on the left and right, `vertical` on the top and bottom.
    #[inline]
    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.top + self.bottom
    }
}

// ===========================================================================
// Tests
// ===========================================================================
