#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are signed so that pointer deltas and ghost positions can
//! leave the viewport (a drag may overshoot the left or top edge) without
//! wrapping.

use std::fmt;
use std::ops::{Add, Sub};

/// A pointer position in host screen coordinates (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self::new(0, 0);
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Zero displacement.
    pub const ZERO: Self = Self::new(0, 0);
}

impl Sub for Point {
    type Output = Offset;

    #[inline]
    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x.saturating_add(rhs.dx), self.y.saturating_add(rhs.dy))
    }
}

/// An axis-aligned rectangle for element bounds and drop-zone hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Right edge (exclusive), computed in `i64` so huge widths cannot overflow.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    ///
    /// Empty rectangles contain nothing.
    #[inline]
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        let px = point.x as i64;
        let py = point.y as i64;
        !self.is_empty()
            && px >= self.x as i64
            && px < self.right()
            && py >= self.y as i64
            && py < self.bottom()
    }

    /// The same rectangle with its top-left corner moved to `origin`.
    #[inline]
    #[must_use]
    pub const fn with_origin(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, self.width, self.height)
    }

    /// The same rectangle displaced by `offset`.
    #[inline]
    #[must_use]
    pub fn translate(&self, offset: Offset) -> Rect {
        self.with_origin(self.origin() + offset)
    }
}
