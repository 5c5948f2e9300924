#![forbid(unsafe_code)]

//! Geometric primitives in device pixels.
//!
//! Browser pointer coordinates are fractional, so every quantity here is an
//! `f64`. Constructors do not validate; callers that accept external input
//! check [`Point::is_finite`] / [`Size::is_valid`] before use.

use serde::{Deserialize, Serialize};

/// A viewport-relative position (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Finite and non-negative in both dimensions.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// A rectangle for region allocation and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (half-open on right/bottom).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.right()
            && point.y >= self.y
            && point.y < self.bottom()
    }

    /// Split off a column of `width` from the left edge.
    ///
    /// Returns `(taken, rest)`. Widths saturate at the available space.
    pub fn take_left(&self, width: f64) -> (Rect, Rect) {
        let w = width.clamp(0.0, self.width.max(0.0));
        (
            Rect::new(self.x, self.y, w, self.height),
            Rect::new(self.x + w, self.y, self.width - w, self.height),
        )
    }

    /// Split off a column of `width` from the right edge.
    ///
    /// Returns `(rest, taken)`.
    pub fn take_right(&self, width: f64) -> (Rect, Rect) {
        let w = width.clamp(0.0, self.width.max(0.0));
        (
            Rect::new(self.x, self.y, self.width - w, self.height),
            Rect::new(self.right() - w, self.y, w, self.height),
        )
    }

    /// Split off a row of `height` from the bottom edge.
    ///
    /// Returns `(rest, taken)`.
    pub fn take_bottom(&self, height: f64) -> (Rect, Rect) {
        let h = height.clamp(0.0, self.height.max(0.0));
        (
            Rect::new(self.x, self.y, self.width, self.height - h),
            Rect::new(self.x, self.bottom() - h, self.width, h),
        )
    }
}
