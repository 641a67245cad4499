//! Geometry primitives in pixel space.
//!
//! All types use `f32` components. Sizes are normalized so that a negative
//! width or height becomes `0.0`; NaN is left untouched so it can surface
//! to the caller instead of being silently replaced.

use crate::math::Vec2;

/// A 2D coordinate.
pub type Point = Vec2;

/// Replace negative extents with zero, leaving NaN as-is.
#[inline]
fn non_negative(v: f32) -> f32 {
    if v < 0.0 { 0.0 } else { v }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl Size<f32> {
    pub const ZERO: Self = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Copy of this size with negative extents clamped to zero.
    pub fn normalized(self) -> Self {
        Size {
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rect, normalizing negative sizes to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    /// Top-left corner.
    pub fn position(&self) -> Point {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size<f32> {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// True when the rect has no area (zero or NaN extent).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Copy of this rect with negative extents clamped to zero.
    pub fn normalized(self) -> Self {
        Self::new(self.x, self.y, self.width, self.height)
    }

    /// Same size, moved so the top-left corner sits at `position`.
    pub fn with_position(&self, position: Point) -> Rect {
        Rect {
            x: position.x,
            y: position.y,
            ..*self
        }
    }
}
