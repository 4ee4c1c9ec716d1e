//! Geometry primitives shared by every box type.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! All values are CSS pixels as `f32`. Rectangles are half-open: a point on
//! the right or bottom edge is outside.

use serde::Serialize;

/// A rectangle positioned in 2D space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// The x coordinate just past the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// The y coordinate just past the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// The size of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Dimension {
        Dimension {
            width: self.width,
            height: self.height,
        }
    }

    /// Move the corner, keeping the size.
    pub const fn set_location(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Change the size, keeping the corner.
    pub const fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// True if the point lies inside. Empty rectangles contain nothing.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True if both rectangles are non-empty and share some area.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }

    /// The common area of two rectangles. Disjoint rectangles give a
    /// rectangle with a non-positive width or height.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }
}

/// A width and a height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Dimension {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Dimension {
    /// Create a dimension.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Dimension { width, height }
    }
}

/// Edge sizes for margin, border, padding or position offsets.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// ```text
/// ┌─────────────────────────────────────────┐
/// │              margin-top                 │
/// │   ┌─────────────────────────────────┐   │
/// │   │          border-top             │   │
/// │   │   ┌─────────────────────────┐   │   │
/// │   │   │      padding-top        │   │   │
/// │   │   │   ┌─────────────────┐   │   │   │
/// │ m │ b │ p │     CONTENT     │ p │ b │ m │
/// │   │   │   └─────────────────┘   │   │   │
/// │   │   │      padding-bottom     │   │   │
/// │   │   └─────────────────────────┘   │   │
/// │   │          border-bottom          │   │
/// │   └─────────────────────────────────┘   │
/// │              margin-bottom              │
/// └─────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LengthSet {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl LengthSet {
    /// All four edges zero.
    pub const ZERO: LengthSet = LengthSet {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Create a set from the four edges in CSS order.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        LengthSet {
            top,
            right,
            bottom,
            left,
        }
    }

    /// `left + right`.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_excludes_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(!a.intersects(&Rect::new(2.0, 2.0, 0.0, 5.0)));
    }

    #[test]
    fn test_intersection_and_contains() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let c = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&c), Rect::new(5.0, 5.0, 5.0, 5.0));
        assert!(a.contains(0.0, 9.5));
        assert!(!a.contains(10.0, 5.0));
    }
}
