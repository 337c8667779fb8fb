//! Plain value types shared by every stage of the crop window.

use serde::{Deserialize, Serialize};

/// A point in overlay or source space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle stored by its four sides.
///
/// Used for the display rect (overlay space) and for crop rectangles mapped
/// into source space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const EMPTY: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// True when `other` lies entirely inside `self`, allowing `eps` slack.
    pub fn contains_rect(&self, other: &Rect, eps: f32) -> bool {
        other.left >= self.left - eps
            && other.top >= self.top - eps
            && other.right <= self.right + eps
            && other.bottom <= self.bottom + eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.center_x(), 60.0);
        assert_eq!(r.center_y(), 45.0);
        assert!(!r.is_empty());
        assert!(Rect::EMPTY.is_empty());
    }

    #[test]
    fn test_contains_rect_with_slack() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(0.0, 0.0, 100.0, 100.0), 0.0));
        assert!(!outer.contains_rect(&Rect::new(-0.5, 0.0, 50.0, 50.0), 0.0));
        assert!(outer.contains_rect(&Rect::new(-0.5, 0.0, 50.0, 50.0), 1.0));
    }
}
