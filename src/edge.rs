//! The four draggable edges of the crop window.
//!
//! `EdgeSet` is a pure value holder in overlay pixel space. Setting a side never
//! clamps; keeping the window inside the display rect is the job of
//! [`crate::bounds`].

use crate::geometry::Rect;

/// One side of the crop window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// The side facing this one.
    pub fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    /// True for the sides that move along the x axis.
    pub fn is_vertical_line(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }
}

/// Left, top, right and bottom coordinates of the crop window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeSet {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeSet {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.left, rect.top, rect.right, rect.bottom)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }

    pub fn get(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, edge: Edge, value: f32) {
        match edge {
            Edge::Left => self.left = value,
            Edge::Top => self.top = value,
            Edge::Right => self.right = value,
            Edge::Bottom => self.bottom = value,
        }
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

    /// Left is strictly before right and top strictly above bottom.
    pub fn is_well_formed(&self) -> bool {
        self.left < self.right && self.top < self.bottom
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_does_not_clamp() {
        let mut edges = EdgeSet::new(10.0, 10.0, 50.0, 50.0);
        edges.set(Edge::Left, 80.0);
        assert_eq!(edges.get(Edge::Left), 80.0);
        assert_eq!(edges.width(), -30.0);
        assert!(!edges.is_well_formed());
    }

    #[test]
    fn test_derived_values() {
        let edges = EdgeSet::new(100.0, 50.0, 400.0, 200.0);
        assert_eq!(edges.width(), 300.0);
        assert_eq!(edges.height(), 150.0);
        assert_eq!(edges.center_x(), 250.0);
        assert_eq!(edges.center_y(), 125.0);
    }

    #[test]
    fn test_opposite_edges() {
        for edge in Edge::ALL {
            assert_eq!(edge.opposite().opposite(), edge);
            assert_eq!(edge.is_vertical_line(), edge.opposite().is_vertical_line());
        }
    }
}
