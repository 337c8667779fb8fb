//! Mapping between overlay space and source-image space.
//!
//! Width and height scale independently:
//! `scale_x = source_width / display.width()` and likewise for height. The
//! mapping does not care which scale mode produced the display rect.

use crate::edge::EdgeSet;
use crate::error::{CropError, CropResult};
use crate::geometry::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    display: Rect,
    source_width: u32,
    source_height: u32,
    scale_x: f32,
    scale_y: f32,
}

impl CoordinateMapper {
    pub fn new(display: Rect, source_width: u32, source_height: u32) -> CropResult<Self> {
        if display.is_empty() {
            return Err(CropError::region("display rect is empty"));
        }
        if source_width == 0 || source_height == 0 {
            return Err(CropError::region(format!(
                "source image has no pixels ({source_width}x{source_height})"
            )));
        }
        Ok(Self {
            display,
            source_width,
            source_height,
            scale_x: source_width as f32 / display.width(),
            scale_y: source_height as f32 / display.height(),
        })
    }

    pub fn scale_factor_width(&self) -> f32 {
        self.scale_x
    }

    pub fn scale_factor_height(&self) -> f32 {
        self.scale_y
    }

    pub fn to_source(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.display.left) * self.scale_x,
            (p.y - self.display.top) * self.scale_y,
        )
    }

    pub fn to_overlay(&self, p: Point) -> Point {
        Point::new(
            p.x / self.scale_x + self.display.left,
            p.y / self.scale_y + self.display.top,
        )
    }

    /// The crop window in source space, unclamped and unrounded.
    pub fn map_edges(&self, edges: &EdgeSet) -> Rect {
        let x = (edges.left - self.display.left) * self.scale_x;
        let y = (edges.top - self.display.top) * self.scale_y;
        Rect::from_origin_size(
            x,
            y,
            edges.width() * self.scale_x,
            edges.height() * self.scale_y,
        )
    }

    /// The crop window in source space, clamped to the source bounds to absorb
    /// floating point drift.
    pub fn actual_crop_rect(&self, edges: &EdgeSet) -> Rect {
        let mapped = self.map_edges(edges);
        let w = self.source_width as f32;
        let h = self.source_height as f32;
        let left = mapped.left.clamp(0.0, w);
        let top = mapped.top.clamp(0.0, h);
        Rect::new(
            left,
            top,
            mapped.right.min(w).max(left),
            mapped.bottom.min(h).max(top),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factors() {
        let m = CoordinateMapper::new(Rect::new(0.0, 0.0, 500.0, 250.0), 1000, 500).unwrap();
        assert_eq!(m.scale_factor_width(), 2.0);
        assert_eq!(m.scale_factor_height(), 2.0);
    }

    #[test]
    fn test_offset_display_rect() {
        let m = CoordinateMapper::new(Rect::new(50.0, 20.0, 250.0, 120.0), 400, 300).unwrap();
        let p = m.to_source(Point::new(150.0, 70.0));
        assert_eq!(p, Point::new(200.0, 150.0));
        assert_eq!(m.to_overlay(p), Point::new(150.0, 70.0));
    }

    #[test]
    fn test_actual_crop_rect_clamps_drift() {
        let m = CoordinateMapper::new(Rect::new(0.0, 0.0, 300.0, 300.0), 1000, 1000).unwrap();
        let r = m.actual_crop_rect(&EdgeSet::new(-0.01, 0.0, 300.01, 300.0));
        assert_eq!(r.left, 0.0);
        assert_eq!(r.right, 1000.0);
    }

    #[test]
    fn test_rejects_empty_inputs() {
        assert!(CoordinateMapper::new(Rect::EMPTY, 10, 10).is_err());
        assert!(CoordinateMapper::new(Rect::new(0.0, 0.0, 1.0, 1.0), 0, 10).is_err());
    }
}
