//! Bounds and snap resolution.
//!
//! Every rectangle the crop window publishes goes through [`BoundsResolver`]:
//! it lies inside the display rect, is at least [`MIN_CROP_LENGTH`] on each
//! side (or the whole display rect when that is smaller), and sides dragged
//! close to a display boundary snap onto it. Under aspect lock a window that
//! cannot satisfy both the ratio and the bounds is refused with `None`, and the
//! caller keeps its previous rectangle.

use serde::{Deserialize, Serialize};

use crate::aspect;
use crate::edge::{Edge, EdgeSet};
use crate::geometry::{Point, Rect};

/// Smallest side length of the crop window, in overlay pixels.
pub const MIN_CROP_LENGTH: f32 = 40.0;

/// Distance within which a dragged side snaps onto the display rect boundary.
pub const SNAP_RADIUS: f32 = 3.0;

/// Fraction of the display rect left free on each side by the default window.
pub const DEFAULT_PADDING: f32 = 0.1;

const EPSILON: f32 = 1e-3;

/// When the rule-of-thirds guidelines are drawn. No geometric effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuidelineMode {
    Off,
    On,
    #[default]
    OnResize,
}

impl GuidelineMode {
    pub fn is_visible(self, dragging: bool) -> bool {
        match self {
            GuidelineMode::Off => false,
            GuidelineMode::On => true,
            GuidelineMode::OnResize => dragging,
        }
    }
}

impl std::fmt::Display for GuidelineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GuidelineMode::Off => "Off",
            GuidelineMode::On => "On",
            GuidelineMode::OnResize => "While resizing",
        };
        write!(f, "{}", s)
    }
}

fn clamp_between(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi.max(lo))
}

/// Clamps crop window candidates against one display rect.
#[derive(Clone, Copy, Debug)]
pub struct BoundsResolver {
    bounds: Rect,
    min_width: f32,
    min_height: f32,
}

impl BoundsResolver {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            min_width: MIN_CROP_LENGTH.min(bounds.width().max(0.0)),
            min_height: MIN_CROP_LENGTH.min(bounds.height().max(0.0)),
        }
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Default window: the largest ratio-correct window when locked, otherwise
    /// the display rect inset by [`DEFAULT_PADDING`] on every side.
    pub fn default_window(&self, lock: Option<f32>) -> EdgeSet {
        if self.bounds.is_empty() {
            return EdgeSet::from_rect(self.bounds);
        }
        match lock {
            Some(ratio) => aspect::largest_centered(&self.bounds, ratio),
            None => {
                let dx = self.bounds.width() * DEFAULT_PADDING;
                let dy = self.bounds.height() * DEFAULT_PADDING;
                EdgeSet::new(
                    self.bounds.left + dx,
                    self.bounds.top + dy,
                    self.bounds.right - dx,
                    self.bounds.bottom - dy,
                )
            }
        }
    }

    /// True when a `ratio` window of at least the minimum size fits the
    /// display rect. An empty display rect accepts any ratio.
    pub fn fits_ratio(&self, ratio: f32) -> bool {
        if self.bounds.is_empty() {
            return true;
        }
        let largest = aspect::largest_centered(&self.bounds, ratio);
        largest.width() + EPSILON >= self.min_width && largest.height() + EPSILON >= self.min_height
    }

    /// Rigid translation of `start`, stopped at the display rect.
    pub fn translate(&self, start: &EdgeSet, dx: f32, dy: f32) -> EdgeSet {
        let dx = clamp_between(
            dx,
            self.bounds.left - start.left,
            self.bounds.right - start.right,
        );
        let dy = clamp_between(
            dy,
            self.bounds.top - start.top,
            self.bounds.bottom - start.bottom,
        );
        start.translated(dx, dy)
    }

    /// Resolves an unlocked drag of one side to its final coordinate.
    ///
    /// The side snaps onto the display boundary, stays inside it, and stops at
    /// the minimum length from the opposite side.
    pub fn resolve_side(&self, edge: Edge, start: &EdgeSet, proposed: f32) -> f32 {
        let b = &self.bounds;
        let opposite = start.get(edge.opposite());
        match edge {
            Edge::Left => {
                let v = if proposed - b.left < SNAP_RADIUS { b.left } else { proposed };
                clamp_between(v, b.left, opposite - self.min_width)
            }
            Edge::Top => {
                let v = if proposed - b.top < SNAP_RADIUS { b.top } else { proposed };
                clamp_between(v, b.top, opposite - self.min_height)
            }
            Edge::Right => {
                let v = if b.right - proposed < SNAP_RADIUS { b.right } else { proposed };
                clamp_between(v, opposite + self.min_width, b.right).min(b.right)
            }
            Edge::Bottom => {
                let v = if b.bottom - proposed < SNAP_RADIUS { b.bottom } else { proposed };
                clamp_between(v, opposite + self.min_height, b.bottom).min(b.bottom)
            }
        }
    }

    /// Height limits of a locked window, from the minimum side length and the
    /// room available along each axis.
    fn height_range(&self, ratio: f32, room_x: f32, room_y: f32) -> Option<(f32, f32)> {
        let lo = self.min_height.max(self.min_width / ratio);
        let hi = (room_x / ratio).min(room_y);
        (lo <= hi + EPSILON).then_some((lo.min(hi), hi))
    }

    fn snap_height(h: f32, hi: f32, ratio: f32) -> f32 {
        if (hi - h) * ratio.max(1.0) < SNAP_RADIUS { hi } else { h }
    }

    /// Resolves a locked window that grows from a fixed `anchor` corner.
    ///
    /// `desired` is the height the pointer asks for. Returns `None` when no
    /// ratio-correct window anchored there fits the display rect.
    pub fn resolve_anchored(
        &self,
        anchor: Point,
        sx: f32,
        sy: f32,
        desired: f32,
        ratio: f32,
    ) -> Option<EdgeSet> {
        let b = &self.bounds;
        let room_x = if sx > 0.0 { b.right - anchor.x } else { anchor.x - b.left };
        let room_y = if sy > 0.0 { b.bottom - anchor.y } else { anchor.y - b.top };
        let (lo, hi) = self.height_range(ratio, room_x, room_y)?;
        let h = Self::snap_height(clamp_between(desired, lo, hi), hi, ratio);
        Some(aspect::rect_from_anchor(anchor, sx, sy, h, ratio))
    }

    /// Resolves a locked drag of a single side.
    ///
    /// The window first grows symmetrically about its perpendicular center. If
    /// that would cross the display rect, the side of the window nearest the
    /// crossing is pinned to the boundary and the window grows away from it,
    /// corner style.
    pub fn resolve_locked_side(
        &self,
        edge: Edge,
        start: &EdgeSet,
        desired: f32,
        ratio: f32,
    ) -> Option<EdgeSet> {
        let b = &self.bounds;
        let fixed = start.get(edge.opposite());
        let grows_forward = matches!(edge, Edge::Right | Edge::Bottom);
        let s_axis = if grows_forward { 1.0 } else { -1.0 };

        if edge.is_vertical_line() {
            let room_x = if grows_forward { b.right - fixed } else { fixed - b.left };
            let cy = start.center_y();
            let sym_room = 2.0 * (cy - b.top).min(b.bottom - cy);
            if let Some((lo, hi)) = self.height_range(ratio, room_x, sym_room) {
                if desired <= hi {
                    let h = clamp_between(desired, lo, hi);
                    let anchor = Point::new(fixed, cy - h / 2.0);
                    return Some(aspect::rect_from_anchor(anchor, s_axis, 1.0, h, ratio));
                }
            }
            let (anchor_y, sy) = if cy - b.top < b.bottom - cy {
                (b.top, 1.0)
            } else {
                (b.bottom, -1.0)
            };
            self.resolve_anchored(Point::new(fixed, anchor_y), s_axis, sy, desired, ratio)
        } else {
            let room_y = if grows_forward { b.bottom - fixed } else { fixed - b.top };
            let cx = start.center_x();
            let sym_room = 2.0 * (cx - b.left).min(b.right - cx);
            if let Some((lo, hi)) = self.height_range(ratio, sym_room, room_y) {
                if desired <= hi {
                    let h = clamp_between(desired, lo, hi);
                    let anchor = Point::new(cx - h * ratio / 2.0, fixed);
                    return Some(aspect::rect_from_anchor(anchor, 1.0, s_axis, h, ratio));
                }
            }
            let (anchor_x, sx) = if cx - b.left < b.right - cx {
                (b.left, 1.0)
            } else {
                (b.right, -1.0)
            };
            self.resolve_anchored(Point::new(anchor_x, fixed), sx, s_axis, desired, ratio)
        }
    }

    /// Brings an arbitrary window back into a publishable state: inside the
    /// display rect, at least minimum size, and ratio-correct when locked.
    pub fn settle(&self, edges: &EdgeSet, lock: Option<f32>) -> EdgeSet {
        if self.bounds.is_empty() {
            return EdgeSet::from_rect(self.bounds);
        }
        if !edges.is_well_formed() {
            return self.default_window(lock);
        }
        if let Some(ratio) = lock {
            let min_len = self.min_width.min(self.min_height);
            return aspect::fit_to_ratio(edges, ratio, &self.bounds, min_len);
        }

        let b = &self.bounds;
        let mut out = EdgeSet::new(
            clamp_between(edges.left, b.left, b.right),
            clamp_between(edges.top, b.top, b.bottom),
            clamp_between(edges.right, b.left, b.right),
            clamp_between(edges.bottom, b.top, b.bottom),
        );
        if out.width() < self.min_width {
            out.right = (out.left + self.min_width).min(b.right);
            out.left = out.right - self.min_width;
        }
        if out.height() < self.min_height {
            out.bottom = (out.top + self.min_height).min(b.bottom);
            out.top = out.bottom - self.min_height;
        }
        out
    }

    /// True when `edges` is a window this resolver would publish unchanged.
    pub fn accepts(&self, edges: &EdgeSet) -> bool {
        edges.is_well_formed()
            && self.bounds.contains_rect(&edges.to_rect(), EPSILON)
            && edges.width() + EPSILON >= self.min_width
            && edges.height() + EPSILON >= self.min_height
    }
}
