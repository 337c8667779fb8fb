//! Aspect ratio math for the crop window.
//!
//! A locked window is always described by its height `h`; the width follows as
//! `h * ratio`. Corner drags project the raw pointer extent onto the ratio line,
//! so the dragged corner lands as close to the pointer as the ratio allows.

use serde::{Deserialize, Serialize};

use crate::edge::EdgeSet;
use crate::error::{CropError, CropResult};
use crate::geometry::{Point, Rect};

/// Width to height ratio as a pair of positive integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub numerator: u32,
    pub denominator: u32,
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
        }
    }
}

impl AspectRatio {
    /// Validates and builds a ratio. Zero or negative terms are rejected.
    pub fn new(numerator: i32, denominator: i32) -> CropResult<Self> {
        if numerator <= 0 || denominator <= 0 {
            return Err(CropError::config(format!(
                "aspect ratio must be positive, got {numerator}:{denominator}"
            )));
        }
        Ok(Self {
            numerator: numerator as u32,
            denominator: denominator as u32,
        })
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.numerator > 0 && self.denominator > 0
    }

    /// Width divided by height.
    pub fn value(&self) -> f32 {
        self.numerator as f32 / self.denominator as f32
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

/// Height of the ratio-correct extent closest to a raw `(width, height)` extent.
///
/// Projects the raw extent onto the direction `(ratio, 1)`.
pub fn project_height(raw_width: f32, raw_height: f32, ratio: f32) -> f32 {
    (raw_width * ratio + raw_height) / (ratio * ratio + 1.0)
}

/// Builds a window of height `h` growing away from `anchor`.
///
/// `sx`/`sy` are `1.0` when the window extends right/down from the anchor and
/// `-1.0` when it extends left/up.
pub fn rect_from_anchor(anchor: Point, sx: f32, sy: f32, h: f32, ratio: f32) -> EdgeSet {
    let w = h * ratio;
    let (left, right) = if sx > 0.0 {
        (anchor.x, anchor.x + w)
    } else {
        (anchor.x - w, anchor.x)
    };
    let (top, bottom) = if sy > 0.0 {
        (anchor.y, anchor.y + h)
    } else {
        (anchor.y - h, anchor.y)
    };
    EdgeSet::new(left, top, right, bottom)
}

/// Largest ratio-correct window centered in `bounds`.
pub fn largest_centered(bounds: &Rect, ratio: f32) -> EdgeSet {
    let (w, h) = if bounds.width() / bounds.height() > ratio {
        (bounds.height() * ratio, bounds.height())
    } else {
        (bounds.width(), bounds.width() / ratio)
    };
    let cx = bounds.center_x();
    let cy = bounds.center_y();
    EdgeSet::new(cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0)
}

/// Re-shapes `edges` to `ratio` around their center, keeping the major
/// dimension, then fits the result inside `bounds`.
///
/// `min_len` is honored when the bounds allow it.
pub fn fit_to_ratio(edges: &EdgeSet, ratio: f32, bounds: &Rect, min_len: f32) -> EdgeSet {
    let max_dim = edges.width().max(edges.height());

    let (mut w, mut h) = if ratio >= 1.0 {
        (max_dim, max_dim / ratio)
    } else {
        (max_dim * ratio, max_dim)
    };

    // Grow to the minimum first so the bounds get the final word.
    let min_h = min_len.max(min_len / ratio);
    if h < min_h {
        h = min_h;
        w = h * ratio;
    }

    if w > bounds.width() {
        w = bounds.width();
        h = w / ratio;
    }
    if h > bounds.height() {
        h = bounds.height();
        w = h * ratio;
    }

    let cx = edges.center_x();
    let cy = edges.center_y();
    let mut fitted = EdgeSet::new(cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0);

    if fitted.left < bounds.left {
        fitted = fitted.translated(bounds.left - fitted.left, 0.0);
    }
    if fitted.top < bounds.top {
        fitted = fitted.translated(0.0, bounds.top - fitted.top);
    }
    if fitted.right > bounds.right {
        fitted = fitted.translated(bounds.right - fitted.right, 0.0);
    }
    if fitted.bottom > bounds.bottom {
        fitted = fitted.translated(0.0, bounds.bottom - fitted.bottom);
    }
    fitted
}
