//! Placement of the scaled image inside the host view.
//!
//! The host decides where the image is drawn; this module computes that
//! display rect for the two supported scale modes so hosts do not have to.
//! Everything downstream only needs the resulting rect.

use serde::{Deserialize, Serialize};

use crate::error::{CropError, CropResult};
use crate::geometry::Rect;

/// How the image is scaled into the view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Scale up or down to fill the view, preserving aspect ratio.
    #[default]
    FitCenter,
    /// Scale down only; images smaller than the view keep their size.
    CenterInside,
    /// Fill the view completely, cropping the overflow. Not supported.
    CenterCrop,
    /// Stretch to the view without preserving aspect ratio. Not supported.
    Stretch,
}

impl ScaleMode {
    pub fn is_supported(self) -> bool {
        matches!(self, ScaleMode::FitCenter | ScaleMode::CenterInside)
    }

    pub(crate) fn check(self) -> CropResult<Self> {
        if self.is_supported() {
            Ok(self)
        } else {
            Err(CropError::UnsupportedScaleMode(self))
        }
    }
}

/// Display rect of an `image_width` x `image_height` image inside a view of
/// `view_width` x `view_height`, centered, in view coordinates.
///
/// A zero-sized image or view yields [`Rect::EMPTY`].
pub fn display_rect(
    mode: ScaleMode,
    image_width: u32,
    image_height: u32,
    view_width: f32,
    view_height: f32,
) -> CropResult<Rect> {
    let mode = mode.check()?;
    if image_width == 0 || image_height == 0 || view_width <= 0.0 || view_height <= 0.0 {
        return Ok(Rect::EMPTY);
    }

    let iw = image_width as f32;
    let ih = image_height as f32;

    if mode == ScaleMode::CenterInside && iw <= view_width && ih <= view_height {
        let left = ((view_width - iw) / 2.0).round();
        let top = ((view_height - ih) / 2.0).round();
        return Ok(Rect::from_origin_size(left, top, iw, ih));
    }

    let scale = (view_width / iw).min(view_height / ih);
    let (width, height) = if view_width / iw <= view_height / ih {
        (view_width, ih * scale)
    } else {
        (iw * scale, view_height)
    };
    let left = ((view_width - width) / 2.0).round();
    let top = ((view_height - height) / 2.0).round();
    Ok(Rect::from_origin_size(left, top, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_center_scales_up() {
        let r = display_rect(ScaleMode::FitCenter, 100, 50, 400.0, 400.0).unwrap();
        assert_eq!(r, Rect::new(0.0, 100.0, 400.0, 300.0));
    }

    #[test]
    fn test_fit_center_scales_down_tall_image() {
        let r = display_rect(ScaleMode::FitCenter, 500, 1000, 400.0, 200.0).unwrap();
        assert_eq!(r, Rect::new(150.0, 0.0, 250.0, 200.0));
    }

    #[test]
    fn test_center_inside_keeps_small_image() {
        let r = display_rect(ScaleMode::CenterInside, 100, 50, 400.0, 400.0).unwrap();
        assert_eq!(r, Rect::new(150.0, 175.0, 250.0, 225.0));
    }

    #[test]
    fn test_center_inside_shrinks_large_image() {
        let a = display_rect(ScaleMode::CenterInside, 1000, 500, 500.0, 400.0).unwrap();
        let b = display_rect(ScaleMode::FitCenter, 1000, 500, 500.0, 400.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Rect::new(0.0, 75.0, 500.0, 325.0));
    }

    #[test]
    fn test_unsupported_mode() {
        let err = display_rect(ScaleMode::Stretch, 10, 10, 10.0, 10.0).unwrap_err();
        assert!(matches!(err, CropError::UnsupportedScaleMode(ScaleMode::Stretch)));
    }

    #[test]
    fn test_empty_inputs() {
        let r = display_rect(ScaleMode::FitCenter, 0, 10, 10.0, 10.0).unwrap();
        assert!(r.is_empty());
    }
}
