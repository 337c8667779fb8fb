//! Pixel extraction and shape post-processing.
//!
//! The mapped crop window is truncated to whole pixels only once, right before
//! copying, so rounding error never compounds. The extracted buffer is always a
//! copy; the source image can be dropped as soon as extraction returns.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{CropError, CropResult};
use crate::geometry::Rect;

/// Shape applied to the extracted rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropShape {
    #[default]
    Rect,
    Oval,
    /// Cut out by an externally supplied mask buffer.
    Mask,
}

impl std::fmt::Display for CropShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CropShape::Rect => "Rectangle",
            CropShape::Oval => "Oval",
            CropShape::Mask => "Mask",
        };
        write!(f, "{}", s)
    }
}

/// How a mask of a different size is resampled to the crop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaskSampling {
    #[default]
    Nearest,
    Bilinear,
}

impl MaskSampling {
    fn filter(self) -> FilterType {
        match self {
            MaskSampling::Nearest => FilterType::Nearest,
            MaskSampling::Bilinear => FilterType::Triangle,
        }
    }
}

/// A shape together with the buffers it needs, borrowed for one extraction.
#[derive(Clone, Copy, Debug)]
pub enum Shape<'a> {
    Rect,
    Oval,
    Mask {
        mask: &'a RgbaImage,
        sampling: MaskSampling,
    },
}

/// Integer crop region in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Truncates a source-space rectangle to pixels and clamps it to the
    /// `source_width` x `source_height` image.
    ///
    /// Zero-area results are rejected.
    pub fn from_source_rect(rect: &Rect, source_width: u32, source_height: u32) -> CropResult<Self> {
        // `as u32` saturates: negative offsets land on 0.
        let x = (rect.left as u32).min(source_width);
        let y = (rect.top as u32).min(source_height);
        let width = (rect.width() as u32).min(source_width - x);
        let height = (rect.height() as u32).min(source_height - y);
        if width == 0 || height == 0 {
            return Err(CropError::region(format!(
                "crop of {width}x{height} pixels at ({x}, {y}) is empty"
            )));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }
}

/// Copies `region` out of `source` into a new RGBA buffer.
pub fn extract(source: &DynamicImage, region: PixelRect) -> RgbaImage {
    source
        .crop_imm(region.x, region.y, region.width, region.height)
        .to_rgba8()
}

/// Applies `shape` to an extracted buffer, returning the final image.
pub fn apply_shape(cropped: RgbaImage, shape: Shape<'_>) -> RgbaImage {
    match shape {
        Shape::Rect => cropped,
        Shape::Oval => oval_clip(&cropped),
        Shape::Mask { mask, sampling } => mask_out(&cropped, mask, sampling),
    }
}

/// Keeps the pixels whose centers fall inside the ellipse inscribed in the
/// buffer; everything else becomes fully transparent.
pub fn oval_clip(cropped: &RgbaImage) -> RgbaImage {
    let (w, h) = cropped.dimensions();
    let rx = w as f32 / 2.0;
    let ry = h as f32 / 2.0;
    let mut out = RgbaImage::new(w, h);
    for (x, y, px) in cropped.enumerate_pixels() {
        let nx = (x as f32 + 0.5 - rx) / rx;
        let ny = (y as f32 + 0.5 - ry) / ry;
        if nx * nx + ny * ny <= 1.0 {
            out.put_pixel(x, y, *px);
        }
    }
    out
}

/// Destination-out composite: output alpha is the cropped alpha scaled by the
/// inverse of the mask alpha at the matching position.
pub fn mask_out(cropped: &RgbaImage, mask: &RgbaImage, sampling: MaskSampling) -> RgbaImage {
    let (w, h) = cropped.dimensions();
    let resized;
    let mask = if mask.dimensions() == (w, h) {
        mask
    } else {
        resized = imageops::resize(mask, w, h, sampling.filter());
        &resized
    };

    let mut out = RgbaImage::new(w, h);
    for ((dst, src), m) in out.pixels_mut().zip(cropped.pixels()).zip(mask.pixels()) {
        let keep = 255 - u16::from(m[3]);
        let alpha = ((u16::from(src[3]) * keep + 127) / 255) as u8;
        *dst = if alpha == 0 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([src[0], src[1], src[2], alpha])
        };
    }
    out
}
