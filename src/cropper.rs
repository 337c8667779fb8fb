//! The crop window as seen by a host view.
//!
//! [`Cropper`] owns the source image, the configuration and the current
//! [`EdgeSet`]. Hosts feed it layout changes and pointer events in overlay
//! coordinates and ask it for the cropped result.
//!
//! A drag gesture snapshots the window when it starts. Every move resolves the
//! total pointer travel against that snapshot in one call, so a half-updated
//! window is never visible, and a cancel puts the snapshot back.

use image::{DynamicImage, RgbaImage};
use tracing::{debug, info, trace, warn};

use crate::aspect::AspectRatio;
use crate::bounds::{BoundsResolver, GuidelineMode};
use crate::config::CropConfig;
use crate::edge::EdgeSet;
use crate::error::{CropError, CropResult};
use crate::extract::{self, CropShape, MaskSampling, PixelRect, Shape};
use crate::geometry::{Point, Rect};
use crate::handle::{self, DragHandle, TOUCH_TOLERANCE};
use crate::layout::{self, ScaleMode};
use crate::mapper::CoordinateMapper;
use crate::state::CropperState;

#[derive(Clone, Copy, Debug)]
struct DragSession {
    handle: DragHandle,
    origin: Point,
    snapshot: EdgeSet,
}

#[derive(Debug, Default)]
pub struct Cropper {
    config: CropConfig,
    mask: Option<RgbaImage>,
    source: Option<DynamicImage>,
    display: Rect,
    edges: EdgeSet,
    degrees_rotated: i32,
    drag: Option<DragSession>,
    // Set when the window must be rebuilt from the default placement once the
    // next display rect arrives (new image, rotation).
    pending_default: bool,
}

impl Cropper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CropConfig) -> CropResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn edges(&self) -> EdgeSet {
        self.edges
    }

    pub fn display_rect(&self) -> Rect {
        self.display
    }

    pub fn source_image(&self) -> Option<&DynamicImage> {
        self.source.as_ref()
    }

    pub fn mask_buffer(&self) -> Option<&RgbaImage> {
        self.mask.as_ref()
    }

    pub fn degrees_rotated(&self) -> i32 {
        self.degrees_rotated
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn active_handle(&self) -> Option<DragHandle> {
        self.drag.map(|d| d.handle)
    }

    /// Whether the host should draw the rule-of-thirds guidelines right now.
    pub fn guidelines_visible(&self) -> bool {
        self.config.guidelines.is_visible(self.is_dragging())
    }

    fn resolver(&self) -> BoundsResolver {
        BoundsResolver::new(self.display)
    }

    fn end_drag(&mut self, reason: &str) {
        if let Some(session) = self.drag.take() {
            debug!(handle = ?session.handle, reason, "Drag gesture ended");
        }
    }

    fn reset_window(&mut self) {
        self.edges = self.resolver().default_window(self.config.lock_ratio());
    }

    fn refit_window(&mut self) {
        self.end_drag("window refit");
        self.edges = self.resolver().settle(&self.edges, self.config.lock_ratio());
    }

    // Configuration ---------------------------------------------------------

    fn check_ratio_fits(&self, ratio: AspectRatio) -> CropResult<()> {
        if self.resolver().fits_ratio(ratio.value()) {
            return Ok(());
        }
        let err = CropError::config(format!(
            "aspect ratio {ratio} cannot hold the minimum window inside the display rect"
        ));
        warn!("{err}");
        Err(err)
    }

    /// Sets the locked width:height ratio.
    ///
    /// Non-positive terms are rejected. While the lock is on, so is a ratio
    /// whose minimum-size window does not fit the current display rect.
    pub fn set_aspect_ratio(&mut self, numerator: i32, denominator: i32) -> CropResult<()> {
        let ratio = AspectRatio::new(numerator, denominator).inspect_err(|e| warn!("{e}"))?;
        if self.config.aspect_lock {
            self.check_ratio_fits(ratio)?;
        }
        self.config.aspect_ratio = ratio;
        if self.config.aspect_lock {
            self.refit_window();
        }
        Ok(())
    }

    /// Turns the aspect lock on or off. Enabling fails, leaving the lock off,
    /// when the configured ratio cannot fit the display rect.
    pub fn set_aspect_lock_enabled(&mut self, enabled: bool) -> CropResult<()> {
        if enabled {
            self.check_ratio_fits(self.config.aspect_ratio)?;
        }
        self.config.aspect_lock = enabled;
        if enabled {
            self.refit_window();
        }
        Ok(())
    }

    pub fn set_guideline_mode(&mut self, mode: GuidelineMode) {
        self.config.guidelines = mode;
    }

    /// Selects the output shape. `Mask` needs a mask buffer set beforehand.
    pub fn set_crop_shape(&mut self, shape: CropShape) -> CropResult<()> {
        if shape == CropShape::Mask && self.mask.is_none() {
            let err = CropError::config("mask shape requires a mask buffer");
            warn!("{err}");
            return Err(err);
        }
        self.config.shape = shape;
        Ok(())
    }

    pub fn set_mask_buffer(&mut self, mask: RgbaImage) -> CropResult<()> {
        if mask.width() == 0 || mask.height() == 0 {
            let err = CropError::config("mask buffer has no pixels");
            warn!("{err}");
            return Err(err);
        }
        debug!(width = mask.width(), height = mask.height(), "Mask buffer set");
        self.mask = Some(mask);
        Ok(())
    }

    /// Drops the mask buffer. Refused while the shape is `Mask`.
    pub fn clear_mask_buffer(&mut self) -> CropResult<()> {
        if self.config.shape == CropShape::Mask {
            return Err(CropError::config(
                "cannot clear the mask buffer while the mask shape is selected",
            ));
        }
        self.mask = None;
        Ok(())
    }

    pub fn set_mask_sampling(&mut self, sampling: MaskSampling) {
        self.config.mask_sampling = sampling;
    }

    pub fn set_scale_mode(&mut self, mode: ScaleMode) -> CropResult<()> {
        self.config.scale_mode = mode.check().inspect_err(|e| warn!("{e}"))?;
        Ok(())
    }

    // Layout and image ------------------------------------------------------

    /// Receives the display rect from the host layout.
    ///
    /// An existing window is carried over proportionally and re-clamped. Passing
    /// the current rect again changes nothing.
    pub fn set_display_rect(&mut self, rect: Rect) {
        if rect == self.display {
            self.pending_default = false;
            return;
        }
        let old = self.display;
        self.end_drag("display rect changed");
        self.display = rect;
        if rect.is_empty() {
            self.edges = EdgeSet::from_rect(rect);
            return;
        }

        if self.pending_default || old.is_empty() || !self.edges.is_well_formed() {
            self.reset_window();
            self.pending_default = false;
        } else {
            let sx = rect.width() / old.width();
            let sy = rect.height() / old.height();
            let carried = EdgeSet::new(
                rect.left + (self.edges.left - old.left) * sx,
                rect.top + (self.edges.top - old.top) * sy,
                rect.left + (self.edges.right - old.left) * sx,
                rect.top + (self.edges.bottom - old.top) * sy,
            );
            self.edges = self.resolver().settle(&carried, self.config.lock_ratio());
        }
        debug!(?rect, edges = ?self.edges, "Display rect updated");
    }

    /// Lays the image out in a `view_width` x `view_height` view using the
    /// configured scale mode and applies the resulting display rect.
    pub fn layout_view(&mut self, view_width: f32, view_height: f32) -> CropResult<Rect> {
        let rect = match &self.source {
            Some(img) => layout::display_rect(
                self.config.scale_mode,
                img.width(),
                img.height(),
                view_width,
                view_height,
            )?,
            None => Rect::EMPTY,
        };
        self.set_display_rect(rect);
        Ok(rect)
    }

    /// Replaces the source image and resets the crop window.
    pub fn set_source_image(&mut self, image: DynamicImage) {
        info!(
            width = image.width(),
            height = image.height(),
            "Source image assigned"
        );
        self.end_drag("source image replaced");
        self.source = Some(image);
        self.degrees_rotated = 0;
        self.reset_window();
        self.pending_default = true;
    }

    /// Rotates the source image clockwise by a multiple of 90 degrees.
    pub fn rotate(&mut self, degrees: i32) -> CropResult<()> {
        if degrees % 90 != 0 {
            let err = CropError::config(format!(
                "rotation must be a multiple of 90 degrees, got {degrees}"
            ));
            warn!("{err}");
            return Err(err);
        }
        let Some(source) = self.source.take() else {
            debug!(degrees, "Rotation ignored without a source image");
            return Ok(());
        };
        let rotated = match degrees.rem_euclid(360) {
            90 => source.rotate90(),
            180 => source.rotate180(),
            270 => source.rotate270(),
            _ => source,
        };
        self.end_drag("image rotated");
        self.source = Some(rotated);
        self.degrees_rotated = (self.degrees_rotated + degrees).rem_euclid(360);
        self.reset_window();
        self.pending_default = true;
        info!(degrees, total = self.degrees_rotated, "Source image rotated");
        Ok(())
    }

    pub fn saved_state(&self) -> CropperState {
        CropperState {
            degrees_rotated: self.degrees_rotated,
        }
    }

    /// Brings the current image to a saved rotation.
    ///
    /// The saved angle is absolute, so only the difference from the current
    /// rotation is applied. Without an image the state is ignored.
    pub fn restore_state(&mut self, state: CropperState) -> CropResult<()> {
        if self.source.is_none() {
            debug!("Saved state ignored without a source image");
            return Ok(());
        }
        let delta = (state.degrees_rotated - self.degrees_rotated).rem_euclid(360);
        if delta != 0 {
            self.rotate(delta)?;
        }
        Ok(())
    }

    // Pointer input ---------------------------------------------------------

    /// Starts a gesture. Returns the grabbed handle, or `None` when the press
    /// misses the window and the gesture is ignored.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> Option<DragHandle> {
        self.end_drag("new gesture");
        if self.source.is_none() || self.display.is_empty() {
            return None;
        }
        let origin = Point::new(x, y);
        let handle = handle::hit_test(origin, &self.edges, TOUCH_TOLERANCE)?;
        debug!(?handle, x, y, "Drag gesture started");
        self.drag = Some(DragSession {
            handle,
            origin,
            snapshot: self.edges,
        });
        Some(handle)
    }

    /// Applies one pointer move. Returns whether the window changed.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        let dx = x - session.origin.x;
        let dy = y - session.origin.y;
        let resolved = session.handle.resolve(
            &session.snapshot,
            dx,
            dy,
            &self.resolver(),
            self.config.lock_ratio(),
        );
        match resolved {
            Some(edges) if edges != self.edges => {
                trace!(?edges, "Drag step settled");
                self.edges = edges;
                true
            }
            Some(_) => false,
            None => {
                trace!(dx, dy, "Drag step has no ratio-preserving fit, keeping window");
                false
            }
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.end_drag("pointer up");
    }

    /// Aborts the gesture and restores the window it started from.
    pub fn on_pointer_cancel(&mut self) {
        if let Some(session) = self.drag {
            self.edges = session.snapshot;
        }
        self.end_drag("cancelled");
    }

    // Output ----------------------------------------------------------------

    fn mapper(&self) -> CropResult<(&DynamicImage, CoordinateMapper)> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| CropError::region("no source image assigned"))?;
        let mapper = CoordinateMapper::new(self.display, source.width(), source.height())?;
        Ok((source, mapper))
    }

    /// The crop window in source pixels, clamped to the image.
    pub fn actual_crop_rect(&self) -> CropResult<Rect> {
        let (_, mapper) = self.mapper()?;
        Ok(mapper.actual_crop_rect(&self.edges))
    }

    /// The integer pixel region that extraction copies.
    pub fn crop_pixel_rect(&self) -> CropResult<PixelRect> {
        let (source, mapper) = self.mapper()?;
        PixelRect::from_source_rect(&mapper.map_edges(&self.edges), source.width(), source.height())
    }

    /// Extracts the crop window using the configured shape.
    pub fn cropped_image(&self) -> CropResult<RgbaImage> {
        self.cropped_image_with(false)
    }

    /// Extracts the crop window; `force_rect` skips the oval or mask shaping.
    pub fn cropped_image_with(&self, force_rect: bool) -> CropResult<RgbaImage> {
        let (source, _) = self.mapper()?;
        let region = self.crop_pixel_rect()?;
        let shape = match (force_rect, self.config.shape) {
            (true, _) | (false, CropShape::Rect) => Shape::Rect,
            (false, CropShape::Oval) => Shape::Oval,
            (false, CropShape::Mask) => Shape::Mask {
                mask: self
                    .mask
                    .as_ref()
                    .ok_or_else(|| CropError::config("mask shape requires a mask buffer"))?,
                sampling: self.config.mask_sampling,
            },
        };
        debug!(?region, shape = %self.config.shape, force_rect, "Extracting crop");
        Ok(extract::apply_shape(extract::extract(source, region), shape))
    }

    /// Resets the window to the default placement for the current layout.
    pub fn reset_crop_window(&mut self) {
        self.end_drag("window reset");
        self.reset_window();
    }
}
