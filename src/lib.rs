//! # Crop Window
//!
//! Geometry core of an interactive image crop window:
//! - Four draggable edges in overlay space, with corner, side and move handles
//! - Optional aspect ratio lock, anchored at the corner opposite the drag
//! - Bounds clamping, minimum window size and edge snapping
//! - Mapping of the window onto the full-resolution source image
//! - Pixel extraction with rectangle, oval or mask shaping
//!
//! ## Architecture
//!
//! 1. **edge** - the `EdgeSet` value holder
//! 2. **handle** - hit testing and per-handle drag resolution
//! 3. **aspect** - ratio math shared by resizing and refitting
//! 4. **bounds** - clamping, snapping and minimum size
//! 5. **layout** / **mapper** - display rect placement and overlay/source mapping
//! 6. **extract** - pixel extraction and shaping
//! 7. **cropper** - the `Cropper` facade a host view talks to
//!
//! Rendering, input delivery and image decoding stay with the host; see the
//! `crop-window` binary for an eframe host.

pub mod aspect;
pub mod bounds;
pub mod config;
pub mod cropper;
pub mod edge;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod handle;
pub mod layout;
pub mod mapper;
pub mod state;

pub use aspect::AspectRatio;
pub use bounds::{BoundsResolver, GuidelineMode, MIN_CROP_LENGTH, SNAP_RADIUS};
pub use config::CropConfig;
pub use cropper::Cropper;
pub use edge::{Edge, EdgeSet};
pub use error::{CropError, CropResult};
pub use extract::{CropShape, MaskSampling, PixelRect, Shape};
pub use geometry::{Point, Rect};
pub use handle::{Corner, DragHandle, TOUCH_TOLERANCE};
pub use layout::ScaleMode;
pub use mapper::CoordinateMapper;
pub use state::CropperState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Console output, `RUST_LOG` respected, INFO when unset.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init()?;

    Ok(())
}
