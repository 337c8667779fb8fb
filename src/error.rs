//! Error types for the crop window.
//!
//! Configuration mistakes are rejected at the setter that caused them and leave
//! the cropper untouched. Extraction failures are returned to the caller.
//! Geometry conflicts during a drag (aspect lock against bounds) never surface
//! here: the resolver keeps the previous rectangle instead.

use thiserror::Error;

use crate::layout::ScaleMode;

/// Errors reported by the crop window.
#[derive(Error, Debug)]
pub enum CropError {
    /// A setter received a value it cannot honor.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// The crop window does not describe a usable pixel region.
    #[error("Invalid crop region: {reason}")]
    InvalidCropRegion { reason: String },

    /// Only fit-center and center-inside placement are supported.
    #[error("Unsupported scale mode: {0:?}")]
    UnsupportedScaleMode(ScaleMode),

    /// Reading or writing the saved state failed.
    #[error("Failed to persist cropper state: {0}")]
    Persist(#[from] std::io::Error),

    /// The saved state could not be encoded or decoded.
    #[error("Malformed cropper state: {0}")]
    StateFormat(#[from] serde_json::Error),
}

impl CropError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn region(reason: impl Into<String>) -> Self {
        Self::InvalidCropRegion {
            reason: reason.into(),
        }
    }
}

/// Result type alias for crop window operations.
pub type CropResult<T> = Result<T, CropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CropError::config("aspect ratio must be positive, got 0:3");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: aspect ratio must be positive, got 0:3"
        );

        let err = CropError::region("no source image");
        assert_eq!(err.to_string(), "Invalid crop region: no source image");

        let err = CropError::UnsupportedScaleMode(ScaleMode::CenterCrop);
        assert_eq!(err.to_string(), "Unsupported scale mode: CenterCrop");
    }

    #[test]
    fn test_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CropError = io.into();
        assert!(matches!(err, CropError::Persist(_)));
    }
}
