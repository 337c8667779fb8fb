//! Crop window configuration.
//!
//! The cropper holds one [`CropConfig`] and only changes it through validated
//! setters, so a rejected value never leaves a half-applied configuration.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::bounds::GuidelineMode;
use crate::error::{CropError, CropResult};
use crate::extract::{CropShape, MaskSampling};
use crate::layout::ScaleMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub aspect_ratio: AspectRatio,
    pub aspect_lock: bool,
    pub guidelines: GuidelineMode,
    pub shape: CropShape,
    pub scale_mode: ScaleMode,
    pub mask_sampling: MaskSampling,
}

impl CropConfig {
    /// Checks values that cannot be honored without further input.
    ///
    /// A mask shape is rejected here because a fresh configuration has no mask
    /// buffer to go with it.
    pub fn validate(&self) -> CropResult<()> {
        if !self.aspect_ratio.is_valid() {
            return Err(CropError::config(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if self.shape == CropShape::Mask {
            return Err(CropError::config("mask shape requires a mask buffer"));
        }
        self.scale_mode.check()?;
        Ok(())
    }

    /// Width/height ratio when aspect lock is on.
    pub fn lock_ratio(&self) -> Option<f32> {
        self.aspect_lock.then(|| self.aspect_ratio.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CropConfig::default();
        assert_eq!(config.aspect_ratio, AspectRatio::default());
        assert!(!config.aspect_lock);
        assert_eq!(config.guidelines, GuidelineMode::OnResize);
        assert_eq!(config.shape, CropShape::Rect);
        assert_eq!(config.scale_mode, ScaleMode::FitCenter);
        assert!(config.validate().is_ok());
        assert_eq!(config.lock_ratio(), None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = CropConfig {
            aspect_ratio: AspectRatio {
                numerator: 0,
                denominator: 2,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CropConfig {
            scale_mode: ScaleMode::CenterCrop,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CropError::UnsupportedScaleMode(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CropConfig = serde_json::from_str(r#"{"aspect_lock": true}"#).unwrap();
        assert!(config.aspect_lock);
        assert_eq!(config.lock_ratio(), Some(1.0));
    }
}
