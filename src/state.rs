//! State that survives a save/restore cycle of the host view.
//!
//! Only the accumulated rotation is kept. The crop window itself is rebuilt
//! from the default placement after a restore.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CropResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropperState {
    pub degrees_rotated: i32,
}

impl CropperState {
    pub fn to_json(&self) -> CropResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> CropResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> CropResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> CropResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
