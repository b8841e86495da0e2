//! Session configuration loaded from JSON and overridden from the command line.

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{FxError, FxResult};
use crate::palette::Palette;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Settings for an [`crate::FxSession`]. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FxConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
    /// Seed for the random direction and strobe choices. `None` uses OS entropy.
    pub seed: Option<u64>,
    /// Colors.
    pub palette: Palette,
}

impl Default for FxConfig {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            width: canvas.width,
            height: canvas.height,
            fps: Fps::default(),
            seed: None,
            palette: Palette::default(),
        }
    }
}

impl FxConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader(r: impl Read) -> FxResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| FxError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Load a config from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> FxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FxError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check value ranges.
    pub fn validate(&self) -> FxResult<()> {
        self.canvas()?;
        Fps::new(self.fps.num, self.fps.den)?;
        Ok(())
    }

    /// Validated surface size.
    pub fn canvas(&self) -> FxResult<Canvas> {
        Canvas::new(self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
