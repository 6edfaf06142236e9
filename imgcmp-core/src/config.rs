//! Viewer configuration.
//!
//! Loaded from JSON. Every field has a default, so a partial file (or no
//! file at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::input::DEFAULT_BLEND_STEP;

pub type Rgba = [f32; 4];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "imgcmp".to_string(),
        }
    }
}

/// Checkerboard drawn behind the images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub dark: Rgba,
    pub light: Rgba,
    /// Checker size in screen pixels at any zoom.
    pub block_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dark: [0.4, 0.4, 0.4, 1.0],
            light: [0.9, 0.9, 0.9, 1.0],
            block_size: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    pub visible: bool,
    pub color: Rgba,
    /// Premultiplied.
    pub background: Rgba,
    pub scale: f32,
    pub left: f32,
    pub top: f32,
    pub line_spacing: f32,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            visible: true,
            color: [0.0, 0.0, 1.0, 1.0],
            background: [0.5, 0.5, 0.5, 0.5],
            scale: 0.5,
            left: 20.0,
            top: 100.0,
            line_spacing: 128.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// `None` means the built-in default path.
    pub atlas: Option<PathBuf>,
    pub glyphs_per_row: u32,
}

impl FontConfig {
    pub const DEFAULT_ATLAS: &'static str = "Font.png";
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            atlas: None,
            glyphs_per_row: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub clear_color: Rgba,
    pub grid: GridConfig,
    pub help: HelpConfig,
    pub font: FontConfig,
    pub blend_step: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            grid: GridConfig::default(),
            help: HelpConfig::default(),
            font: FontConfig::default(),
            blend_step: DEFAULT_BLEND_STEP,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                tracing::info!(path = %path.display(), "loaded config");
                Self::from_json_str(&json)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(CoreError::ConfigIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
