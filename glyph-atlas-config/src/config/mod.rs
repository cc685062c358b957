//! Renderer configuration.
//!
//! # Sub-modules
//!
//! - [`persistence`]: `impl Config` methods for load/save and path resolution

pub mod persistence;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{CharsetName, LogLevel};

/// Settings for building the glyph atlas and composing the message image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // --- Font Settings ---
    /// Path to the TrueType/OpenType font file
    #[serde(default = "crate::defaults::font_path")]
    pub font_path: PathBuf,

    /// Text height in pixels, measured from ascent to descent
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: f32,

    /// Charsets rasterized in addition to Latin
    #[serde(default)]
    pub charsets: Vec<CharsetName>,

    /// Enable outline hinting in the rasterizer
    #[serde(default = "crate::defaults::bool_true")]
    pub hinting: bool,

    // --- Canvas Settings ---
    /// Output image width in pixels
    #[serde(default = "crate::defaults::canvas_width")]
    pub canvas_width: u32,

    /// Output image height in pixels
    #[serde(default = "crate::defaults::canvas_height")]
    pub canvas_height: u32,

    /// Canvas fill color [R, G, B]
    #[serde(default = "crate::defaults::background_color")]
    pub background_color: [u8; 3],

    /// Text color [R, G, B]
    #[serde(default = "crate::defaults::text_color")]
    pub text_color: [u8; 3],

    // --- Debug Logging ---
    /// Controls verbosity of the debug log file.
    /// RUST_LOG and the --log-level CLI flag take precedence.
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_path: crate::defaults::font_path(),
            font_size: crate::defaults::font_size(),
            charsets: Vec::new(),
            hinting: crate::defaults::bool_true(),
            canvas_width: crate::defaults::canvas_width(),
            canvas_height: crate::defaults::canvas_height(),
            background_color: crate::defaults::background_color(),
            text_color: crate::defaults::text_color(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font file path
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = path.into();
        self
    }

    /// Set the text height in pixels
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the output canvas dimensions
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Add a charset to the atlas selection (duplicates are ignored)
    pub fn with_charset(mut self, charset: CharsetName) -> Self {
        if !self.charsets.contains(&charset) {
            self.charsets.push(charset);
        }
        self
    }

    /// Check field values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "font_size must be a positive number, got {}",
                self.font_size
            )));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Validation(format!(
                "canvas dimensions must be non-zero, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.font_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "font_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
