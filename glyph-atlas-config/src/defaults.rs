//! Default value functions for configuration.
//!
//! Each function backs a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field.

use std::path::PathBuf;

pub fn font_path() -> PathBuf {
    PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf")
}

pub fn font_size() -> f32 {
    32.0
}

pub fn canvas_width() -> u32 {
    1024
}

pub fn canvas_height() -> u32 {
    256
}

pub fn background_color() -> [u8; 3] {
    [0x0f, 0x0f, 0x0f]
}

pub fn text_color() -> [u8; 3] {
    [0xff, 0xff, 0xff]
}

pub fn bool_true() -> bool {
    true
}
