//! Top-level rendering pipeline.
//!
//! Reads the font, builds the atlas, lays out the message centered on the
//! canvas and writes the result as PNG.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use glyph_atlas_fonts::{
    AtlasBuilder, Charset, CharsetFlags, GlyphRasterizer, SwashRasterizer, TextExtent, codepoints,
    layout_text,
};

use crate::render::{self, TextStyle};

/// Fully resolved settings for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub message: String,
    pub font_path: PathBuf,
    pub font_size: f32,
    pub charsets: CharsetFlags,
    pub hinting: bool,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background_color: [u8; 3],
    pub text_color: [u8; 3],
    pub output: PathBuf,
    /// Where to dump the atlas surface, if requested
    pub atlas_output: Option<PathBuf>,
}

impl RenderOptions {
    pub fn style(&self) -> TextStyle {
        TextStyle {
            background: self.background_color,
            color: self.text_color,
        }
    }
}

/// What a render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub glyph_count: usize,
    pub extent: TextExtent,
    pub placed_glyphs: usize,
    /// Characters of the message with no glyph in the atlas
    pub skipped: Vec<char>,
}

/// Comma-separated names of the charsets an atlas built with `flags` holds.
///
/// Latin is always listed.
pub fn selected_charsets(flags: CharsetFlags) -> String {
    Charset::ALL
        .into_iter()
        .filter(|&charset| charset == Charset::Latin || flags.contains(charset.flag()))
        .map(|charset| charset.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render `options.message` with the swash rasterizer.
pub fn run(options: &RenderOptions) -> Result<RenderSummary> {
    let font = fs::read(&options.font_path)
        .with_context(|| format!("Failed to read font {}", options.font_path.display()))?;
    log::info!(
        "Loaded {} bytes of font data from {:?}",
        font.len(),
        options.font_path
    );
    let builder = AtlasBuilder::new(SwashRasterizer::new(options.hinting));
    run_with(&builder, &font, options)
}

/// Render `options.message` from already loaded font bytes.
pub fn run_with<R: GlyphRasterizer>(
    builder: &AtlasBuilder<R>,
    font: &[u8],
    options: &RenderOptions,
) -> Result<RenderSummary> {
    log::info!(
        "Rasterizing charsets: {}",
        selected_charsets(options.charsets)
    );
    let (atlas, table) = builder
        .build(font, options.font_size, options.charsets)
        .with_context(|| format!("Could not build atlas from {}", options.font_path.display()))?;
    log::info!(
        "Built {}x{} atlas with {} glyphs",
        atlas.width(),
        atlas.height(),
        table.len()
    );

    if let Some(path) = &options.atlas_output {
        render::save_atlas_png(&atlas, path)?;
        log::info!("Wrote atlas to {:?}", path);
    }

    let skipped: Vec<char> = options
        .message
        .chars()
        .filter(|&ch| !table.contains(u32::from(ch)))
        .collect();
    if !skipped.is_empty() {
        log::warn!(
            "Skipping {} character(s) outside the atlas: {:?}",
            skipped.len(),
            skipped
        );
    }

    let layout = layout_text(
        &table,
        &codepoints(&options.message),
        options.canvas_width as i32,
        options.canvas_height as i32,
    );
    log::debug!(
        "Text extent {}x{} at origin {:?}",
        layout.extent.width,
        layout.extent.height,
        layout.origin
    );

    let canvas = render::compose_message(
        &atlas,
        &layout,
        options.canvas_width,
        options.canvas_height,
        options.style(),
    );
    render::save_png(&canvas, &options.output)?;
    log::info!("Wrote message to {:?}", options.output);

    Ok(RenderSummary {
        atlas_width: atlas.width(),
        atlas_height: atlas.height(),
        glyph_count: table.len(),
        extent: layout.extent,
        placed_glyphs: layout.glyphs.len(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_charsets_always_lists_latin() {
        assert_eq!(selected_charsets(CharsetFlags::empty()), "latin");
        assert_eq!(
            selected_charsets(CharsetFlags::CYRILLIC | CharsetFlags::GREEK),
            "latin, greek, cyrillic"
        );
    }
}
