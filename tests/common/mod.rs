//! Shared helpers for glyph-atlas integration tests.
//!
//! Include with `mod common;` at the top of a test file.

#![allow(dead_code)]

use std::path::Path;

use glyph_atlas::RenderOptions;
use glyph_atlas_fonts::{
    CharsetFlags, CodepointRange, GlyphMetrics, GlyphRasterizer, PackContext, PackError,
};

/// Width of every box glyph
pub const BOX_WIDTH: u32 = 6;
/// Height of every box glyph
pub const BOX_HEIGHT: u32 = 10;
/// Pen advance of every glyph, spaces included
pub const BOX_ADVANCE: f32 = 7.0;

/// Rasterizer that packs every non-space codepoint as a fully covered
/// `BOX_WIDTH` x `BOX_HEIGHT` box sitting on the baseline.
pub struct BoxRasterizer;

impl BoxRasterizer {
    pub const FONT: &'static [u8] = b"BOX";
}

impl GlyphRasterizer for BoxRasterizer {
    fn init_font(&self, font: &[u8]) -> bool {
        font == Self::FONT
    }

    fn pack_range(
        &self,
        ctx: &mut PackContext<'_>,
        _font: &[u8],
        _pixel_size: f32,
        range: CodepointRange,
        out: &mut [GlyphMetrics],
    ) -> Result<(), PackError> {
        for (slot, codepoint) in out.iter_mut().zip(range.codepoints()) {
            if codepoint == 0x20 {
                *slot = GlyphMetrics {
                    advance_x: BOX_ADVANCE,
                    ..GlyphMetrics::default()
                };
                continue;
            }
            let (x, y) = ctx
                .allocate(BOX_WIDTH, BOX_HEIGHT)
                .ok_or(PackError::OutOfSpace { codepoint })?;
            ctx.blit(
                x,
                y,
                BOX_WIDTH,
                BOX_HEIGHT,
                &[255; (BOX_WIDTH * BOX_HEIGHT) as usize],
            );
            *slot = GlyphMetrics {
                atlas_x0: x as i32,
                atlas_y0: y as i32,
                atlas_x1: (x + BOX_WIDTH) as i32,
                atlas_y1: (y + BOX_HEIGHT) as i32,
                offset_x: 0.0,
                offset_y: -(BOX_HEIGHT as f32),
                advance_x: BOX_ADVANCE,
            };
        }
        Ok(())
    }
}

/// Options rendering `message` onto a `width` x `height` canvas in `dir`.
pub fn options_in(dir: &Path, message: &str, width: u32, height: u32) -> RenderOptions {
    RenderOptions {
        message: message.to_string(),
        font_path: dir.join("box.ttf"),
        font_size: 8.0,
        charsets: CharsetFlags::empty(),
        hinting: true,
        canvas_width: width,
        canvas_height: height,
        background_color: [0, 0, 0],
        text_color: [255, 0, 0],
        output: dir.join("message.png"),
        atlas_output: None,
    }
}
