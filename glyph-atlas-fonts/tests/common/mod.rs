//! Shared helpers for glyph-atlas-fonts integration tests.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` keeps helpers that a given test file does not use
//! from producing warnings.

#![allow(dead_code)]

use glyph_atlas_fonts::{CodepointRange, GlyphMetrics, GlyphRasterizer, PackContext, PackError};

/// Embedded DejaVu Sans for testing the swash rasterizer.
pub const TEST_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

/// Deterministic rasterizer that packs each codepoint as a solid box.
///
/// Box width is `8 + cp % 4`, height is `10 + cp % 3`, advance is the
/// width plus one. Fonts must start with the `FAKE` tag.
pub struct FakeRasterizer;

impl FakeRasterizer {
    pub const FONT: &'static [u8] = b"FAKE font bytes";

    pub fn glyph_size(codepoint: u32) -> (u32, u32) {
        (8 + codepoint % 4, 10 + codepoint % 3)
    }
}

impl GlyphRasterizer for FakeRasterizer {
    fn init_font(&self, font: &[u8]) -> bool {
        font.starts_with(b"FAKE")
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
            // Spaces have no bitmap but still advance the pen
            if codepoint == 0x20 {
                *slot = GlyphMetrics {
                    advance_x: 6.0,
                    ..GlyphMetrics::default()
                };
                continue;
            }
            let (w, h) = Self::glyph_size(codepoint);
            let (x, y) = ctx
                .allocate(w, h)
                .ok_or(PackError::OutOfSpace { codepoint })?;
            ctx.blit(x, y, w, h, &vec![(codepoint % 256) as u8; (w * h) as usize]);
            *slot = GlyphMetrics {
                atlas_x0: x as i32,
                atlas_y0: y as i32,
                atlas_x1: (x + w) as i32,
                atlas_y1: (y + h) as i32,
                offset_x: 0.5,
                offset_y: -(h as f32),
                advance_x: (w + 1) as f32,
            };
        }
        Ok(())
    }
}

/// Assert every glyph rectangle lies inside the atlas and none overlap.
pub fn assert_packed_cleanly(table: &glyph_atlas_fonts::GlyphTable, width: u32, height: u32) {
    let glyphs: Vec<(u32, GlyphMetrics)> = table.iter().collect();
    for (cp, m) in &glyphs {
        assert!(m.atlas_x1 >= m.atlas_x0 && m.atlas_y1 >= m.atlas_y0, "U+{cp:04X}");
        assert!(m.atlas_x0 >= 0 && m.atlas_y0 >= 0, "U+{cp:04X} starts outside");
        assert!(
            m.atlas_x1 <= width as i32 && m.atlas_y1 <= height as i32,
            "U+{cp:04X} ends outside {width}x{height}"
        );
    }
    let drawn: Vec<&(u32, GlyphMetrics)> = glyphs.iter().filter(|(_, m)| !m.is_empty()).collect();
    for (i, (cp_a, a)) in drawn.iter().enumerate() {
        for (cp_b, b) in &drawn[i + 1..] {
            assert!(!a.overlaps(b), "U+{cp_a:04X} overlaps U+{cp_b:04X}");
        }
    }
}
