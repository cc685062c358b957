//! Message canvas composition and PNG output.

use std::path::Path;

use anyhow::{Context, Result};
use glyph_atlas_fonts::{FontAtlas, TextLayout};
use image::{GrayImage, ImageFormat, Rgba, RgbaImage};

/// Colors used when composing a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub background: [u8; 3],
    pub color: [u8; 3],
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            background: [15, 15, 15],
            color: [255, 255, 255],
        }
    }
}

/// Draw a laid-out line onto a fresh `width` x `height` canvas.
///
/// Glyph coverage from the atlas blends the text color over the background.
/// Layout positions are relative to the baseline, so every glyph is shifted
/// down by the text height to keep the line inside its centered box. Pixels
/// that fall outside the canvas are clipped.
pub fn compose_message(
    atlas: &FontAtlas,
    layout: &TextLayout,
    width: u32,
    height: u32,
    style: TextStyle,
) -> RgbaImage {
    let [r, g, b] = style.background;
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
    let baseline = layout.extent.height;

    for glyph in &layout.glyphs {
        let m = &glyph.metrics;
        for row in 0..m.height() {
            let dst_y = glyph.y + baseline + row;
            if dst_y < 0 || dst_y >= height as i32 {
                continue;
            }
            for col in 0..m.width() {
                let dst_x = glyph.x + col;
                if dst_x < 0 || dst_x >= width as i32 {
                    continue;
                }
                let Some(coverage) =
                    atlas.pixel((m.atlas_x0 + col) as u32, (m.atlas_y0 + row) as u32)
                else {
                    continue;
                };
                if coverage == 0 {
                    continue;
                }
                let pixel = canvas.get_pixel_mut(dst_x as u32, dst_y as u32);
                blend(pixel, style.color, coverage);
            }
        }
    }

    canvas
}

/// Blend `color` over `pixel` with `coverage` as alpha.
fn blend(pixel: &mut Rgba<u8>, color: [u8; 3], coverage: u8) {
    let alpha = coverage as u32;
    for (dst, src) in pixel.0.iter_mut().zip(color) {
        let mixed = (src as u32 * alpha + *dst as u32 * (255 - alpha) + 127) / 255;
        *dst = mixed as u8;
    }
}

/// Write a composed message as PNG.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the atlas surface as an 8-bit grayscale PNG.
pub fn save_atlas_png(atlas: &FontAtlas, path: &Path) -> Result<()> {
    let image = GrayImage::from_raw(atlas.width(), atlas.height(), atlas.pixels().to_vec())
        .context("Atlas pixel buffer does not match its dimensions")?;
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write atlas {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_extremes() {
        let mut pixel = Rgba([10, 20, 30, 255]);
        blend(&mut pixel, [200, 100, 0], 0);
        assert_eq!(pixel, Rgba([10, 20, 30, 255]));
        blend(&mut pixel, [200, 100, 0], 255);
        assert_eq!(pixel, Rgba([200, 100, 0, 255]));
    }

    #[test]
    fn test_blend_half_coverage() {
        let mut pixel = Rgba([0, 0, 0, 255]);
        blend(&mut pixel, [255, 255, 255], 128);
        assert_eq!(pixel, Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_empty_layout_is_background() {
        let style = TextStyle::default();
        let atlas_layout = TextLayout::default();
        let (atlas, _) = glyph_atlas_fonts::AtlasBuilder::new(NullRasterizer)
            .build(b"", 4.0, Default::default())
            .unwrap();
        let canvas = compose_message(&atlas, &atlas_layout, 4, 3, style);
        assert!(canvas.pixels().all(|p| *p == Rgba([15, 15, 15, 255])));
    }

    /// Accepts any font and packs nothing but advances.
    struct NullRasterizer;

    impl glyph_atlas_fonts::GlyphRasterizer for NullRasterizer {
        fn init_font(&self, _font: &[u8]) -> bool {
            true
        }

        fn pack_range(
            &self,
            _ctx: &mut glyph_atlas_fonts::PackContext<'_>,
            _font: &[u8],
            _pixel_size: f32,
            _range: glyph_atlas_fonts::CodepointRange,
            out: &mut [glyph_atlas_fonts::GlyphMetrics],
        ) -> Result<(), glyph_atlas_fonts::PackError> {
            for slot in out {
                slot.advance_x = 1.0;
            }
            Ok(())
        }
    }
}
