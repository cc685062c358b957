//! Glyph rasterization capability and the shared packing cursor.
//!
//! The atlas builder never rasterizes glyphs itself. It hands a
//! `PackContext` over the atlas pixels to a `GlyphRasterizer` once per
//! codepoint range; the context keeps the shelf cursor between calls so
//! successive ranges pack into the same surface without overlapping.

use swash::FontRef;
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;

use crate::charset::CodepointRange;
use crate::error::PackError;
use crate::glyph_table::GlyphMetrics;

/// Gap in pixels kept between packed glyphs.
pub const PACK_PADDING: u32 = 1;

/// A rasterization backend able to validate fonts and pack glyph ranges.
///
/// Implementations must be deterministic: the same font, size and range
/// packed into an identical context must produce identical metrics.
pub trait GlyphRasterizer {
    /// Check whether the bytes hold a font this rasterizer can use.
    fn init_font(&self, font: &[u8]) -> bool;

    /// Pixels per em that render `font` with an ascent-to-descent height of
    /// `pixel_height` pixels.
    ///
    /// Rasterizers without access to vertical metrics treat the requested
    /// height as one em.
    fn pixels_per_em(&self, _font: &[u8], pixel_height: f32) -> f32 {
        pixel_height
    }

    /// Rasterize every codepoint of `range` into the surface behind `ctx`.
    ///
    /// `out` has exactly `range.count` entries; entry `i` receives the
    /// metrics of codepoint `range.base + i`.
    fn pack_range(
        &self,
        ctx: &mut PackContext<'_>,
        font: &[u8],
        pixel_size: f32,
        range: CodepointRange,
        out: &mut [GlyphMetrics],
    ) -> Result<(), PackError>;
}

/// Packing session over a borrowed 8-bit pixel surface.
///
/// Glyphs are placed on shelves: left to right along the current row, and a
/// new row starts below the tallest glyph of the previous one.
pub struct PackContext<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
    padding: u32,
    next_x: u32,
    next_y: u32,
    row_height: u32,
}

impl<'a> PackContext<'a> {
    /// Start a packing session. `pixels` must hold `width * height` bytes.
    pub fn new(pixels: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            pixels,
            width,
            height,
            padding: PACK_PADDING,
            next_x: 0,
            next_y: 0,
            row_height: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Reserve a `width` x `height` rectangle and return its top-left corner.
    ///
    /// Returns `None` once the surface has no room left for it.
    pub fn allocate(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        let padded_width = width.checked_add(self.padding)?;
        let padded_height = height.checked_add(self.padding)?;
        if padded_width > self.width || padded_height > self.height {
            return None;
        }

        if self.next_x.saturating_add(padded_width) > self.width {
            self.next_x = 0;
            self.next_y = self
                .next_y
                .saturating_add(self.row_height)
                .saturating_add(self.padding);
            self.row_height = 0;
        }

        if self.next_y.saturating_add(padded_height) > self.height {
            return None;
        }

        let pos = (self.next_x, self.next_y);
        self.next_x += padded_width;
        self.row_height = self.row_height.max(height);
        Some(pos)
    }

    /// Copy a coverage mask of `width` x `height` bytes to `(x, y)`.
    ///
    /// The destination must come from `allocate`; rows past the end of
    /// `mask` are left untouched. Empty rectangles write nothing.
    pub fn blit(&mut self, x: u32, y: u32, width: u32, height: u32, mask: &[u8]) {
        if width == 0 || height == 0 {
            return;
        }
        let (x, width) = (x as usize, width as usize);
        let stride = self.width as usize;
        for (row, src) in mask.chunks_exact(width).take(height as usize).enumerate() {
            let start = (y as usize + row) * stride + x;
            self.pixels[start..start + width].copy_from_slice(src);
        }
    }
}

/// `GlyphRasterizer` backed by swash outline scaling.
///
/// `pixel_size` is the distance from ascent to descent in pixels, the same
/// scale a TrueType packer derives from a pixel height. Codepoints the font does not
/// map render the font's `.notdef` glyph, as a TrueType packer would.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwashRasterizer {
    hinting: bool,
}

impl Default for SwashRasterizer {
    fn default() -> Self {
        Self { hinting: true }
    }
}

impl SwashRasterizer {
    pub fn new(hinting: bool) -> Self {
        Self { hinting }
    }

    pub fn hinting(&self) -> bool {
        self.hinting
    }
}

impl GlyphRasterizer for SwashRasterizer {
    fn init_font(&self, font: &[u8]) -> bool {
        FontRef::from_index(font, 0).is_some()
    }

    fn pixels_per_em(&self, font: &[u8], pixel_height: f32) -> f32 {
        FontRef::from_index(font, 0).map_or(pixel_height, |font_ref| {
            pixels_per_em_for_height(font_ref, pixel_height)
        })
    }

    fn pack_range(
        &self,
        ctx: &mut PackContext<'_>,
        font: &[u8],
        pixel_size: f32,
        range: CodepointRange,
        out: &mut [GlyphMetrics],
    ) -> Result<(), PackError> {
        if out.len() != range.count as usize {
            return Err(PackError::MetricsLength {
                expected: range.count as usize,
                actual: out.len(),
            });
        }

        let font_ref = FontRef::from_index(font, 0).ok_or(PackError::InvalidFont)?;
        let charmap = font_ref.charmap();
        let ppem = pixels_per_em_for_height(font_ref, pixel_size);
        let advances = font_ref.glyph_metrics(&[]).scale(ppem);

        let mut context = ScaleContext::new();
        let mut scaler = context
            .builder(font_ref)
            .size(ppem)
            .hint(self.hinting)
            .build();
        let mut render = Render::new(&[Source::Outline]);
        render.format(Format::Alpha);

        for (slot, codepoint) in out.iter_mut().zip(range.codepoints()) {
            let glyph_id = char::from_u32(codepoint).map_or(0, |ch| charmap.map(ch));
            let advance_x = advances.advance_width(glyph_id);

            let image = render
                .render(&mut scaler, glyph_id)
                .filter(|image| matches!(image.content, Content::Mask));

            *slot = match image {
                Some(image) if image.placement.width > 0 && image.placement.height > 0 => {
                    let w = image.placement.width;
                    let h = image.placement.height;
                    let (x, y) = ctx
                        .allocate(w, h)
                        .ok_or(PackError::OutOfSpace { codepoint })?;
                    ctx.blit(x, y, w, h, &image.data);
                    GlyphMetrics {
                        atlas_x0: x as i32,
                        atlas_y0: y as i32,
                        atlas_x1: (x + w) as i32,
                        atlas_y1: (y + h) as i32,
                        offset_x: image.placement.left as f32,
                        offset_y: -image.placement.top as f32,
                        advance_x,
                    }
                }
                // Whitespace or an empty outline: nothing to place
                _ => GlyphMetrics {
                    advance_x,
                    ..GlyphMetrics::default()
                },
            };

            log::trace!(
                "glyph U+{:04X} placement: [{} {} {} {}] advance {:.2}",
                codepoint,
                slot.atlas_x0,
                slot.atlas_y0,
                slot.atlas_x1,
                slot.atlas_y1,
                slot.advance_x
            );
        }

        Ok(())
    }
}

/// Scale `pixel_height` (ascent to descent) to pixels per em.
fn pixels_per_em_for_height(font_ref: FontRef<'_>, pixel_height: f32) -> f32 {
    let metrics = font_ref.metrics(&[]);
    let height_units = metrics.ascent + metrics.descent;
    if height_units > 0.0 && metrics.units_per_em > 0 {
        pixel_height * metrics.units_per_em as f32 / height_units
    } else {
        pixel_height
    }
}
