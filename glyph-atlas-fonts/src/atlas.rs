//! Atlas construction: surface sizing, allocation and per-range packing.

use crate::charset::{CharsetFlags, CodepointRange, resolve_ranges};
use crate::error::FontLoadError;
use crate::glyph_table::{GlyphMetrics, GlyphTable};
use crate::rasterizer::{GlyphRasterizer, PACK_PADDING, PackContext, SwashRasterizer};

/// Largest width or height, in pixels, an atlas surface may have.
pub const MAX_ATLAS_DIMENSION: u32 = 16384;

/// Glyph cell side in ems used when sizing the surface.
///
/// Outline glyphs stay within two ems in both directions.
const CELL_EMS: f32 = 2.0;

/// Extra pixels per cell side for a bitmap that straddles pixel boundaries
/// at a sub-pixel origin (one) and for hinting rounding its edges out (one).
const CELL_SLACK: u32 = 2;

/// A packed 8-bit grayscale glyph surface.
///
/// Pixel `(x, y)` is `pixels[y * width + x]`; each value is a coverage level
/// interpreted through the fixed grayscale ramp returned by `palette`.
#[derive(Clone, PartialEq, Eq)]
pub struct FontAtlas {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for FontAtlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAtlas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels_len", &self.pixels.len())
            .finish()
    }
}

impl FontAtlas {
    pub const BITS_PER_PIXEL: u32 = 8;

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel rows, `width` bytes each, no row padding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Coverage value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// The 256-entry grayscale ramp: index `i` maps to RGBA `(i, i, i, 255)`.
    pub fn palette() -> [[u8; 4]; 256] {
        std::array::from_fn(|i| {
            let v = i as u8;
            [v, v, v, 255]
        })
    }

    /// Expand the surface to RGBA through the grayscale ramp.
    pub fn to_rgba(&self) -> Vec<u8> {
        let palette = Self::palette();
        self.pixels
            .iter()
            .flat_map(|&value| palette[value as usize])
            .collect()
    }

    /// Consume the atlas and return its pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Builds a `FontAtlas` and its `GlyphTable` with an injected rasterizer.
///
/// The builder holds no state between builds; independent builds may run
/// with separate rasterizer instances concurrently.
pub struct AtlasBuilder<R: GlyphRasterizer> {
    rasterizer: R,
}

impl Default for AtlasBuilder<SwashRasterizer> {
    fn default() -> Self {
        Self::new(SwashRasterizer::default())
    }
}

impl<R: GlyphRasterizer> AtlasBuilder<R> {
    pub fn new(rasterizer: R) -> Self {
        Self { rasterizer }
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Rasterize every glyph of the requested charsets into a single atlas.
    ///
    /// # Arguments
    /// * `font` - Complete font file contents
    /// * `pixel_size` - Text height in pixels, ascent to descent
    /// * `flags` - Charsets to include (Latin is always included)
    ///
    /// # Returns
    /// The sealed atlas and glyph table, or the reason the build failed.
    pub fn build(
        &self,
        font: &[u8],
        pixel_size: f32,
        flags: CharsetFlags,
    ) -> Result<(FontAtlas, GlyphTable), FontLoadError> {
        if !self.rasterizer.init_font(font) {
            log::debug!("Rasterizer rejected {} bytes of font data", font.len());
            return Err(FontLoadError::InvalidFontData);
        }

        let ranges = resolve_ranges(flags);
        let glyph_count: u32 = ranges.iter().map(|range| range.count).sum();
        let ppem = self.rasterizer.pixels_per_em(font, pixel_size);
        let (width, height) = surface_size(ppem, glyph_count)
            .ok_or(FontLoadError::SurfaceAllocationFailed {
                width: 0,
                height: 0,
            })?;
        log::debug!(
            "Building {}x{} atlas for {} glyphs in {} ranges at {}px ({:.2} ppem)",
            width,
            height,
            glyph_count,
            ranges.len(),
            pixel_size,
            ppem
        );

        let mut pixels = allocate_surface(width, height)?;
        let mut entries = Vec::with_capacity(ranges.len());
        {
            let mut ctx = PackContext::new(&mut pixels, width, height);
            for range in ranges {
                let mut metrics = vec![GlyphMetrics::default(); range.count as usize];
                if let Err(e) =
                    self.rasterizer
                        .pack_range(&mut ctx, font, pixel_size, range, &mut metrics)
                {
                    log::debug!("Packing {} failed: {}", range, e);
                    return Err(FontLoadError::PackingFailed(range));
                }
                entries.push((range, metrics));
            }
        }

        Ok((
            FontAtlas {
                pixels,
                width,
                height,
            },
            GlyphTable::new(entries),
        ))
    }
}

/// Build an atlas with the bundled swash rasterizer.
pub fn build_atlas(
    font: &[u8],
    pixel_size: f32,
    flags: CharsetFlags,
) -> Result<(FontAtlas, GlyphTable), FontLoadError> {
    AtlasBuilder::default().build(font, pixel_size, flags)
}

/// Compute atlas dimensions large enough for `glyph_count` glyphs.
///
/// Every glyph is assumed to fit a square cell of `CELL_EMS` ems plus
/// `CELL_SLACK` and padding. Columns of cells are laid out in a near-square
/// grid; a shelf packer then fits at least one full row of cells per shelf,
/// so the surface holds every glyph that respects the cell bound.
///
/// Returns `None` for a non-finite or non-positive size.
fn surface_size(pixels_per_em: f32, glyph_count: u32) -> Option<(u32, u32)> {
    if !pixels_per_em.is_finite() || pixels_per_em <= 0.0 {
        return None;
    }
    let cell = (pixels_per_em * CELL_EMS).ceil().min(u32::MAX as f32) as u32;
    let cell = cell
        .saturating_add(CELL_SLACK)
        .saturating_add(PACK_PADDING);
    let glyph_count = glyph_count.max(1);

    let columns = (glyph_count as f64).sqrt().ceil() as u32;
    let width = columns.saturating_mul(cell);
    let rows = glyph_count.div_ceil(columns);
    let height = rows.saturating_mul(cell);
    Some((width, height))
}

/// Allocate a zeroed `width` x `height` surface.
fn allocate_surface(width: u32, height: u32) -> Result<Vec<u8>, FontLoadError> {
    let failed = FontLoadError::SurfaceAllocationFailed { width, height };
    if width == 0 || height == 0 || width > MAX_ATLAS_DIMENSION || height > MAX_ATLAS_DIMENSION {
        return Err(failed);
    }
    let len = width as usize * height as usize;
    let mut pixels = Vec::new();
    if pixels.try_reserve_exact(len).is_err() {
        log::warn!("Could not reserve {} bytes for the atlas surface", len);
        return Err(failed);
    }
    pixels.resize(len, 0);
    Ok(pixels)
}
