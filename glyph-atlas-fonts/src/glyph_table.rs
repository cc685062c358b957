//! Codepoint → glyph metrics lookup for a built atlas.

use crate::charset::CodepointRange;

/// Placement of one glyph inside the atlas plus its layout metrics.
///
/// The atlas rectangle is `[atlas_x0, atlas_x1) x [atlas_y0, atlas_y1)`.
/// Whitespace and glyphs without a bitmap have a zero-area rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    pub atlas_x0: i32,
    pub atlas_y0: i32,
    pub atlas_x1: i32,
    pub atlas_y1: i32,
    /// Horizontal offset of the bitmap from the pen position
    pub offset_x: f32,
    /// Vertical offset of the bitmap's top edge from the baseline (y grows down)
    pub offset_y: f32,
    /// Distance to move the pen after drawing this glyph
    pub advance_x: f32,
}

impl GlyphMetrics {
    /// Bitmap width in pixels.
    pub fn width(&self) -> i32 {
        self.atlas_x1 - self.atlas_x0
    }

    /// Bitmap height in pixels.
    pub fn height(&self) -> i32 {
        self.atlas_y1 - self.atlas_y0
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Whether the two atlas rectangles share any pixel.
    ///
    /// Zero-area rectangles never overlap anything.
    pub fn overlaps(&self, other: &GlyphMetrics) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.atlas_x0 < other.atlas_x1
            && other.atlas_x0 < self.atlas_x1
            && self.atlas_y0 < other.atlas_y1
            && other.atlas_y0 < self.atlas_y1
    }
}

/// Ordered table of `(range, metrics)` pairs built together with a `FontAtlas`.
///
/// Ranges are sorted by base codepoint and never overlap, and each range owns
/// exactly `range.count` metrics entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphTable {
    entries: Vec<(CodepointRange, Vec<GlyphMetrics>)>,
}

impl GlyphTable {
    /// Build a table from packed ranges.
    ///
    /// Entries are sorted by base codepoint here so lookup can binary search.
    pub(crate) fn new(mut entries: Vec<(CodepointRange, Vec<GlyphMetrics>)>) -> Self {
        entries.sort_by_key(|(range, _)| range.base);
        debug_assert!(
            entries
                .iter()
                .all(|(range, metrics)| metrics.len() == range.count as usize)
        );
        debug_assert!(entries.windows(2).all(|pair| !pair[0].0.overlaps(&pair[1].0)));
        Self { entries }
    }

    /// Find the metrics for a codepoint.
    ///
    /// Returns `None` for codepoints outside every configured range; callers
    /// skip such characters rather than treating them as errors.
    pub fn lookup(&self, codepoint: u32) -> Option<GlyphMetrics> {
        // Index of the first range whose base is greater than the codepoint;
        // the candidate is the one just before it.
        let idx = self
            .entries
            .partition_point(|(range, _)| range.base <= codepoint);
        let (range, metrics) = self.entries.get(idx.checked_sub(1)?)?;
        if !range.contains(codepoint) {
            return None;
        }
        metrics.get((codepoint - range.base) as usize).copied()
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.lookup(codepoint).is_some()
    }

    /// The ranges covered by this table, in ascending order.
    pub fn ranges(&self) -> impl Iterator<Item = CodepointRange> + '_ {
        self.entries.iter().map(|(range, _)| *range)
    }

    /// Iterate over every `(codepoint, metrics)` pair in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, GlyphMetrics)> + '_ {
        self.entries.iter().flat_map(|(range, metrics)| {
            range.codepoints().zip(metrics.iter().copied())
        })
    }

    /// Total number of glyphs in the table.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, metrics)| metrics.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
