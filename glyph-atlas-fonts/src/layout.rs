//! Single-line, left-to-right text measurement and placement.
//!
//! Codepoints missing from the glyph table are skipped: they neither advance
//! the pen nor contribute height, and no fallback glyph is drawn for them.

use crate::glyph_table::{GlyphMetrics, GlyphTable};

/// Bounding box of a laid-out line of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: i32,
    pub height: i32,
}

/// A glyph positioned on the target surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub codepoint: u32,
    /// Left edge of the bitmap on the target surface
    pub x: i32,
    /// Top edge of the bitmap on the target surface
    pub y: i32,
    /// Source metrics, including the atlas rectangle to copy from
    pub metrics: GlyphMetrics,
}

/// Result of laying out a line centered in a target area.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayout {
    pub extent: TextExtent,
    /// Top-left corner of the text box on the target surface
    pub origin: (i32, i32),
    pub glyphs: Vec<PlacedGlyph>,
}

/// Convert UTF-8 text into the codepoint sequence layout operates on.
pub fn codepoints(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

/// Measure a line of text.
///
/// Width is the sum of the advances of every glyph found in the table,
/// accumulated as `f32` and truncated once at the end. Height is the tallest
/// bitmap among those glyphs.
pub fn measure_text(table: &GlyphTable, codepoints: &[u32]) -> TextExtent {
    let mut pen_x = 0.0f32;
    let mut max_height = 0;
    for metrics in codepoints.iter().filter_map(|&cp| table.lookup(cp)) {
        pen_x += metrics.advance_x;
        max_height = max_height.max(metrics.height());
    }
    TextExtent {
        width: pen_x as i32,
        height: max_height,
    }
}

/// Top-left corner that centers `extent` inside a `target_width` x `target_height` area.
pub fn centered_origin(extent: TextExtent, target_width: i32, target_height: i32) -> (i32, i32) {
    (
        target_width / 2 - extent.width / 2,
        target_height / 2 - extent.height / 2,
    )
}

/// Measure, center and position every drawable glyph of a line.
///
/// Each glyph lands at `(origin_x + pen_x + offset_x, origin_y + offset_y)`,
/// where `pen_x` is the running advance of the glyphs before it.
pub fn layout_text(
    table: &GlyphTable,
    codepoints: &[u32],
    target_width: i32,
    target_height: i32,
) -> TextLayout {
    let extent = measure_text(table, codepoints);
    let origin = centered_origin(extent, target_width, target_height);

    let mut pen_x = 0.0f32;
    let mut glyphs = Vec::with_capacity(codepoints.len());
    for &codepoint in codepoints {
        let Some(metrics) = table.lookup(codepoint) else {
            continue;
        };
        glyphs.push(PlacedGlyph {
            codepoint,
            x: origin.0 + pen_x as i32 + metrics.offset_x.round() as i32,
            y: origin.1 + metrics.offset_y.round() as i32,
            metrics,
        });
        pen_x += metrics.advance_x;
    }

    TextLayout {
        extent,
        origin,
        glyphs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CodepointRange;

    /// Latin-only table where glyph `cp` is `cp % 7 + 1` pixels tall and
    /// advances `cp % 5 + 0.5` pixels.
    fn latin_table() -> GlyphTable {
        let range = CodepointRange::new(0, 0x250);
        let metrics = range
            .codepoints()
            .map(|cp| GlyphMetrics {
                atlas_x0: 0,
                atlas_y0: 0,
                atlas_x1: 3,
                atlas_y1: (cp % 7 + 1) as i32,
                offset_x: 1.0,
                offset_y: -2.0,
                advance_x: (cp % 5) as f32 + 0.5,
            })
            .collect();
        GlyphTable::new(vec![(range, metrics)])
    }

    #[test]
    fn test_empty_input_measures_zero() {
        let table = latin_table();
        assert_eq!(measure_text(&table, &[]), TextExtent::default());
    }

    #[test]
    fn test_sum_of_advances_and_max_height() {
        let table = latin_table();
        let text = [0x48, 0x49, 0x21];
        let expected_width: f32 = text
            .iter()
            .map(|&cp| table.lookup(cp).unwrap().advance_x)
            .sum();
        let expected_height = text
            .iter()
            .map(|&cp| table.lookup(cp).unwrap().height())
            .max()
            .unwrap();
        let extent = measure_text(&table, &text);
        assert_eq!(extent.width, expected_width as i32);
        assert_eq!(extent.height, expected_height);
    }

    #[test]
    fn test_missing_codepoints_are_skipped() {
        let table = latin_table();
        let with_cyrillic = [0x48, 0x410, 0x49];
        assert_eq!(
            measure_text(&table, &with_cyrillic),
            measure_text(&table, &[0x48, 0x49])
        );
        assert_eq!(measure_text(&table, &[0x410, 0x411]), TextExtent::default());
    }

    #[test]
    fn test_width_is_monotonic() {
        let table = latin_table();
        let mut text = Vec::new();
        let mut previous = 0;
        for cp in 0x20..0x7F {
            text.push(cp);
            let width = measure_text(&table, &text).width;
            assert!(width >= previous, "width shrank at U+{cp:04X}");
            previous = width;
        }
    }

    #[test]
    fn test_centered_origin() {
        let extent = TextExtent {
            width: 100,
            height: 20,
        };
        assert_eq!(centered_origin(extent, 1024, 256), (462, 118));
    }

    #[test]
    fn test_layout_positions_follow_running_advance() {
        let table = latin_table();
        let text = codepoints("HI!");
        let layout = layout_text(&table, &text, 200, 100);
        assert_eq!(layout.glyphs.len(), 3);

        let mut pen = 0.0f32;
        for glyph in &layout.glyphs {
            assert_eq!(glyph.x, layout.origin.0 + pen as i32 + 1);
            assert_eq!(glyph.y, layout.origin.1 - 2);
            pen += glyph.metrics.advance_x;
        }
    }

    #[test]
    fn test_layout_skips_unsupported_characters() {
        let table = latin_table();
        let layout = layout_text(&table, &codepoints("AЖB"), 200, 100);
        let placed: Vec<u32> = layout.glyphs.iter().map(|g| g.codepoint).collect();
        assert_eq!(placed, vec![0x41, 0x42]);
    }

    #[test]
    fn test_codepoints_decodes_utf8() {
        assert_eq!(codepoints("aЖ€"), vec![0x61, 0x416, 0x20AC]);
        assert!(codepoints("").is_empty());
    }
}
