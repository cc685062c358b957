//! Typed error types for glyph-atlas-fonts.
//!
//! `FontLoadError` is what callers of the atlas builder match on.
//! `PackError` is the narrower failure reported by a `GlyphRasterizer`
//! while packing a single range; the builder folds it into
//! `FontLoadError::PackingFailed`.

use thiserror::Error;

use crate::charset::CodepointRange;

/// Errors that abort an atlas build.
///
/// A build either produces a complete atlas and glyph table or one of these;
/// partial atlases are never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontLoadError {
    /// The rasterizer rejected the font bytes (corrupt or unsupported format).
    #[error("invalid font data: the rasterizer could not parse the font")]
    InvalidFontData,

    /// The computed atlas dimensions were invalid or the pixel buffer could
    /// not be allocated.
    #[error("atlas surface allocation failed for {width}x{height} pixels")]
    SurfaceAllocationFailed {
        /// Requested surface width in pixels
        width: u32,
        /// Requested surface height in pixels
        height: u32,
    },

    /// The glyphs of the named range did not fit into the atlas surface.
    #[error("glyph packing failed for range {0}")]
    PackingFailed(CodepointRange),
}

/// Failures a rasterizer reports from `GlyphRasterizer::pack_range`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// No room was left in the surface for the glyph of this codepoint.
    #[error("atlas surface is full, no space for U+{codepoint:04X}")]
    OutOfSpace {
        /// Codepoint whose bitmap could not be placed
        codepoint: u32,
    },

    /// The font could not be parsed while packing.
    #[error("font could not be parsed")]
    InvalidFont,

    /// The destination metrics slice does not match the range length.
    #[error("metrics buffer holds {actual} entries, range needs {expected}")]
    MetricsLength {
        /// Number of codepoints in the range
        expected: usize,
        /// Length of the slice supplied by the caller
        actual: usize,
    },
}
