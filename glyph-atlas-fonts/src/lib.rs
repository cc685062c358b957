//! Glyph atlas construction and text measurement for glyph-atlas.
//!
//! This crate provides:
//! - A fixed registry of selectable charset ranges (Latin, Greek, Cyrillic)
//! - Atlas construction: one 8-bit grayscale surface packed with every glyph
//!   of every requested range
//! - A codepoint → glyph metrics table built alongside the atlas
//! - Left-to-right text measurement and centered glyph placement
//!
//! # Architecture
//!
//! `AtlasBuilder` drives the pipeline:
//! 1. `resolve_ranges` turns `CharsetFlags` into ordered codepoint ranges
//! 2. The surface is sized from a worst-case glyph cell and allocated once
//! 3. An injected `GlyphRasterizer` packs each range into the shared surface
//!
//! The resulting `FontAtlas` and `GlyphTable` are immutable and can be shared
//! across threads for lookup and layout.

pub mod atlas;
pub mod charset;
pub mod error;
pub mod glyph_table;
pub mod layout;
pub mod rasterizer;

// Re-export main types for convenience
pub use atlas::{AtlasBuilder, FontAtlas, MAX_ATLAS_DIMENSION, build_atlas};
pub use charset::{Charset, CharsetFlags, CodepointRange, resolve_ranges};
pub use error::{FontLoadError, PackError};
pub use glyph_table::{GlyphMetrics, GlyphTable};
pub use layout::{
    PlacedGlyph, TextExtent, TextLayout, centered_origin, codepoints, layout_text, measure_text,
};
pub use rasterizer::{GlyphRasterizer, PackContext, SwashRasterizer};
