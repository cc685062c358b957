//! Registry of the charset ranges an atlas can be built for.
//!
//! Every selectable charset maps to one fixed, contiguous codepoint range.
//! The ranges never overlap and are resolved in ascending base order, which
//! is also the order `GlyphTable` relies on for lookup.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

/// A contiguous span of Unicode codepoints: `[base, base + count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodepointRange {
    /// First codepoint of the range
    pub base: u32,
    /// Number of codepoints in the range
    pub count: u32,
}

impl CodepointRange {
    pub const fn new(base: u32, count: u32) -> Self {
        Self { base, count }
    }

    /// One past the last codepoint of the range.
    pub const fn end(&self) -> u32 {
        self.base + self.count
    }

    pub const fn contains(&self, codepoint: u32) -> bool {
        codepoint >= self.base && codepoint < self.end()
    }

    /// Whether the two ranges share at least one codepoint.
    pub const fn overlaps(&self, other: &CodepointRange) -> bool {
        self.base < other.end() && other.base < self.end()
    }

    /// Iterate over every codepoint in the range.
    pub fn codepoints(&self) -> std::ops::Range<u32> {
        self.base..self.end()
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            write!(f, "U+{:04X} (empty)", self.base)
        } else {
            write!(f, "U+{:04X}-U+{:04X}", self.base, self.end() - 1)
        }
    }
}

/// Basic Latin, Latin-1 Supplement, Latin Extended-A and Extended-B.
pub const LATIN_RANGE: CodepointRange = CodepointRange::new(0x0000, 0x0250);
/// Greek and Coptic.
pub const GREEK_RANGE: CodepointRange = CodepointRange::new(0x0370, 0x0090);
/// Cyrillic.
pub const CYRILLIC_RANGE: CodepointRange = CodepointRange::new(0x0400, 0x0100);

bitflags! {
    /// Charsets requested for an atlas build.
    ///
    /// Latin is always part of the atlas whether or not its bit is set.
    /// Unknown bits are kept but have no effect, so flags produced by newer
    /// callers still resolve.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CharsetFlags: u32 {
        const LATIN = 1 << 0;
        const CYRILLIC = 1 << 1;
        const GREEK = 1 << 2;
    }
}

/// A single selectable charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Latin,
    Greek,
    Cyrillic,
}

impl Charset {
    /// All charsets in resolution order (ascending base codepoint).
    pub const ALL: [Charset; 3] = [Charset::Latin, Charset::Greek, Charset::Cyrillic];

    pub const fn flag(self) -> CharsetFlags {
        match self {
            Charset::Latin => CharsetFlags::LATIN,
            Charset::Greek => CharsetFlags::GREEK,
            Charset::Cyrillic => CharsetFlags::CYRILLIC,
        }
    }

    pub const fn range(self) -> CodepointRange {
        match self {
            Charset::Latin => LATIN_RANGE,
            Charset::Greek => GREEK_RANGE,
            Charset::Cyrillic => CYRILLIC_RANGE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Charset::Latin => "latin",
            Charset::Greek => "greek",
            Charset::Cyrillic => "cyrillic",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Charset::ALL
            .into_iter()
            .find(|charset| charset.name() == lowered)
            .ok_or_else(|| format!("unknown charset '{s}' (expected latin, greek or cyrillic)"))
    }
}

impl FromIterator<Charset> for CharsetFlags {
    fn from_iter<I: IntoIterator<Item = Charset>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CharsetFlags::empty(), |flags, charset| flags | charset.flag())
    }
}

/// Resolve charset flags into the ordered list of ranges to rasterize.
///
/// Latin is always first; Greek and Cyrillic follow when requested.
pub fn resolve_ranges(flags: CharsetFlags) -> Vec<CodepointRange> {
    Charset::ALL
        .into_iter()
        .filter(|&charset| charset == Charset::Latin || flags.contains(charset.flag()))
        .map(Charset::range)
        .collect()
}
