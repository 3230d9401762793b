// this_file: crates/glyphpack-core/src/error.rs

//! Error types for glyphpack

use thiserror::Error;

use crate::types::CodePoint;

pub type Result<T> = std::result::Result<T, GlyphpackError>;

/// Main error type for glyphpack
#[derive(Debug, Error)]
pub enum GlyphpackError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid font data: {0}")]
    Data(#[from] DataError),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Rendering engine {engine} failed: {message}")]
    Engine {
        engine: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems with how the encoder was set up, detected before any output
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Alpha bit depth {0} is not supported by the pixel codec")]
    UnsupportedAlphaBits(u8),

    #[error("Alpha bit depth {0} is not one of 1, 2, 4, 8")]
    InvalidAlphaBits(u8),

    #[error("Font has no glyphs")]
    NoGlyphs,

    #[error("Invalid charset range: {0:?}")]
    InvalidCharsetRange(String),

    #[error("Invalid point size: {0}")]
    InvalidPointSize(f32),
}

/// Per-item validity problems that abort the whole encode
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Kerning for U+{left:04X} U+{right:04X} is {kern}, outside 1..=255")]
    KerningOutOfRange {
        left: CodePoint,
        right: CodePoint,
        kern: i32,
    },

    #[error("Glyph U+{code_point:04X} has an empty bounding box")]
    EmptyBoundingBox { code_point: CodePoint },

    #[error("Glyph U+{code_point:04X} raster holds {actual} samples, bounding box needs {expected}")]
    RasterSizeMismatch {
        code_point: CodePoint,
        expected: usize,
        actual: usize,
    },

    #[error("Code point U+{code_point:04X} does not fit a {width}-byte field")]
    CodePointTooWide { code_point: CodePoint, width: usize },

    #[error("Code point U+{code_point:04X} appears more than once")]
    DuplicateCodePoint { code_point: CodePoint },

    #[error("{0} glyphs exceed the 16-bit glyph count")]
    TooManyGlyphs(usize),

    #[error("{0} kerning pairs exceed the 16-bit pair count")]
    TooManyKerningPairs(usize),

    #[error("Glyph data offset {0} does not fit in 3 bytes")]
    OffsetOverflow(usize),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("No installed font with PostScript name {0}")]
    NameNotFound(String),
}

/// Errors reading an encoded font blob back
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Blob truncated in {section}: needed {needed} bytes, {available} left")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Unknown format version 0x{0:04X}")]
    UnknownVersion(u16),

    #[error("Header field {field} has invalid value {value}")]
    InvalidField { field: &'static str, value: u32 },

    #[error("Glyph data for U+{code_point:04X} does not cover {pixels} pixels")]
    ShortGlyphData { code_point: CodePoint, pixels: usize },
}
