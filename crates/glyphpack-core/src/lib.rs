// this_file: crates/glyphpack-core/src/lib.rs

//! Glyphpack Core: rasterized glyphs in, font model out
//!
//! This crate holds everything the encoder needs to know about a font
//! before a single byte is written: the glyph model, the font-wide metric
//! reductions, the kerning table builder, and the contract a text
//! rendering engine must honour to feed all of it.
//!
//! ## The flow
//!
//! 1. **Import** - a [`RenderingEngine`] rasterizes each requested code point
//! 2. **Model** - glyphs are collected into a [`Font`] in request order
//! 3. **Kerning** - pair widths are measured and the deficits kept
//! 4. **Metrics** - font-wide extents and heuristics are derived
//!
//! The byte layout itself lives in `glyphpack-encode`.
//!
//! ```rust,no_run
//! use glyphpack_core::{charset, Font, ImportParams, RenderingEngine};
//!
//! # fn engine() -> Box<dyn RenderingEngine> { unimplemented!() }
//! let engine = engine();
//! let code_points = charset::parse_charset_spec(charset::DEFAULT_CHARSET)?;
//! let params = ImportParams::default();
//!
//! let mut font = Font::import(engine.as_ref(), &code_points, &params)?;
//! font.generate_kerning_pairs(engine.as_ref(), params.point_size, None)?;
//! # Ok::<(), glyphpack_core::GlyphpackError>(())
//! ```

pub mod charset;
pub mod error;
pub mod font;
pub mod kerning;
pub mod metrics;
pub mod traits;

pub use error::{GlyphpackError, Result};
pub use font::Font;
pub use metrics::{FontExtents, GlobalMetrics};
pub use traits::{RasterizedGlyph, RenderingEngine};

/// The plain values that flow from import to encoding
pub mod types {
    use crate::error::{ConfigError, DataError, Result};

    /// A Unicode scalar value as stored in the font
    pub type CodePoint = u32;

    /// Inclusive pixel rectangle in y-up coordinates
    ///
    /// A box is empty when `x_min > x_max` or `y_min > y_max`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BoundingBox {
        pub x_min: i32,
        pub y_min: i32,
        pub x_max: i32,
        pub y_max: i32,
    }

    impl BoundingBox {
        pub const fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
            Self {
                x_min,
                y_min,
                x_max,
                y_max,
            }
        }

        pub fn is_empty(&self) -> bool {
            self.x_min > self.x_max || self.y_min > self.y_max
        }

        /// Whether `other` lies entirely inside this box
        pub fn contains(&self, other: &BoundingBox) -> bool {
            other.x_min >= self.x_min
                && other.x_max <= self.x_max
                && other.y_min >= self.y_min
                && other.y_max <= self.y_max
        }

        /// Smallest box covering both
        ///
        /// Empty boxes are the identity, so folding a sequence gives the same
        /// result in any order.
        pub fn expand(&self, other: &BoundingBox) -> BoundingBox {
            if other.is_empty() || self.contains(other) {
                return *self;
            }
            if self.is_empty() || other.contains(self) {
                return *other;
            }
            BoundingBox {
                x_min: self.x_min.min(other.x_min),
                y_min: self.y_min.min(other.y_min),
                x_max: self.x_max.max(other.x_max),
                y_max: self.y_max.max(other.y_max),
            }
        }

        /// Columns covered, 0 for an empty box, `u32::MAX` if it does not fit
        pub fn width(&self) -> u32 {
            self.column_count().unwrap_or(u32::MAX)
        }

        /// Rows covered, 0 for an empty box, `u32::MAX` if it does not fit
        pub fn height(&self) -> u32 {
            self.row_count().unwrap_or(u32::MAX)
        }

        /// Number of raster samples the box needs, `None` when the box
        /// spans more than a `u32` in either direction
        pub fn checked_area(&self) -> Option<usize> {
            let columns = usize::try_from(self.column_count()?).ok()?;
            let rows = usize::try_from(self.row_count()?).ok()?;
            columns.checked_mul(rows)
        }

        /// Number of raster samples the box needs, saturating
        pub fn area(&self) -> usize {
            self.checked_area().unwrap_or(usize::MAX)
        }

        fn column_count(&self) -> Option<u32> {
            span(self.x_min, self.x_max)
        }

        fn row_count(&self) -> Option<u32> {
            span(self.y_min, self.y_max)
        }
    }

    fn span(min: i32, max: i32) -> Option<u32> {
        if min > max {
            return Some(0);
        }
        u32::try_from(i64::from(max) - i64::from(min) + 1).ok()
    }

    /// One rasterized glyph, immutable once built
    ///
    /// The raster is row-major, one 8-bit alpha sample per pixel, row 0 being
    /// the visual top (`y_max`). 0 is background, 255 is full ink.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Glyph {
        code_point: CodePoint,
        bbox: BoundingBox,
        advance: i32,
        raster: Vec<u8>,
    }

    impl Glyph {
        /// Builds a glyph, checking the raster covers the bounding box exactly
        pub fn new(
            code_point: CodePoint,
            bbox: BoundingBox,
            advance: i32,
            raster: Vec<u8>,
        ) -> Result<Self> {
            let expected = bbox.checked_area();
            if expected != Some(raster.len()) {
                return Err(DataError::RasterSizeMismatch {
                    code_point,
                    expected: expected.unwrap_or(usize::MAX),
                    actual: raster.len(),
                }
                .into());
            }
            Ok(Self {
                code_point,
                bbox,
                advance,
                raster,
            })
        }

        pub fn code_point(&self) -> CodePoint {
            self.code_point
        }

        pub fn bounding_box(&self) -> &BoundingBox {
            &self.bbox
        }

        pub fn advance(&self) -> i32 {
            self.advance
        }

        pub fn raster(&self) -> &[u8] {
            &self.raster
        }

        /// Raster rows from top to bottom
        pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
            let width = (self.bbox.width() as usize).max(1);
            self.raster.chunks(width)
        }
    }

    /// Opacity resolution of the encoded pixels
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum AlphaBits {
        /// No antialiasing
        One,
        /// 4 shades
        Two,
        /// 16 shades
        Four,
        /// 256 shades
        Eight,
    }

    impl AlphaBits {
        pub fn bits(self) -> u8 {
            match self {
                AlphaBits::One => 1,
                AlphaBits::Two => 2,
                AlphaBits::Four => 4,
                AlphaBits::Eight => 8,
            }
        }

        pub fn shades(self) -> u32 {
            1 << self.bits()
        }

        /// Nearest level at this depth for an 8-bit sample
        ///
        /// At 4 bits this is `(sample + 8) / 17`; 255 is odd so there are
        /// never ties.
        pub fn quantize(self, sample: u8) -> u8 {
            let max = self.shades() - 1;
            ((u32::from(sample) * max + 127) / 255) as u8
        }
    }

    impl TryFrom<u8> for AlphaBits {
        type Error = ConfigError;

        fn try_from(bits: u8) -> std::result::Result<Self, Self::Error> {
            match bits {
                1 => Ok(AlphaBits::One),
                2 => Ok(AlphaBits::Two),
                4 => Ok(AlphaBits::Four),
                8 => Ok(AlphaBits::Eight),
                other => Err(ConfigError::InvalidAlphaBits(other)),
            }
        }
    }

    /// Width of every code point field in the encoded font
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Charset {
        /// All code points below 256, one byte each
        Ascii,
        /// At least one code point at or above 256, two bytes each
        Utf8,
    }

    impl Charset {
        /// Picks the narrowest charset covering every code point
        pub fn for_code_points(code_points: impl IntoIterator<Item = CodePoint>) -> Self {
            if code_points.into_iter().any(|cp| cp >= 256) {
                Charset::Utf8
            } else {
                Charset::Ascii
            }
        }

        /// Bytes per code point field
        pub fn code_point_width(self) -> usize {
            match self {
                Charset::Ascii => 1,
                Charset::Utf8 => 2,
            }
        }
    }

    /// Left and right code point of a kerning candidate
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CodePointPair {
        pub left: CodePoint,
        pub right: CodePoint,
    }

    impl CodePointPair {
        pub const fn new(left: CodePoint, right: CodePoint) -> Self {
            Self { left, right }
        }
    }

    /// A retained pair and how many pixels to pull the right glyph closer
    ///
    /// Only 1..=255 can be encoded; anything else fails at encode time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KerningPair {
        pub code_points: CodePointPair,
        pub kern: i32,
    }

    impl KerningPair {
        pub const fn new(left: CodePoint, right: CodePoint, kern: i32) -> Self {
            Self {
                code_points: CodePointPair::new(left, right),
                kern,
            }
        }
    }
}

use types::AlphaBits;

/// How glyphs should be imported from a rendering engine
#[derive(Debug, Clone)]
pub struct ImportParams {
    pub point_size: f32,
    pub alpha_bits: AlphaBits,
}

impl Default for ImportParams {
    fn default() -> Self {
        Self {
            point_size: 16.0,
            alpha_bits: AlphaBits::Four,
        }
    }
}
