// this_file: crates/glyphpack-core/src/traits.rs

//! The contract between glyphpack and whatever draws the glyphs
//!
//! Glyphpack never touches font outlines itself. A [`RenderingEngine`]
//! hands over finished rasters and string widths; everything after that
//! is pure data transformation. Tests plug in synthetic engines, the CLI
//! plugs in the outline rasterizer from `glyphpack-raster`.

use crate::{
    error::Result,
    types::{BoundingBox, CodePoint},
};

/// What an engine returns for one code point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterizedGlyph {
    /// Inked region in y-up pixel coordinates relative to the pen origin
    pub bbox: BoundingBox,
    /// Pixels the pen moves after drawing
    pub advance: i32,
    /// Row-major 8-bit alpha, top row first, `bbox.area()` samples
    pub raster: Vec<u8>,
}

/// Rasterizes glyphs and measures strings for the importer
///
/// Both calls must be deterministic for a given input; glyphpack never
/// retries them.
///
/// ```ignore
/// struct BlockEngine;
///
/// impl RenderingEngine for BlockEngine {
///     fn name(&self) -> &'static str {
///         "block"
///     }
///
///     fn rasterize(&self, _cp: CodePoint, size: f32) -> Result<Option<RasterizedGlyph>> {
///         let side = size as i32;
///         Ok(Some(RasterizedGlyph {
///             bbox: BoundingBox::new(0, 0, side - 1, side - 1),
///             advance: side + 1,
///             raster: vec![255; (side * side) as usize],
///         }))
///     }
///
///     fn measure_string_width(&self, cps: &[CodePoint], size: f32) -> Result<f64> {
///         Ok(cps.len() as f64 * (size as f64 + 1.0))
///     }
/// }
/// ```
pub trait RenderingEngine: Send + Sync {
    /// Used in logs and error messages
    fn name(&self) -> &'static str;

    /// Draws one code point at the given size
    ///
    /// Returns `None` when the engine has no glyph for the code point.
    /// An empty bounding box means the glyph exists but leaves no ink.
    fn rasterize(&self, code_point: CodePoint, point_size: f32)
        -> Result<Option<RasterizedGlyph>>;

    /// Width in pixels of the code points drawn as one string
    ///
    /// Pair widths include whatever kerning the engine applies, which is
    /// exactly what the kerning table builder is looking for.
    fn measure_string_width(&self, code_points: &[CodePoint], point_size: f32) -> Result<f64>;
}
