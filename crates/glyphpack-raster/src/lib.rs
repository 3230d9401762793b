// this_file: crates/glyphpack-raster/src/lib.rs

//! Glyphpack Raster: a rendering engine for outline fonts
//!
//! [`OutlineEngine`] feeds the importer from a TrueType or OpenType face:
//! skrifa extracts and scales the outline, zeno fills it with 256 levels
//! of coverage, and harfrust shapes the strings whose widths drive the
//! kerning table. Installed fonts can be found by PostScript name through
//! fontdb.
//!
//! ```rust,no_run
//! use glyphpack_core::{Font, ImportParams};
//! use glyphpack_raster::OutlineEngine;
//!
//! let engine = OutlineEngine::from_file("NotoSans-Regular.ttf")?;
//! let font = Font::import(&engine, &[0x41, 0x42], &ImportParams::default())?;
//! # Ok::<(), glyphpack_core::GlyphpackError>(())
//! ```

pub mod font;
pub mod raster;
pub mod shape;
pub mod system;

use std::path::Path;

use glyphpack_core::{
    error::{ConfigError, Result},
    traits::{RasterizedGlyph, RenderingEngine},
    types::{AlphaBits, CodePoint},
};
use skrifa::{
    instance::{LocationRef, Size},
    MetadataProvider,
};

pub use font::FontFile;
pub use system::{find_system_font, list_system_fonts, SystemFace};

pub(crate) const ENGINE_NAME: &str = "outline";

/// Renders glyphs of one face
pub struct OutlineEngine {
    font: FontFile,
    measurer: shape::WidthMeasurer,
    alpha_bits: AlphaBits,
}

impl OutlineEngine {
    pub fn new(font: FontFile) -> Result<Self> {
        let measurer = shape::WidthMeasurer::new(&font)?;
        Ok(Self {
            font,
            measurer,
            alpha_bits: AlphaBits::Four,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(FontFile::from_file(path)?)
    }

    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::new(FontFile::from_data(data)?)
    }

    /// Installed face by PostScript name
    pub fn from_system(post_script_name: &str) -> Result<Self> {
        Self::new(find_system_font(post_script_name)?)
    }

    /// Depth used to decide which border pixels count as ink
    pub fn with_alpha_bits(mut self, alpha_bits: AlphaBits) -> Self {
        self.alpha_bits = alpha_bits;
        self
    }

    pub fn font(&self) -> &FontFile {
        &self.font
    }
}

fn check_size(point_size: f32) -> Result<()> {
    if point_size.is_finite() && point_size > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidPointSize(point_size).into())
    }
}

impl RenderingEngine for OutlineEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn rasterize(&self, code_point: CodePoint, point_size: f32) -> Result<Option<RasterizedGlyph>> {
        check_size(point_size)?;
        let Some(glyph_id) = self.font.glyph_id(code_point) else {
            return Ok(None);
        };
        let font = self.font.skrifa()?;

        let Some(coverage) = raster::rasterize(&font, glyph_id, point_size)? else {
            return Ok(None);
        };
        let (bbox, raster) = coverage.trim(self.alpha_bits);

        let advance = font
            .glyph_metrics(Size::new(point_size), LocationRef::default())
            .advance_width(glyph_id)
            .unwrap_or(0.0)
            .round() as i32;

        log::trace!(
            "U+{:04X} -> glyph {}: {}x{} advance {}",
            code_point,
            glyph_id.to_u32(),
            bbox.width(),
            bbox.height(),
            advance
        );
        Ok(Some(RasterizedGlyph {
            bbox,
            advance,
            raster,
        }))
    }

    fn measure_string_width(&self, code_points: &[CodePoint], point_size: f32) -> Result<f64> {
        check_size(point_size)?;
        self.measurer.width(&self.font, code_points, point_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data() {
        assert!(OutlineEngine::from_data(vec![0; 64]).is_err());
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(12.0).is_ok());
        assert!(check_size(0.0).is_err());
        assert!(check_size(f32::NAN).is_err());
    }
}
