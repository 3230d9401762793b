// this_file: crates/glyphpack-raster/src/shape.rs

//! String widths through harfrust
//!
//! Widths come from shaping, so pair widths include whatever the font's
//! `kern` and `GPOS` tables do to the pair.

use glyphpack_core::{
    error::{FontLoadError, Result},
    types::CodePoint,
};
use harfrust::{Direction, ShaperData, UnicodeBuffer};

use crate::font::FontFile;

/// Shapes strings with one face
pub struct WidthMeasurer {
    shaper_data: ShaperData,
}

impl WidthMeasurer {
    pub fn new(font: &FontFile) -> Result<Self> {
        let hr_font = harfrust::FontRef::from_index(font.data(), font.face_index())
            .map_err(|_| FontLoadError::InvalidData)?;
        Ok(Self {
            shaper_data: ShaperData::new(&hr_font),
        })
    }

    /// Advance of the shaped run in pixels at `size` pixels per em
    pub fn width(&self, font: &FontFile, code_points: &[CodePoint], size: f32) -> Result<f64> {
        let hr_font = harfrust::FontRef::from_index(font.data(), font.face_index())
            .map_err(|_| FontLoadError::InvalidData)?;
        let shaper = self
            .shaper_data
            .shaper(&hr_font)
            .point_size(Some(size))
            .build();

        let text: String = code_points.iter().filter_map(|&cp| char::from_u32(cp)).collect();
        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(&text);
        // Without a script the shaper skips kern and GPOS lookups
        buffer.guess_segment_properties();
        buffer.set_direction(Direction::LeftToRight);

        let output = shaper.shape(buffer, &[]);
        let units: i64 = output
            .glyph_positions()
            .iter()
            .map(|pos| i64::from(pos.x_advance))
            .sum();

        Ok(units as f64 * f64::from(size) / f64::from(font.units_per_em()))
    }
}
