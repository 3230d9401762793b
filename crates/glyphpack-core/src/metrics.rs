// this_file: crates/glyphpack-core/src/metrics.rs

//! Font-wide metrics derived from the glyph set
//!
//! The reductions here are pure: they look at glyphs and numbers and never
//! at the byte layout. The two heuristics ([`line_gap`] and
//! [`default_space_advance`]) are format policy and kept as free functions
//! so they can be tested and swapped on their own.

use crate::{
    error::{ConfigError, Result},
    font::Font,
    types::{BoundingBox, CodePoint, Glyph},
};

/// Glyph whose advance stands in for the width of a space
pub const SPACE_REFERENCE: CodePoint = 'i' as CodePoint;

/// Extremes over every glyph in a font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontExtents {
    /// Smallest box containing every glyph box
    pub bounding_box: BoundingBox,
    pub min_advance: i32,
    pub max_advance: i32,
    /// How far ink can reach past the advance, never below 0
    pub max_right_overhang: i32,
}

impl FontExtents {
    /// Folds the glyphs into font-wide extents, `None` for no glyphs
    pub fn from_glyphs<'a>(glyphs: impl IntoIterator<Item = &'a Glyph>) -> Option<Self> {
        let mut glyphs = glyphs.into_iter();
        let first = glyphs.next()?;

        let mut extents = FontExtents {
            bounding_box: *first.bounding_box(),
            min_advance: first.advance(),
            max_advance: first.advance(),
            max_right_overhang: right_overhang(first).max(0),
        };
        for glyph in glyphs {
            extents.bounding_box = extents.bounding_box.expand(glyph.bounding_box());
            extents.min_advance = extents.min_advance.min(glyph.advance());
            extents.max_advance = extents.max_advance.max(glyph.advance());
            extents.max_right_overhang = extents.max_right_overhang.max(right_overhang(glyph));
        }
        Some(extents)
    }
}

fn right_overhang(glyph: &Glyph) -> i32 {
    glyph.advance() - glyph.bounding_box().x_max + 1
}

/// Extra spacing between lines
///
/// Whichever is larger: the part of the tallest box that does not fit in
/// the ascent/descent span, or a fifth of that span.
pub fn line_gap(max_box_height: i32, ascent: i32, descent: i32) -> i32 {
    let span = ascent - descent;
    let overflow = max_box_height - span;
    let proportional = (0.2 * f64::from(span)).round() as i32;
    overflow.max(proportional)
}

/// Advance to use for characters the font has no glyph for
///
/// The advance of `'i'` approximates a space in Latin fonts. Fonts without
/// it fall back to half the ascent. This is a heuristic, not a measurement.
pub fn default_space_advance(reference_advance: Option<i32>, ascent: i32) -> i32 {
    reference_advance.unwrap_or(ascent / 2)
}

/// Every signed font-wide value written to the global metrics section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalMetrics {
    pub extents: FontExtents,
    pub ascent: i32,
    pub descent: i32,
    pub line_gap: i32,
    pub default_space_advance: i32,
}

impl GlobalMetrics {
    /// Computes the global metrics of a font with at least one glyph
    pub fn compute(font: &Font) -> Result<Self> {
        let extents = FontExtents::from_glyphs(font.glyphs()).ok_or(ConfigError::NoGlyphs)?;
        let max_box_height = extents.bounding_box.height() as i32;
        let reference = font
            .glyph_for_code_point(SPACE_REFERENCE)
            .map(Glyph::advance);

        Ok(Self {
            extents,
            ascent: font.ascent(),
            descent: font.descent(),
            line_gap: line_gap(max_box_height, font.ascent(), font.descent()),
            default_space_advance: default_space_advance(reference, font.ascent()),
        })
    }

    /// The values in the order they are written
    pub fn signed_fields(&self) -> [i32; 11] {
        let bbox = self.extents.bounding_box;
        [
            bbox.x_min,
            bbox.y_min,
            bbox.x_max,
            bbox.y_max,
            self.ascent,
            self.descent,
            self.line_gap,
            self.extents.min_advance,
            self.extents.max_advance,
            self.extents.max_right_overhang,
            self.default_space_advance,
        ]
    }
}
