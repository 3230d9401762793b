// this_file: crates/glyphpack-core/src/kerning.rs

//! Kerning table builder
//!
//! A pair is kerned when drawing it as one string comes out narrower than
//! drawing its two glyphs apart. The deficit, floored to whole pixels, is
//! the kerning value.

use crate::{
    error::Result,
    font::Font,
    traits::RenderingEngine,
    types::{CodePoint, CodePointPair, Glyph, KerningPair},
};

/// Measures candidate pairs through a rendering engine
///
/// Consecutive candidates sharing a left (or right) code point reuse the
/// width measured for it, so a candidate list grouped by left glyph costs
/// one single-glyph measurement per group instead of one per pair.
pub struct KerningBuilder<'a> {
    engine: &'a dyn RenderingEngine,
    point_size: f32,
}

/// Last single-glyph measurement on one side of the pair
#[derive(Clone, Copy)]
struct Measured {
    code_point: CodePoint,
    width: f64,
}

impl<'a> KerningBuilder<'a> {
    pub fn new(engine: &'a dyn RenderingEngine, point_size: f32) -> Self {
        Self { engine, point_size }
    }

    /// Every ordered pair of glyphs, left-major
    pub fn all_pairs(glyphs: &[Glyph]) -> Vec<CodePointPair> {
        let mut pairs = Vec::with_capacity(glyphs.len() * glyphs.len());
        for left in glyphs {
            for right in glyphs {
                pairs.push(CodePointPair::new(left.code_point(), right.code_point()));
            }
        }
        pairs
    }

    /// Keeps the candidates with at least one pixel of kerning, in input order
    ///
    /// Candidates naming a code point the font has no glyph for are skipped.
    pub fn build(&self, font: &Font, candidates: &[CodePointPair]) -> Result<Vec<KerningPair>> {
        let mut left: Option<Measured> = None;
        let mut right: Option<Measured> = None;
        let mut pairs = Vec::new();
        let mut skipped = 0usize;

        for candidate in candidates {
            if font.glyph_for_code_point(candidate.left).is_none()
                || font.glyph_for_code_point(candidate.right).is_none()
            {
                skipped += 1;
                continue;
            }

            let left_width = self.single_width(&mut left, candidate.left)?;
            let right_width = self.single_width(&mut right, candidate.right)?;
            let pair_width = self
                .engine
                .measure_string_width(&[candidate.left, candidate.right], self.point_size)?;

            if let Some(kern) = kerning_from_widths(left_width, right_width, pair_width) {
                log::trace!(
                    "Kerning U+{:04X} U+{:04X}: {}",
                    candidate.left,
                    candidate.right,
                    kern
                );
                pairs.push(KerningPair {
                    code_points: *candidate,
                    kern,
                });
            }
        }

        if skipped > 0 {
            log::warn!("Skipped {} kerning candidates naming glyphs the font lacks", skipped);
        }
        log::debug!(
            "Kept {} of {} kerning candidates at {}pt",
            pairs.len(),
            candidates.len(),
            self.point_size
        );
        Ok(pairs)
    }

    fn single_width(&self, memo: &mut Option<Measured>, code_point: CodePoint) -> Result<f64> {
        match memo {
            Some(m) if m.code_point == code_point => Ok(m.width),
            _ => {
                let width = self
                    .engine
                    .measure_string_width(&[code_point], self.point_size)?;
                *memo = Some(Measured { code_point, width });
                Ok(width)
            },
        }
    }
}

/// Whole pixels a pair loses when drawn together, if at least one
pub fn kerning_from_widths(left: f64, right: f64, pair: f64) -> Option<i32> {
    let kerning = left + right - pair;
    if kerning >= 1.0 {
        Some(kerning.floor() as i32)
    } else {
        None
    }
}
