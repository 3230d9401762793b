// this_file: crates/glyphpack-core/src/font.rs

//! The font model handed to the encoder

use std::collections::HashMap;

use crate::{
    charset,
    error::{ConfigError, DataError, Result},
    kerning::KerningBuilder,
    traits::RenderingEngine,
    types::{AlphaBits, Charset, CodePoint, CodePointPair, Glyph, KerningPair},
    ImportParams,
};

/// Glyph whose top edge defines the ascent
const ASCENT_REFERENCE: CodePoint = 'd' as CodePoint;
/// Glyph whose bottom edge defines the descent
const DESCENT_REFERENCE: CodePoint = 'p' as CodePoint;

/// An ordered set of glyphs plus the font-wide facts about them
///
/// Glyph order is insertion order and is kept all the way into the
/// encoded tables. Kerning pairs are filled in by a second pass over the
/// finished glyph set; after that the font is only read.
#[derive(Debug, Clone)]
pub struct Font {
    glyphs: Vec<Glyph>,
    index: HashMap<CodePoint, usize>,
    kerning_pairs: Vec<KerningPair>,
    alpha_bits: AlphaBits,
    charset: Charset,
    ascent: i32,
    descent: i32,
}

impl Font {
    /// Collects glyphs into a font
    ///
    /// Ascent is the top of `'d'` and descent the bottom of `'p'` minus one;
    /// either is 0 when its reference glyph is missing. Use
    /// [`Font::set_vertical_metrics`] to override.
    pub fn new(glyphs: Vec<Glyph>, alpha_bits: AlphaBits) -> Result<Self> {
        let mut index = HashMap::with_capacity(glyphs.len());
        for (i, glyph) in glyphs.iter().enumerate() {
            if index.insert(glyph.code_point(), i).is_some() {
                return Err(DataError::DuplicateCodePoint {
                    code_point: glyph.code_point(),
                }
                .into());
            }
        }

        if glyphs
            .windows(2)
            .any(|w| w[0].code_point() > w[1].code_point())
        {
            log::warn!("Glyphs are not in ascending code point order; lookups by binary search will miss");
        }

        let charset = Charset::for_code_points(glyphs.iter().map(Glyph::code_point));

        let mut font = Self {
            glyphs,
            index,
            kerning_pairs: Vec::new(),
            alpha_bits,
            charset,
            ascent: 0,
            descent: 0,
        };
        if let Some(d) = font.glyph_for_code_point(ASCENT_REFERENCE) {
            font.ascent = d.bounding_box().y_max;
        }
        if let Some(p) = font.glyph_for_code_point(DESCENT_REFERENCE) {
            font.descent = p.bounding_box().y_min - 1;
        }
        Ok(font)
    }

    /// Rasterizes the requested code points through an engine
    ///
    /// Whitespace, code points the engine cannot draw, and glyphs without
    /// any ink are left out. The remaining glyphs keep request order.
    pub fn import(
        engine: &dyn RenderingEngine,
        code_points: &[CodePoint],
        params: &ImportParams,
    ) -> Result<Self> {
        if !(params.point_size.is_finite() && params.point_size > 0.0) {
            return Err(ConfigError::InvalidPointSize(params.point_size).into());
        }

        let mut glyphs = Vec::with_capacity(code_points.len());
        for &code_point in code_points {
            if charset::is_whitespace(code_point) {
                continue;
            }
            let Some(rasterized) = engine.rasterize(code_point, params.point_size)? else {
                log::trace!("{}: no glyph for U+{:04X}", engine.name(), code_point);
                continue;
            };
            if rasterized.bbox.is_empty() {
                log::trace!("{}: U+{:04X} leaves no ink", engine.name(), code_point);
                continue;
            }
            glyphs.push(Glyph::new(
                code_point,
                rasterized.bbox,
                rasterized.advance,
                rasterized.raster,
            )?);
        }

        log::debug!(
            "Imported {} of {} code points at {}pt with {}",
            glyphs.len(),
            code_points.len(),
            params.point_size,
            engine.name()
        );
        Self::new(glyphs, params.alpha_bits)
    }

    /// Measures kerning for candidate pairs and replaces the kerning table
    ///
    /// Without candidates every ordered pair of glyphs is tried, which is
    /// quadratic; pass the pairs found at a larger size to avoid that.
    pub fn generate_kerning_pairs(
        &mut self,
        engine: &dyn RenderingEngine,
        point_size: f32,
        candidates: Option<&[CodePointPair]>,
    ) -> Result<()> {
        let builder = KerningBuilder::new(engine, point_size);
        let pairs = match candidates {
            Some(candidates) => builder.build(self, candidates)?,
            None => builder.build(self, &KerningBuilder::all_pairs(&self.glyphs))?,
        };
        self.kerning_pairs = pairs;
        Ok(())
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyph_for_code_point(&self, code_point: CodePoint) -> Option<&Glyph> {
        self.index.get(&code_point).map(|&i| &self.glyphs[i])
    }

    pub fn kerning_pairs(&self) -> &[KerningPair] {
        &self.kerning_pairs
    }

    pub fn set_kerning_pairs(&mut self, pairs: Vec<KerningPair>) {
        self.kerning_pairs = pairs;
    }

    pub fn alpha_bits(&self) -> AlphaBits {
        self.alpha_bits
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn ascent(&self) -> i32 {
        self.ascent
    }

    pub fn descent(&self) -> i32 {
        self.descent
    }

    pub fn set_vertical_metrics(&mut self, ascent: i32, descent: i32) {
        self.ascent = ascent;
        self.descent = descent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{traits::RasterizedGlyph, types::BoundingBox};

    fn square(cp: char, side: i32) -> Glyph {
        let bbox = BoundingBox::new(0, 0, side - 1, side - 1);
        Glyph::new(cp as CodePoint, bbox, side + 1, vec![255; bbox.area()]).unwrap()
    }

    struct SquareEngine;

    impl RenderingEngine for SquareEngine {
        fn name(&self) -> &'static str {
            "square"
        }

        fn rasterize(&self, cp: CodePoint, size: f32) -> Result<Option<RasterizedGlyph>> {
            // 'z' is missing, 'x' has no ink
            match char::from_u32(cp) {
                Some('z') => Ok(None),
                Some('x') => Ok(Some(RasterizedGlyph {
                    bbox: BoundingBox::new(0, 0, -1, -1),
                    advance: 5,
                    raster: Vec::new(),
                })),
                _ => {
                    let side = size as i32;
                    Ok(Some(RasterizedGlyph {
                        bbox: BoundingBox::new(0, 0, side - 1, side - 1),
                        advance: side + 1,
                        raster: vec![255; (side * side) as usize],
                    }))
                },
            }
        }

        fn measure_string_width(&self, cps: &[CodePoint], size: f32) -> Result<f64> {
            Ok(cps.len() as f64 * (size as f64 + 1.0))
        }
    }

    #[test]
    fn test_rejects_duplicate_code_points() {
        let result = Font::new(vec![square('a', 2), square('a', 3)], AlphaBits::Four);
        assert!(matches!(
            result,
            Err(crate::GlyphpackError::Data(DataError::DuplicateCodePoint { code_point: 0x61 }))
        ));
    }

    #[test]
    fn test_reference_glyph_metrics() {
        let d = Glyph::new('d' as u32, BoundingBox::new(0, 0, 1, 9), 3, vec![1; 20]).unwrap();
        let p = Glyph::new('p' as u32, BoundingBox::new(0, -3, 1, 5), 3, vec![1; 18]).unwrap();
        let font = Font::new(vec![d, p], AlphaBits::Four).unwrap();
        assert_eq!(font.ascent(), 9);
        assert_eq!(font.descent(), -4);
    }

    #[test]
    fn test_missing_reference_glyphs() {
        let font = Font::new(vec![square('A', 4)], AlphaBits::Four).unwrap();
        assert_eq!(font.ascent(), 0);
        assert_eq!(font.descent(), 0);
    }

    #[test]
    fn test_charset_follows_glyphs() {
        let font = Font::new(vec![square('A', 2), square('é', 2)], AlphaBits::Four).unwrap();
        assert_eq!(font.charset(), Charset::Ascii);

        let font = Font::new(vec![square('A', 2), square('€', 2)], AlphaBits::Four).unwrap();
        assert_eq!(font.charset(), Charset::Utf8);
    }

    #[test]
    fn test_import_filters_unusable_code_points() {
        let cps: Vec<CodePoint> = "a b\tzxc".chars().map(|c| c as u32).collect();
        let font = Font::import(&SquareEngine, &cps, &ImportParams::default()).unwrap();

        let imported: Vec<CodePoint> = font.glyphs().iter().map(Glyph::code_point).collect();
        assert_eq!(imported, vec!['a' as u32, 'b' as u32, 'c' as u32]);
        assert_eq!(font.glyphs()[0].bounding_box().width(), 16);
    }

    #[test]
    fn test_import_rejects_bad_point_size() {
        let params = ImportParams {
            point_size: 0.0,
            ..ImportParams::default()
        };
        assert!(Font::import(&SquareEngine, &[0x41], &params).is_err());
    }

    #[test]
    fn test_lookup_by_code_point() {
        let font = Font::new(vec![square('A', 2), square('B', 3)], AlphaBits::Four).unwrap();
        assert_eq!(
            font.glyph_for_code_point('B' as u32).map(Glyph::advance),
            Some(4)
        );
        assert!(font.glyph_for_code_point('C' as u32).is_none());
    }
}
