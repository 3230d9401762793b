// this_file: crates/glyphpack-encode/src/reader.rs

//! Reads encoded blobs back
//!
//! This mirrors what an embedded decoder does and is what `inspect` and
//! the round-trip tests are built on.

use glyphpack_core::{
    error::{DecodeError, Result},
    metrics::{FontExtents, GlobalMetrics},
    types::{AlphaBits, BoundingBox, CodePoint, KerningPair},
};

use crate::{
    alpha4,
    assembler::FORMAT_VERSION,
    bytes::ByteReader,
    codec::GlyphEncoder,
    width::{MAX_METRIC_WIDTH, MAX_OFFSET_WIDTH},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: u16,
    pub alpha_bits: AlphaBits,
    pub code_point_width: usize,
    pub metric_width: usize,
    pub offset_width: usize,
    pub rle: bool,
    pub glyph_count: usize,
    pub kerning_count: usize,
}

/// One row of the glyph table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphEntry {
    pub code_point: CodePoint,
    pub bounding_box: BoundingBox,
    pub advance: i32,
    /// Start of the block within the glyph data section
    pub offset: usize,
}

/// A parsed blob borrowing its glyph data
#[derive(Debug, Clone)]
pub struct FontBlob<'a> {
    pub header: Header,
    pub metrics: GlobalMetrics,
    pub fallback_code_point: CodePoint,
    pub glyphs: Vec<GlyphEntry>,
    pub kerning_pairs: Vec<KerningPair>,
    glyph_data: &'a [u8],
}

impl<'a> FontBlob<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let mut r = ByteReader::new(data);
        let header = read_header(&mut r)?;
        let cp_width = header.code_point_width;
        let metric_width = header.metric_width;

        let mut m = [0i32; 11];
        for value in &mut m {
            *value = r.signed(metric_width, "global metrics")?;
        }
        let metrics = GlobalMetrics {
            extents: FontExtents {
                bounding_box: BoundingBox::new(m[0], m[1], m[2], m[3]),
                min_advance: m[7],
                max_advance: m[8],
                max_right_overhang: m[9],
            },
            ascent: m[4],
            descent: m[5],
            line_gap: m[6],
            default_space_advance: m[10],
        };
        let fallback_code_point = r.unsigned(cp_width, "global metrics")?;

        let mut glyphs = Vec::with_capacity(header.glyph_count);
        for _ in 0..header.glyph_count {
            let code_point = r.unsigned(cp_width, "glyph table")?;
            let x_min = r.signed(metric_width, "glyph table")?;
            let y_min = r.signed(metric_width, "glyph table")?;
            let x_max = r.signed(metric_width, "glyph table")?;
            let y_max = r.signed(metric_width, "glyph table")?;
            let advance = r.signed(metric_width, "glyph table")?;
            let offset = r.unsigned(header.offset_width, "glyph table")? as usize;
            glyphs.push(GlyphEntry {
                code_point,
                bounding_box: BoundingBox::new(x_min, y_min, x_max, y_max),
                advance,
                offset,
            });
        }

        let mut kerning_pairs = Vec::with_capacity(header.kerning_count);
        for _ in 0..header.kerning_count {
            let left = r.unsigned(cp_width, "kerning table")?;
            let right = r.unsigned(cp_width, "kerning table")?;
            let kern = r.u8("kerning table")?;
            kerning_pairs.push(KerningPair::new(left, right, i32::from(kern)));
        }

        let glyph_data = r.remaining();
        let mut previous = 0;
        for glyph in &glyphs {
            if glyph.offset < previous || glyph.offset > glyph_data.len() {
                return Err(DecodeError::InvalidField {
                    field: "glyph offset",
                    value: glyph.offset as u32,
                }
                .into());
            }
            previous = glyph.offset;
        }

        Ok(Self {
            header,
            metrics,
            fallback_code_point,
            glyphs,
            kerning_pairs,
            glyph_data,
        })
    }

    /// The raw glyph data section
    pub fn glyph_data(&self) -> &'a [u8] {
        self.glyph_data
    }

    /// Index of the glyph for a code point
    pub fn find(&self, code_point: CodePoint) -> Option<usize> {
        self.glyphs.iter().position(|g| g.code_point == code_point)
    }

    /// Encoded block of glyph `index`; the last one runs to the end of the blob
    pub fn block(&self, index: usize) -> Option<&'a [u8]> {
        let start = self.glyphs.get(index)?.offset;
        let end = self
            .glyphs
            .get(index + 1)
            .map_or(self.glyph_data.len(), |next| next.offset);
        self.glyph_data.get(start..end)
    }

    /// Shades of glyph `index`, row-major from the top
    pub fn decode_glyph(&self, index: usize) -> Result<Vec<u8>> {
        let entry = self.glyphs.get(index).ok_or(DecodeError::InvalidField {
            field: "glyph index",
            value: index as u32,
        })?;
        // Fails for depths without a codec
        GlyphEncoder::new(self.header.alpha_bits, self.header.rle)?;

        let pixels = entry.bounding_box.area();
        let short = || DecodeError::ShortGlyphData {
            code_point: entry.code_point,
            pixels,
        };
        let block = self.block(index).ok_or_else(short)?;
        // Box sizes come from the blob; check them against the block first
        if entry.bounding_box.is_empty()
            || entry.bounding_box.checked_area().is_none()
            || !alpha4::can_cover(block.len(), pixels, self.header.rle)
        {
            return Err(short().into());
        }
        alpha4::decode(block, pixels, self.header.rle).ok_or_else(|| short().into())
    }
}

fn read_header(r: &mut ByteReader<'_>) -> Result<Header> {
    let version = r.u16("header")?;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnknownVersion(version).into());
    }
    let alpha_bits = r.u8("header")?;
    let alpha_bits = AlphaBits::try_from(alpha_bits).map_err(|_| DecodeError::InvalidField {
        field: "alpha bits",
        value: u32::from(alpha_bits),
    })?;
    let code_point_width = field_in(r.u8("header")?, "code point width", 1..=2)?;
    let metric_width = field_in(r.u8("header")?, "metric width", 1..=MAX_METRIC_WIDTH)?;
    let offset_width = field_in(r.u8("header")?, "offset width", 1..=MAX_OFFSET_WIDTH)?;
    let rle = match r.u8("header")? {
        0 => false,
        1 => true,
        other => {
            return Err(DecodeError::InvalidField {
                field: "rle flag",
                value: u32::from(other),
            }
            .into())
        },
    };
    let glyph_count = usize::from(r.u16("header")?);
    let kerning_count = usize::from(r.u16("header")?);

    Ok(Header {
        version,
        alpha_bits,
        code_point_width,
        metric_width,
        offset_width,
        rle,
        glyph_count,
        kerning_count,
    })
}

fn field_in(
    value: u8,
    field: &'static str,
    range: std::ops::RangeInclusive<usize>,
) -> Result<usize> {
    let value = usize::from(value);
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(DecodeError::InvalidField {
            field,
            value: value as u32,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::ByteWriter;

    /// One glyph with 4-byte metrics and the given box and data block
    fn single_glyph_blob(bbox: BoundingBox, rle: bool, block: &[u8]) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(128);
        w.put_u16(FORMAT_VERSION);
        for byte in [4, 1, 4, 1, u8::from(rle)] {
            w.put_u8(byte);
        }
        w.put_u16(1);
        w.put_u16(0);
        for _ in 0..11 {
            w.put_signed(0, 4);
        }
        w.put_unsigned('_' as u32, 1);
        w.put_unsigned('A' as u32, 1);
        for value in [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max, 1] {
            w.put_signed(value, 4);
        }
        w.put_unsigned(0, 1);
        w.put_slice(block);
        w.into_inner()
    }

    #[test]
    fn test_decodes_consistent_glyph() {
        let data = single_glyph_blob(BoundingBox::new(0, 0, 2, 0), true, &[0x2F]);
        let blob = FontBlob::parse(&data).unwrap();
        assert_eq!(blob.decode_glyph(0).unwrap(), vec![15, 15, 15]);
    }

    #[test]
    fn test_huge_box_is_short_data() {
        let huge = BoundingBox::new(i32::MIN + 1, i32::MIN + 1, i32::MAX, i32::MAX);
        for rle in [true, false] {
            let data = single_glyph_blob(huge, rle, &[0xFF]);
            let blob = FontBlob::parse(&data).unwrap();
            let err = blob.decode_glyph(0).unwrap_err();
            assert!(matches!(
                err,
                glyphpack_core::GlyphpackError::Decode(DecodeError::ShortGlyphData { .. })
            ));
        }
    }

    #[test]
    fn test_empty_box_is_short_data() {
        let data = single_glyph_blob(BoundingBox::new(1, 1, 0, 0), true, &[0x0F]);
        let blob = FontBlob::parse(&data).unwrap();
        assert!(blob.decode_glyph(0).is_err());
    }

    #[test]
    fn test_block_too_long_for_box() {
        // Two runs cannot make up a single pixel
        let data = single_glyph_blob(BoundingBox::new(0, 0, 0, 0), true, &[0x0F, 0x0F]);
        let blob = FontBlob::parse(&data).unwrap();
        assert!(blob.decode_glyph(0).is_err());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let data = [0x02, 0x00, 4, 1, 1, 1, 1, 0, 0, 0, 0];
        let err = FontBlob::parse(&data).unwrap_err();
        assert!(err.to_string().contains("0x0200"));
    }

    #[test]
    fn test_rejects_bad_widths() {
        let data = [0x01, 0x01, 4, 3, 1, 1, 1, 0, 0, 0, 0];
        let err = FontBlob::parse(&data).unwrap_err();
        assert!(err.to_string().contains("code point width"));
    }

    #[test]
    fn test_truncated_metrics() {
        let data = [0x01, 0x01, 4, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0];
        let err = FontBlob::parse(&data).unwrap_err();
        assert!(err.to_string().contains("global metrics"));
    }
}
