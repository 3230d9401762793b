// this_file: crates/glyphpack-encode/src/assembler.rs

//! Font blob assembly
//!
//! Encoding runs in two passes over the same glyph sequence. The sizing
//! pass encodes every glyph block once, keeps the bytes, and fixes the
//! field widths and offsets. The emission pass writes the sections from
//! those cached blocks and never re-encodes.
//!
//! Layout, all multi-byte fields big-endian:
//!
//! | Section        | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | header         | `u16` version, `u8` alpha bits, `u8` code point width, `u8` metric width, `u8` offset width, `u8` RLE flag, `u16` glyph count, `u16` kerning count |
//! | global metrics | 11 signed metrics, fallback code point                          |
//! | glyph table    | per glyph: code point, 4 box metrics, advance, data offset      |
//! | kerning table  | per pair: left, right, `u8` kern                                |
//! | glyph data     | encoded blocks back to back                                     |

use glyphpack_core::{
    error::{ConfigError, DataError, Result},
    font::Font,
    metrics::GlobalMetrics,
    types::{CodePoint, Glyph},
};

use crate::{bytes::ByteWriter, codec::GlyphEncoder, width};

/// Header version marker, bumped on any incompatible layout change
pub const FORMAT_VERSION: u16 = 0x0101;
/// Drawn by the decoder in place of unmapped characters
pub const FALLBACK_CODE_POINT: CodePoint = '_' as CodePoint;

pub(crate) const HEADER_LEN: usize = 11;
pub(crate) const GLOBAL_METRIC_COUNT: usize = 11;
/// Box corners and advance
pub(crate) const GLYPH_METRIC_COUNT: usize = 5;

/// Knobs for the assembler
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Run-length code glyph blocks
    pub rle: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { rle: true }
    }
}

/// Everything the sizing pass decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub code_point_width: usize,
    pub metric_width: usize,
    pub offset_width: usize,
    /// Start of each glyph's block within the glyph data section
    pub glyph_offsets: Vec<usize>,
    pub glyph_lengths: Vec<usize>,
    pub glyph_table_start: usize,
    pub kerning_table_start: usize,
    pub glyph_data_start: usize,
    pub total_len: usize,
}

/// A finished blob and how it was laid out
#[derive(Debug, Clone)]
pub struct EncodedFont {
    pub bytes: Vec<u8>,
    pub layout: Layout,
    pub metrics: GlobalMetrics,
    /// Glyph blocks in glyph order, as cached by the sizing pass
    pub blocks: Vec<Vec<u8>>,
}

/// Assembles fonts into blobs
#[derive(Debug, Clone, Default)]
pub struct FontEncoder {
    options: EncodeOptions,
}

impl FontEncoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encodes a font, failing before any output exists if anything is invalid
    pub fn encode(&self, font: &Font) -> Result<EncodedFont> {
        let glyph_encoder = GlyphEncoder::new(font.alpha_bits(), self.options.rle)?;
        if font.glyph_count() == 0 {
            return Err(ConfigError::NoGlyphs.into());
        }
        let code_point_width = font.charset().code_point_width();
        validate(font, code_point_width)?;

        let metrics = GlobalMetrics::compute(font)?;

        // Sizing pass
        let blocks = encode_blocks(&glyph_encoder, font.glyphs());
        let layout = size(font, &metrics, &blocks, code_point_width)?;
        log::debug!(
            "Sized {} glyphs, {} kerning pairs: metric width {}, offset width {}, {} bytes",
            font.glyph_count(),
            font.kerning_pairs().len(),
            layout.metric_width,
            layout.offset_width,
            layout.total_len
        );

        // Emission pass
        let bytes = emit(font, &metrics, &blocks, &layout, self.options.rle);
        debug_assert_eq!(bytes.len(), layout.total_len);

        Ok(EncodedFont {
            bytes,
            layout,
            metrics,
            blocks,
        })
    }
}

/// Encodes a font with the given options
pub fn encode_font(font: &Font, options: &EncodeOptions) -> Result<EncodedFont> {
    FontEncoder::new(options.clone()).encode(font)
}

fn validate(font: &Font, code_point_width: usize) -> Result<()> {
    let max_code_point: CodePoint = (1 << (8 * code_point_width)) - 1;
    let check_code_point = |code_point: CodePoint| -> Result<()> {
        if code_point > max_code_point {
            return Err(DataError::CodePointTooWide {
                code_point,
                width: code_point_width,
            }
            .into());
        }
        Ok(())
    };

    if font.glyph_count() > usize::from(u16::MAX) {
        return Err(DataError::TooManyGlyphs(font.glyph_count()).into());
    }
    if font.kerning_pairs().len() > usize::from(u16::MAX) {
        return Err(DataError::TooManyKerningPairs(font.kerning_pairs().len()).into());
    }

    for glyph in font.glyphs() {
        if glyph.bounding_box().is_empty() {
            return Err(DataError::EmptyBoundingBox {
                code_point: glyph.code_point(),
            }
            .into());
        }
        check_code_point(glyph.code_point())?;
    }

    for pair in font.kerning_pairs() {
        let (left, right) = (pair.code_points.left, pair.code_points.right);
        if !(1..=255).contains(&pair.kern) {
            return Err(DataError::KerningOutOfRange {
                left,
                right,
                kern: pair.kern,
            }
            .into());
        }
        check_code_point(left)?;
        check_code_point(right)?;
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn encode_blocks(encoder: &GlyphEncoder, glyphs: &[Glyph]) -> Vec<Vec<u8>> {
    glyphs.iter().map(|glyph| encoder.encode(glyph)).collect()
}

#[cfg(feature = "parallel")]
fn encode_blocks(encoder: &GlyphEncoder, glyphs: &[Glyph]) -> Vec<Vec<u8>> {
    use rayon::prelude::*;

    // Indexed collect keeps glyph order
    glyphs.par_iter().map(|glyph| encoder.encode(glyph)).collect()
}

fn size(
    font: &Font,
    metrics: &GlobalMetrics,
    blocks: &[Vec<u8>],
    code_point_width: usize,
) -> Result<Layout> {
    let per_glyph = font.glyphs().iter().flat_map(|glyph| {
        let bbox = glyph.bounding_box();
        [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max, glyph.advance()]
    });
    let metric_width = width::metric_width(metrics.signed_fields().into_iter().chain(per_glyph));

    let glyph_lengths: Vec<usize> = blocks.iter().map(Vec::len).collect();
    let glyph_offsets: Vec<usize> = glyph_lengths
        .iter()
        .scan(0usize, |offset, len| {
            let start = *offset;
            *offset += len;
            Some(start)
        })
        .collect();
    // The last block ends at the end of the blob, so its start is the largest offset stored
    let max_offset = glyph_offsets.last().copied().unwrap_or(0);
    let offset_width = width::offset_width(max_offset)?;

    let glyph_table_start = HEADER_LEN + GLOBAL_METRIC_COUNT * metric_width + code_point_width;
    let glyph_entry_len = code_point_width + GLYPH_METRIC_COUNT * metric_width + offset_width;
    let kerning_table_start = glyph_table_start + font.glyph_count() * glyph_entry_len;
    let glyph_data_start = kerning_table_start + font.kerning_pairs().len() * (2 * code_point_width + 1);
    let total_len = glyph_data_start + glyph_lengths.iter().sum::<usize>();

    Ok(Layout {
        code_point_width,
        metric_width,
        offset_width,
        glyph_offsets,
        glyph_lengths,
        glyph_table_start,
        kerning_table_start,
        glyph_data_start,
        total_len,
    })
}

fn emit(
    font: &Font,
    metrics: &GlobalMetrics,
    blocks: &[Vec<u8>],
    layout: &Layout,
    rle: bool,
) -> Vec<u8> {
    let cp_width = layout.code_point_width;
    let metric_width = layout.metric_width;
    let mut out = ByteWriter::with_capacity(layout.total_len);

    // Counts were checked against u16 in validate
    out.put_u16(FORMAT_VERSION);
    out.put_u8(font.alpha_bits().bits());
    out.put_u8(cp_width as u8);
    out.put_u8(metric_width as u8);
    out.put_u8(layout.offset_width as u8);
    out.put_u8(u8::from(rle));
    out.put_u16(font.glyph_count() as u16);
    out.put_u16(font.kerning_pairs().len() as u16);

    for value in metrics.signed_fields() {
        out.put_signed(value, metric_width);
    }
    out.put_unsigned(FALLBACK_CODE_POINT, cp_width);
    debug_assert_eq!(out.len(), layout.glyph_table_start);

    for (glyph, &offset) in font.glyphs().iter().zip(&layout.glyph_offsets) {
        let bbox = glyph.bounding_box();
        out.put_unsigned(glyph.code_point(), cp_width);
        out.put_signed(bbox.x_min, metric_width);
        out.put_signed(bbox.y_min, metric_width);
        out.put_signed(bbox.x_max, metric_width);
        out.put_signed(bbox.y_max, metric_width);
        out.put_signed(glyph.advance(), metric_width);
        out.put_unsigned(offset as u32, layout.offset_width);
    }
    debug_assert_eq!(out.len(), layout.kerning_table_start);

    for pair in font.kerning_pairs() {
        out.put_unsigned(pair.code_points.left, cp_width);
        out.put_unsigned(pair.code_points.right, cp_width);
        out.put_u8(pair.kern as u8);
    }
    debug_assert_eq!(out.len(), layout.glyph_data_start);

    for block in blocks {
        out.put_slice(block);
    }
    out.into_inner()
}
