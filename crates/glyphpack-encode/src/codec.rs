// this_file: crates/glyphpack-encode/src/codec.rs

//! Pixel codecs
//!
//! A codec turns 8-bit alpha rows into the byte stream stored in a glyph's
//! data block. Each supported bit depth is one [`PixelEncoder`]; the
//! [`GlyphEncoder`] picks the right one and rejects depths without a codec
//! before any pixel is touched.

use glyphpack_core::{
    error::{ConfigError, Result},
    types::{AlphaBits, Glyph},
};

use crate::alpha4::Alpha4Encoder;

/// Encodes the rows of one glyph
///
/// Rows must be pushed top to bottom. Nothing is complete until
/// [`PixelEncoder::finish`] consumes the encoder and flushes what is
/// pending.
pub trait PixelEncoder: Send {
    fn push_row(&mut self, row: &[u8]);

    fn finish(self: Box<Self>) -> Vec<u8>;
}

#[derive(Debug, Clone, Copy)]
enum Codec {
    Alpha4,
}

/// Encodes whole glyphs at one bit depth
#[derive(Debug, Clone, Copy)]
pub struct GlyphEncoder {
    alpha_bits: AlphaBits,
    codec: Codec,
    rle: bool,
}

impl GlyphEncoder {
    pub fn new(alpha_bits: AlphaBits, rle: bool) -> Result<Self> {
        let codec = match alpha_bits {
            AlphaBits::Four => Codec::Alpha4,
            other => return Err(ConfigError::UnsupportedAlphaBits(other.bits()).into()),
        };
        Ok(Self {
            alpha_bits,
            codec,
            rle,
        })
    }

    pub fn alpha_bits(&self) -> AlphaBits {
        self.alpha_bits
    }

    pub fn rle(&self) -> bool {
        self.rle
    }

    fn pixel_encoder(&self) -> Box<dyn PixelEncoder> {
        match self.codec {
            Codec::Alpha4 => Box::new(Alpha4Encoder::new(self.rle)),
        }
    }

    /// Encodes one glyph's raster into its data block
    pub fn encode(&self, glyph: &Glyph) -> Vec<u8> {
        let mut encoder = self.pixel_encoder();
        for row in glyph.rows() {
            encoder.push_row(row);
        }
        let block = encoder.finish();
        log::trace!(
            "U+{:04X}: {} pixels -> {} bytes",
            glyph.code_point(),
            glyph.raster().len(),
            block.len()
        );
        block
    }
}
