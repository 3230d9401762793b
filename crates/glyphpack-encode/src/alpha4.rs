// this_file: crates/glyphpack-encode/src/alpha4.rs

//! Alpha-4: 16 shades per pixel, optionally run-length coded
//!
//! Packed blocks hold two pixels per byte, high nibble first, in row-major
//! order with no padding between rows; an odd final pixel leaves the low
//! nibble 0.
//!
//! RLE blocks are one byte per run token: high nibble `length - 1`, low
//! nibble the shade. Runs stop at the end of every row and after 16
//! pixels, so a decoder that knows the glyph width never has to split a
//! token across rows.

use glyphpack_core::types::AlphaBits;

use crate::codec::PixelEncoder;

/// Longest run one token can carry
pub const MAX_RUN: u8 = 16;

/// One RLE byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken {
    /// Pixels covered, 1..=16
    pub length: u8,
    /// Shade, 0..=15
    pub value: u8,
}

impl RunToken {
    pub fn to_byte(self) -> u8 {
        ((self.length - 1) << 4) | (self.value & 0x0F)
    }

    pub fn from_byte(byte: u8) -> Self {
        Self {
            length: (byte >> 4) + 1,
            value: byte & 0x0F,
        }
    }
}

/// Encoder state for one glyph
pub struct Alpha4Encoder {
    rle: bool,
    out: Vec<u8>,
    /// Packed mode: high nibble waiting for its partner
    pending: Option<u8>,
}

impl Alpha4Encoder {
    pub fn new(rle: bool) -> Self {
        Self {
            rle,
            out: Vec::new(),
            pending: None,
        }
    }

    fn push_packed(&mut self, row: &[u8]) {
        for &sample in row {
            let nibble = AlphaBits::Four.quantize(sample);
            match self.pending.take() {
                Some(high) => self.out.push((high << 4) | nibble),
                None => self.pending = Some(nibble),
            }
        }
    }

    fn push_runs(&mut self, row: &[u8]) {
        let mut run: Option<RunToken> = None;
        for &sample in row {
            let value = AlphaBits::Four.quantize(sample);
            run = match run {
                Some(mut token) if token.value == value && token.length < MAX_RUN => {
                    token.length += 1;
                    Some(token)
                },
                Some(token) => {
                    self.out.push(token.to_byte());
                    Some(RunToken { length: 1, value })
                },
                None => Some(RunToken { length: 1, value }),
            };
        }
        // Runs never continue into the next row
        if let Some(token) = run {
            self.out.push(token.to_byte());
        }
    }
}

impl PixelEncoder for Alpha4Encoder {
    fn push_row(&mut self, row: &[u8]) {
        if self.rle {
            self.push_runs(row);
        } else {
            self.push_packed(row);
        }
    }

    fn finish(mut self: Box<Self>) -> Vec<u8> {
        if let Some(high) = self.pending.take() {
            self.out.push(high << 4);
        }
        self.out
    }
}

/// Run tokens of an RLE block in order
pub fn runs(block: &[u8]) -> impl Iterator<Item = RunToken> + '_ {
    block.iter().map(|&b| RunToken::from_byte(b))
}

/// Whether a block of `len` bytes can hold exactly `pixels` shades
///
/// Checked before decoding so an implausible pixel count never drives an
/// allocation.
pub fn can_cover(len: usize, pixels: usize, rle: bool) -> bool {
    if rle {
        pixels <= len.saturating_mul(usize::from(MAX_RUN)) && pixels >= len
    } else {
        pixels.div_ceil(2) == len
    }
}

/// Expands a block back into one shade per pixel
///
/// Returns `None` unless the block covers exactly `pixels` pixels.
pub fn decode(block: &[u8], pixels: usize, rle: bool) -> Option<Vec<u8>> {
    if !can_cover(block.len(), pixels, rle) {
        return None;
    }
    let mut shades = Vec::new();
    if rle {
        for token in runs(block) {
            shades.extend(std::iter::repeat(token.value).take(usize::from(token.length)));
        }
    } else {
        shades.reserve(block.len() * 2);
        for &byte in block {
            shades.push(byte >> 4);
            shades.push(byte & 0x0F);
        }
        shades.truncate(pixels);
    }
    (shades.len() == pixels).then_some(shades)
}
