// this_file: crates/glyphpack-encode/src/bytes.rs

//! Big-endian fixed-width fields

use glyphpack_core::error::{DecodeError, Result};

/// Appends big-endian fields to a growing buffer
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Low `width` bytes of `value`, most significant first
    pub fn put_unsigned(&mut self, value: u32, width: usize) {
        let bytes = value.to_be_bytes();
        self.buf.extend_from_slice(&bytes[4 - width..]);
    }

    /// Two's complement truncated to `width` bytes
    pub fn put_signed(&mut self, value: i32, width: usize) {
        self.put_unsigned(value as u32, width);
    }

    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads big-endian fields, naming the section on truncation
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn take(&mut self, len: usize, section: &'static str) -> Result<&'a [u8]> {
        let available = self.data.len() - self.pos;
        if len > available {
            return Err(DecodeError::Truncated {
                section,
                needed: len,
                available,
            }
            .into());
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn u8(&mut self, section: &'static str) -> Result<u8> {
        Ok(self.take(1, section)?[0])
    }

    pub fn u16(&mut self, section: &'static str) -> Result<u16> {
        let bytes = self.take(2, section)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn unsigned(&mut self, width: usize, section: &'static str) -> Result<u32> {
        let bytes = self.take(width, section)?;
        Ok(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
    }

    /// Sign-extends a `width`-byte two's complement field
    pub fn signed(&mut self, width: usize, section: &'static str) -> Result<i32> {
        let raw = self.unsigned(width, section)?;
        let shift = 32 - 8 * width as u32;
        Ok(((raw << shift) as i32) >> shift)
    }
}
