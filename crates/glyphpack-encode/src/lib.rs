// this_file: crates/glyphpack-encode/src/lib.rs

//! Glyphpack Encode: fonts in, embedded font blobs out
//!
//! The assembler sizes every field from the data it is given, packs glyph
//! rasters with the Alpha-4 codec and writes one self-describing blob. The
//! reader parses that blob back the way an embedded decoder would.
//!
//! ```rust,no_run
//! use glyphpack_encode::{EncodeOptions, FontEncoder, FontBlob};
//! # fn font() -> glyphpack_core::Font { unimplemented!() }
//!
//! let font = font();
//! let encoded = FontEncoder::new(EncodeOptions::default()).encode(&font)?;
//! let blob = FontBlob::parse(&encoded.bytes)?;
//! assert_eq!(blob.glyphs.len(), font.glyph_count());
//! # Ok::<(), glyphpack_core::GlyphpackError>(())
//! ```

pub mod alpha4;
pub mod assembler;
pub mod bytes;
pub mod codec;
pub mod cpp;
pub mod output;
pub mod reader;
pub mod width;

pub use assembler::{encode_font, EncodeOptions, EncodedFont, FontEncoder, Layout};
pub use codec::{GlyphEncoder, PixelEncoder};
pub use cpp::CppEmitter;
pub use output::{BinEmitter, Emitter, OutputFile, OutputFormat, Target};
pub use reader::FontBlob;
