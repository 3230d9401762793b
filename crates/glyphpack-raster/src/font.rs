// this_file: crates/glyphpack-raster/src/font.rs

//! Font files held in memory
//!
//! The raw bytes are kept and parsed on demand, so collections keep
//! working through their face index.

use std::{fs, path::Path};

use glyphpack_core::{
    error::{FontLoadError, Result},
    types::CodePoint,
};
use read_fonts::TableProvider;
use skrifa::{string::StringId, GlyphId, MetadataProvider};

/// One face of a font file
pub struct FontFile {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
}

impl FontFile {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens one face of a file (collections hold several)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let data = fs::read(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()))?;
        Self::from_data_index(data, face_index)
    }

    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font = read_fonts::FontRef::from_index(&data, face_index)
            .map_err(|_| FontLoadError::InvalidData)?;
        let units_per_em = font
            .head()
            .map(|head| head.units_per_em())
            .map_err(|_| FontLoadError::InvalidData)?;
        if units_per_em == 0 {
            return Err(FontLoadError::InvalidData.into());
        }

        Ok(Self {
            data,
            face_index,
            units_per_em,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub(crate) fn skrifa(&self) -> Result<skrifa::FontRef<'_>> {
        skrifa::FontRef::from_index(&self.data, self.face_index)
            .map_err(|_| FontLoadError::InvalidData.into())
    }

    /// Glyph drawing `code_point`, if the character map has one
    pub fn glyph_id(&self, code_point: CodePoint) -> Option<GlyphId> {
        self.skrifa()
            .ok()?
            .charmap()
            .map(code_point)
            .filter(|gid| gid.to_u32() != 0)
    }

    /// PostScript name from the `name` table
    pub fn post_script_name(&self) -> Option<String> {
        self.skrifa()
            .ok()?
            .localized_strings(StringId::POSTSCRIPT_NAME)
            .english_or_first()
            .map(|name| name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage() {
        assert!(FontFile::from_data(vec![0; 100]).is_err());
        assert!(FontFile::from_data(Vec::new()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = match FontFile::from_file("/nonexistent/glyphpack/font.ttf") {
            Err(err) => err,
            Ok(_) => panic!("loaded a missing file"),
        };
        assert!(err.to_string().contains("not found"));
    }
}
