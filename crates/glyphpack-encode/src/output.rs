// this_file: crates/glyphpack-encode/src/output.rs

//! Output files for an encoded font
//!
//! Emitters turn an [`EncodedFont`] into named files; [`write_files`]
//! puts them on disk so that a destination either holds a complete file
//! or is left untouched.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use glyphpack_core::{error::Result, font::Font};

use crate::{assembler::EncodedFont, cpp::CppEmitter};

/// What an encoded font is called on disk and in source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Sanitized font name, also the directory name
    pub font_name: String,
    pub size: u32,
}

impl Target {
    /// Replaces `-` and spaces so the name works as a directory and identifier
    pub fn new(font_name: &str, size: u32) -> Self {
        Self {
            font_name: sanitize_name(font_name),
            size,
        }
    }

    /// `<outdir>/<font_name>`
    pub fn directory(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.font_name)
    }

    /// C++ accessor name, `font_<font_name>_<size>`
    pub fn variable_name(&self) -> String {
        format!("font_{}_{}", self.font_name, self.size)
    }
}

pub fn sanitize_name(name: &str) -> String {
    name.replace(['-', ' '], "_")
}

/// One file to write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub file_name: String,
    pub contents: Vec<u8>,
}

/// Turns an encoded font into files
pub trait Emitter {
    fn name(&self) -> &'static str;

    fn emit(&self, font: &Font, encoded: &EncodedFont, target: &Target) -> Vec<OutputFile>;
}

/// Raw blob as `<size>.bin`
#[derive(Debug, Default, Clone, Copy)]
pub struct BinEmitter;

impl Emitter for BinEmitter {
    fn name(&self) -> &'static str {
        "bin"
    }

    fn emit(&self, _font: &Font, encoded: &EncodedFont, target: &Target) -> Vec<OutputFile> {
        vec![OutputFile {
            file_name: format!("{}.bin", target.size),
            contents: encoded.bytes.clone(),
        }]
    }
}

/// Output formats the encoder can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bin,
    Cpp,
}

impl OutputFormat {
    pub fn emitter(self) -> Box<dyn Emitter> {
        match self {
            OutputFormat::Bin => Box::new(BinEmitter),
            OutputFormat::Cpp => Box::new(CppEmitter),
        }
    }
}

/// Writes each file through a temporary sibling and a rename
///
/// Returns the paths written. A failure part way leaves earlier files in
/// place but never a partial file.
pub fn write_files(dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.file_name);
        write_atomic(&path, &file.contents)?;
        log::debug!("Wrote {} ({} bytes)", path.display(), file.contents.len());
        written.push(path);
    }
    Ok(written)
}

/// Replaces `path` with `contents` in one rename
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    let result = write_then_rename(&tmp, path, contents);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result.map_err(Into::into)
}

fn write_then_rename(tmp: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    {
        let mut file = fs::File::create(tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }
    fs::rename(tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_names() {
        let target = Target::new("Noto Sans-Bold", 16);
        assert_eq!(target.font_name, "Noto_Sans_Bold");
        assert_eq!(target.variable_name(), "font_Noto_Sans_Bold_16");
        assert_eq!(
            target.directory(Path::new("out")),
            Path::new("out").join("Noto_Sans_Bold")
        );
    }

    #[test]
    fn test_write_atomic_replaces_contents() {
        let dir = std::env::temp_dir().join(format!("glyphpack-atomic-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("12.bin");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!dir.join(".12.bin.tmp").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
