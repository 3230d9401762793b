// this_file: crates/glyphpack-cli/src/commands/encode.rs

//! Encode command implementation
//!
//! Imports the font once per size, largest first. The largest size tries
//! every ordered pair for kerning; the pairs it keeps are the only
//! candidates measured at the smaller sizes.

use anyhow::{bail, Context, Result};
use glyphpack_core::{charset, types::CodePointPair, Font, ImportParams};
use glyphpack_encode::{output::write_files, EncodeOptions, FontEncoder, OutputFormat, Target};
use glyphpack_raster::{FontFile, OutlineEngine};

use crate::cli::EncodeArgs;

pub fn run(args: &EncodeArgs) -> Result<()> {
    let engine = load_engine(args)?;
    let name = match &args.name {
        Some(name) => name.clone(),
        None => engine
            .font()
            .post_script_name()
            .context("Font has no PostScript name; pass --name")?,
    };

    let code_points = charset::parse_charset_spec(&args.charset).context("Invalid --charset")?;
    let sizes = sizes_largest_first(&args.sizes)?;
    let encoder = FontEncoder::new(EncodeOptions { rle: !args.no_rle });
    let emitter = OutputFormat::from(args.format).emitter();

    log::info!(
        "Encoding {} at {:?} with {} requested code points",
        name,
        sizes,
        code_points.len()
    );

    let mut candidates: Option<Vec<CodePointPair>> = None;
    for size in sizes {
        let params = ImportParams {
            point_size: size as f32,
            ..ImportParams::default()
        };
        let mut font = Font::import(&engine, &code_points, &params)
            .with_context(|| format!("Failed to import {} at {}pt", name, size))?;
        font.generate_kerning_pairs(&engine, params.point_size, candidates.as_deref())
            .with_context(|| format!("Failed to measure kerning at {}pt", size))?;
        if candidates.is_none() {
            candidates = Some(kerning_candidates(&font));
        }

        let encoded = encoder
            .encode(&font)
            .with_context(|| format!("Failed to encode {} at {}pt", name, size))?;
        let target = Target::new(&name, size);
        let files = emitter.emit(&font, &encoded, &target);
        let written = write_files(&target.directory(&args.output_dir), &files)
            .with_context(|| format!("Failed to write {} output", emitter.name()))?;

        println!(
            "{}pt: {} glyphs, {} kerning pairs, {} bytes",
            size,
            font.glyph_count(),
            font.kerning_pairs().len(),
            encoded.bytes.len()
        );
        for path in written {
            println!("  {}", path.display());
        }
    }

    Ok(())
}

fn load_engine(args: &EncodeArgs) -> Result<OutlineEngine> {
    match (&args.font_file, &args.font) {
        (Some(path), _) => FontFile::from_file_index(path, args.face_index)
            .and_then(OutlineEngine::new)
            .with_context(|| format!("Failed to load font {}", path.display())),
        (None, Some(name)) => OutlineEngine::from_system(name)
            .with_context(|| format!("Failed to load installed font {}", name)),
        (None, None) => bail!("Pass --font-file or --font"),
    }
}

/// Distinct sizes, largest first
fn sizes_largest_first(sizes: &[u32]) -> Result<Vec<u32>> {
    if let Some(zero) = sizes.iter().find(|&&size| size == 0) {
        bail!("Point size must be positive, got {}", zero);
    }
    let mut sizes = sizes.to_vec();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes.dedup();
    if sizes.is_empty() {
        bail!("No point sizes given");
    }
    Ok(sizes)
}

fn kerning_candidates(font: &Font) -> Vec<CodePointPair> {
    font.kerning_pairs()
        .iter()
        .map(|pair| pair.code_points)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphpack_core::types::{AlphaBits, BoundingBox, Glyph, KerningPair};

    #[test]
    fn test_sizes_largest_first() {
        assert_eq!(sizes_largest_first(&[12, 24, 16, 24]).unwrap(), vec![24, 16, 12]);
        assert!(sizes_largest_first(&[]).is_err());
        assert!(sizes_largest_first(&[12, 0]).is_err());
    }

    #[test]
    fn test_candidates_follow_kerning_table() {
        let glyphs = ['A', 'V']
            .iter()
            .map(|&c| Glyph::new(c as u32, BoundingBox::new(0, 0, 0, 0), 1, vec![255]).unwrap())
            .collect();
        let mut font = Font::new(glyphs, AlphaBits::Four).unwrap();
        font.set_kerning_pairs(vec![KerningPair::new('A' as u32, 'V' as u32, 2)]);

        assert_eq!(
            kerning_candidates(&font),
            vec![CodePointPair::new('A' as u32, 'V' as u32)]
        );
    }
}
