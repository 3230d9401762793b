// this_file: crates/glyphpack-cli/src/commands/inspect.rs

//! Inspect command implementation
//!
//! Parses a blob the way an embedded decoder would and prints what it finds.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use glyphpack_core::types::{BoundingBox, CodePoint};
use glyphpack_encode::FontBlob;

use crate::cli::InspectArgs;

/// Darkest last; one character per 4-bit shade
const SHADES: &[u8; 16] = b" .,:;-=+ox*%#&$@";

pub fn run(args: &InspectArgs) -> Result<()> {
    let data = std::fs::read(&args.blob)
        .with_context(|| format!("Failed to read {}", args.blob.display()))?;
    let blob = FontBlob::parse(&data)
        .with_context(|| format!("{} is not a glyphpack blob", args.blob.display()))?;

    print!("{}", summary(&blob));
    if args.all {
        print!("{}", tables(&blob));
    }

    if let Some(ch) = args.glyph {
        let code_point = ch as CodePoint;
        let index = blob
            .find(code_point)
            .with_context(|| format!("No glyph for {:?} (U+{:04X})", ch, code_point))?;
        let shades = blob
            .decode_glyph(index)
            .with_context(|| format!("Failed to decode U+{:04X}", code_point))?;
        let entry = &blob.glyphs[index];
        println!();
        println!(
            "U+{:04X} box ({}, {})..({}, {}) advance {}",
            code_point,
            entry.bounding_box.x_min,
            entry.bounding_box.y_min,
            entry.bounding_box.x_max,
            entry.bounding_box.y_max,
            entry.advance
        );
        print!("{}", render_glyph(&entry.bounding_box, &shades));
    }

    Ok(())
}

fn summary(blob: &FontBlob<'_>) -> String {
    let h = &blob.header;
    let m = &blob.metrics;
    let bbox = m.extents.bounding_box;
    let mut out = String::new();

    let _ = writeln!(out, "Version:        0x{:04X}", h.version);
    let _ = writeln!(out, "Alpha bits:     {}", h.alpha_bits.bits());
    let _ = writeln!(
        out,
        "Field widths:   code point {}, metric {}, offset {}",
        h.code_point_width, h.metric_width, h.offset_width
    );
    let _ = writeln!(out, "RLE:            {}", if h.rle { "yes" } else { "no" });
    let _ = writeln!(out, "Glyphs:         {}", h.glyph_count);
    let _ = writeln!(out, "Kerning pairs:  {}", h.kerning_count);
    let _ = writeln!(
        out,
        "Bounding box:   ({}, {})..({}, {})",
        bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max
    );
    let _ = writeln!(
        out,
        "Ascent/descent: {} / {}, line gap {}",
        m.ascent, m.descent, m.line_gap
    );
    let _ = writeln!(
        out,
        "Advance:        {}..{}, overhang {}, space {}",
        m.extents.min_advance,
        m.extents.max_advance,
        m.extents.max_right_overhang,
        m.default_space_advance
    );
    let _ = writeln!(out, "Glyph data:     {} bytes", blob.glyph_data().len());
    out
}

fn tables(blob: &FontBlob<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    for (i, g) in blob.glyphs.iter().enumerate() {
        let len = blob.block(i).map_or(0, <[u8]>::len);
        let _ = writeln!(
            out,
            "U+{:04X} {:>4}x{:<4} at ({}, {}) advance {:>3} offset {:>6} len {}",
            g.code_point,
            g.bounding_box.width(),
            g.bounding_box.height(),
            g.bounding_box.x_min,
            g.bounding_box.y_min,
            g.advance,
            g.offset,
            len
        );
    }
    for pair in &blob.kerning_pairs {
        let _ = writeln!(
            out,
            "U+{:04X} U+{:04X} kern {}",
            pair.code_points.left, pair.code_points.right, pair.kern
        );
    }
    out
}

/// One text row per pixel row, top first
fn render_glyph(bbox: &BoundingBox, shades: &[u8]) -> String {
    let width = bbox.width() as usize;
    let mut out = String::new();
    if width == 0 {
        return out;
    }
    for (row, y) in shades.chunks(width).zip((bbox.y_min..=bbox.y_max).rev()) {
        let _ = write!(out, "{:>4} |", y);
        for &shade in row {
            out.push(char::from(SHADES[usize::from(shade & 0x0F)]));
        }
        out.push('\n');
    }
    out
}
