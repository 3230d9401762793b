// this_file: crates/glyphpack-encode/src/cpp.rs

//! C++ source output
//!
//! Produces `<size>.h` declaring the font accessor and `<size>.cpp`
//! holding the blob as a `PROGMEM` byte array, one table entry per line
//! with the glyph it belongs to in a trailing comment.

use glyphpack_core::{font::Font, types::CodePoint};

use crate::{
    assembler::{EncodedFont, HEADER_LEN},
    output::{Emitter, OutputFile, Target},
};

const BYTES_PER_LINE: usize = 16;

/// Header and source file pair
#[derive(Debug, Default, Clone, Copy)]
pub struct CppEmitter;

impl Emitter for CppEmitter {
    fn name(&self) -> &'static str {
        "cpp"
    }

    fn emit(&self, font: &Font, encoded: &EncodedFont, target: &Target) -> Vec<OutputFile> {
        let var = target.variable_name();
        vec![
            OutputFile {
                file_name: format!("{}.h", target.size),
                contents: declaration(&var).into_bytes(),
            },
            OutputFile {
                file_name: format!("{}.cpp", target.size),
                contents: definition(font, encoded, target, &var).into_bytes(),
            },
        ]
    }
}

fn declaration(var: &str) -> String {
    let mut h = String::new();
    h.push_str("#include \"roo_display/font/font.h\"\n\n");
    h.push_str("namespace roo_display {\n\n");
    h.push_str(&format!("const Font& {}();\n", var));
    h.push_str("\n}  // namespace roo_display\n");
    h
}

fn definition(font: &Font, encoded: &EncodedFont, target: &Target, var: &str) -> String {
    let data_var = format!("{}_data", var);
    let mut cpp = String::new();
    cpp.push_str(&format!("#include \"{}.h\"\n", target.size));
    cpp.push_str("#include \"pgmspace.h\"\n");
    cpp.push_str("#include <inttypes.h>\n");
    cpp.push_str("#include \"roo_display/font/smooth_font.h\"\n\n");
    cpp.push_str("namespace roo_display {\n\n");
    cpp.push_str(&format!(
        "// Font {}, {} px, {} bytes\n",
        target.font_name,
        target.size,
        encoded.bytes.len()
    ));
    cpp.push_str(&format!("static const uint8_t {}[] PROGMEM = {{\n", data_var));
    hex_array(&mut cpp, font, encoded);
    cpp.push_str("};\n\n");
    cpp.push_str(&format!("const Font& {}() {{\n", var));
    cpp.push_str(&format!("  static SmoothFont font({});\n", data_var));
    cpp.push_str("  return font;\n");
    cpp.push_str("}\n");
    cpp.push_str("\n}  // namespace roo_display\n");
    cpp
}

fn hex_array(out: &mut String, font: &Font, encoded: &EncodedFont) {
    let bytes = &encoded.bytes;
    let layout = &encoded.layout;

    section(out, "Header");
    hex_line(out, &bytes[..HEADER_LEN], None);
    section(out, "Global metrics");
    hex_line(out, &bytes[HEADER_LEN..layout.glyph_table_start], None);

    section(out, "Glyph metrics");
    let entry_len = (layout.kerning_table_start - layout.glyph_table_start)
        .checked_div(font.glyph_count())
        .unwrap_or(0);
    let entries = bytes[layout.glyph_table_start..layout.kerning_table_start].chunks(entry_len.max(1));
    for (glyph, entry) in font.glyphs().iter().zip(entries) {
        hex_line(out, entry, Some(&describe(&[glyph.code_point()])));
    }

    section(out, "Kerning pairs");
    let pair_len = 2 * layout.code_point_width + 1;
    let pairs = bytes[layout.kerning_table_start..layout.glyph_data_start].chunks(pair_len);
    for (pair, entry) in font.kerning_pairs().iter().zip(pairs) {
        let cps = [pair.code_points.left, pair.code_points.right];
        hex_line(out, entry, Some(&describe(&cps)));
    }

    section(out, "Glyph data");
    for (glyph, block) in font.glyphs().iter().zip(&encoded.blocks) {
        out.push_str(&format!("  // {}\n", describe(&[glyph.code_point()])));
        for chunk in block.chunks(BYTES_PER_LINE) {
            hex_line(out, chunk, None);
        }
    }
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n  // {}\n", title));
}

fn hex_line(out: &mut String, bytes: &[u8], comment: Option<&str>) {
    out.push(' ');
    for b in bytes {
        out.push_str(&format!(" 0x{:02X},", b));
    }
    if let Some(comment) = comment {
        out.push_str(&format!("  // {}", comment));
    }
    out.push('\n');
}

/// `"AV" (U+0041 U+0056)`, dropping control characters from the quoted part
fn describe(code_points: &[CodePoint]) -> String {
    let text: String = code_points
        .iter()
        .filter_map(|&cp| char::from_u32(cp))
        .filter(|c| !c.is_control())
        .collect();
    let hex: Vec<String> = code_points.iter().map(|cp| format!("U+{:04X}", cp)).collect();
    format!("\"{}\" ({})", text, hex.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{encode_font, EncodeOptions};
    use glyphpack_core::types::{AlphaBits, BoundingBox, Glyph, KerningPair};

    fn font() -> Font {
        let bbox = BoundingBox::new(0, 0, 1, 1);
        let mut font = Font::new(
            vec![
                Glyph::new('A' as u32, bbox, 3, vec![255; 4]).unwrap(),
                Glyph::new('V' as u32, bbox, 3, vec![0; 4]).unwrap(),
            ],
            AlphaBits::Four,
        )
        .unwrap();
        font.set_kerning_pairs(vec![KerningPair::new('A' as u32, 'V' as u32, 1)]);
        font
    }

    #[test]
    fn test_emits_header_and_source() {
        let font = font();
        let encoded = encode_font(&font, &EncodeOptions::default()).unwrap();
        let files = CppEmitter.emit(&font, &encoded, &Target::new("Test-Sans", 12));

        assert_eq!(files[0].file_name, "12.h");
        assert_eq!(files[1].file_name, "12.cpp");
        let h = String::from_utf8(files[0].contents.clone()).unwrap();
        let cpp = String::from_utf8(files[1].contents.clone()).unwrap();

        assert!(h.contains("const Font& font_Test_Sans_12();"));
        assert!(cpp.contains("static const uint8_t font_Test_Sans_12_data[] PROGMEM = {"));
        assert!(cpp.contains("static SmoothFont font(font_Test_Sans_12_data);"));
        assert!(cpp.contains("  0x01, 0x01, 0x04, 0x01,"));
        assert!(cpp.contains("// \"A\" (U+0041)"));
        assert!(cpp.contains("// \"AV\" (U+0041 U+0056)"));
    }

    #[test]
    fn test_array_holds_every_byte() {
        let font = font();
        let encoded = encode_font(&font, &EncodeOptions::default()).unwrap();
        let files = CppEmitter.emit(&font, &encoded, &Target::new("T", 12));
        let cpp = String::from_utf8(files[1].contents.clone()).unwrap();

        assert_eq!(cpp.matches(" 0x").count(), encoded.bytes.len());
    }
}
