// this_file: crates/glyphpack-raster/tests/integration.rs

//! Outline engine against a real font when one is available
//!
//! Set `GLYPHPACK_TEST_FONT` to a `.ttf` to pin the font; otherwise a few
//! common install locations are tried and the font tests are skipped if
//! none exists.

use std::path::PathBuf;

use glyphpack_core::{types::AlphaBits, Font, ImportParams, RenderingEngine};
use glyphpack_raster::{find_system_font, raster::Coverage, OutlineEngine};
use proptest::prelude::*;

fn test_font() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("GLYPHPACK_TEST_FONT") {
        return Some(PathBuf::from(path));
    }
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(OutlineEngine::from_file("/nonexistent/glyphpack.ttf").is_err());
}

#[test]
fn test_unknown_system_font() {
    let err = match find_system_font("GlyphpackNoSuchFont-Regular") {
        Err(err) => err,
        Ok(_) => panic!("found a font that does not exist"),
    };
    assert!(err.to_string().contains("GlyphpackNoSuchFont-Regular"));
    assert!(OutlineEngine::from_system("GlyphpackNoSuchFont-Regular").is_err());
}

#[test]
fn test_engine_exposes_font() {
    let Some(path) = test_font() else {
        return;
    };
    let engine = OutlineEngine::from_file(&path).unwrap();
    assert!(engine.font().units_per_em() > 0);
    assert!(engine.font().post_script_name().is_some());
}

#[test]
fn test_invalid_point_size() {
    let Some(path) = test_font() else {
        return;
    };
    let engine = OutlineEngine::from_file(&path).unwrap();
    assert!(engine.rasterize('H' as u32, 0.0).is_err());
    assert!(engine.measure_string_width(&['H' as u32], -1.0).is_err());
}

#[test]
fn test_rasterized_glyphs_are_consistent() {
    let Some(path) = test_font() else {
        eprintln!("no test font found, skipping");
        return;
    };
    let engine = OutlineEngine::from_file(&path).unwrap();

    let glyph = engine.rasterize('H' as u32, 16.0).unwrap().unwrap();
    assert!(!glyph.bbox.is_empty());
    assert_eq!(glyph.raster.len(), glyph.bbox.area());
    assert!(glyph.advance > 0);
    // H sits on the baseline
    assert!(glyph.bbox.y_min >= 0 && glyph.bbox.y_min <= 1);

    // Space has no ink
    if let Some(space) = engine.rasterize(' ' as u32, 16.0).unwrap() {
        assert!(space.bbox.is_empty());
        assert!(space.raster.is_empty());
    }

    // Unassigned code point
    assert!(engine.rasterize(0x10FFFD, 16.0).unwrap().is_none());
}

#[test]
fn test_widths_scale_with_size() {
    let Some(path) = test_font() else {
        return;
    };
    let engine = OutlineEngine::from_file(&path).unwrap();

    let small = engine.measure_string_width(&['H' as u32], 10.0).unwrap();
    let large = engine.measure_string_width(&['H' as u32], 20.0).unwrap();
    assert!(small > 0.0);
    assert!((large - 2.0 * small).abs() < 1e-6);

    let pair = engine
        .measure_string_width(&['H' as u32, 'H' as u32], 10.0)
        .unwrap();
    assert!((pair - 2.0 * small).abs() < 1e-6);
}

#[test]
fn test_kerned_pairs_are_narrower() {
    let Some(path) = test_font() else {
        return;
    };
    let engine = OutlineEngine::from_file(&path).unwrap();
    let width = |text: &str| {
        let cps: Vec<u32> = text.chars().map(|c| c as u32).collect();
        engine.measure_string_width(&cps, 48.0).unwrap()
    };

    for pair in ["AV", "To"] {
        let mut chars = pair.chars().map(String::from);
        let (left, right) = (chars.next().unwrap(), chars.next().unwrap());
        let kern = width(&left) + width(&right) - width(pair);
        assert!(kern >= 1.0, "{} kerns by {}", pair, kern);
    }
}

#[test]
fn test_kerning_table_from_real_font() {
    let Some(path) = test_font() else {
        return;
    };
    let engine = OutlineEngine::from_file(&path).unwrap();
    let cps: Vec<u32> = "AVTo".chars().map(|c| c as u32).collect();
    let params = ImportParams {
        point_size: 48.0,
        ..ImportParams::default()
    };
    let mut font = Font::import(&engine, &cps, &params).unwrap();

    font.generate_kerning_pairs(&engine, 48.0, None).unwrap();

    let kerned: Vec<(u32, u32)> = font
        .kerning_pairs()
        .iter()
        .map(|p| (p.code_points.left, p.code_points.right))
        .collect();
    assert!(kerned.contains(&('A' as u32, 'V' as u32)));
    assert!(kerned.contains(&('T' as u32, 'o' as u32)));
}

#[test]
fn test_import_through_engine() {
    let Some(path) = test_font() else {
        return;
    };
    let engine = OutlineEngine::from_file(&path).unwrap();
    let cps: Vec<u32> = "d p\u{10FFFD}".chars().map(|c| c as u32).collect();

    let font = Font::import(&engine, &cps, &ImportParams::default()).unwrap();

    assert_eq!(font.glyph_count(), 2);
    assert!(font.ascent() > 0);
    assert!(font.descent() < 0);
}

fn arb_coverage() -> impl Strategy<Value = Coverage> {
    (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop_oneof![Just(0u8), 1u8..=16, any::<u8>()], (w * h) as usize)
            .prop_map(move |mask| Coverage {
                x0: -3,
                y1: 7,
                width: w,
                height: h,
                mask,
            })
    })
}

// Property: trimming keeps every inked pixel and leaves inked borders
proptest! {
    #[test]
    fn prop_trim_keeps_ink(coverage in arb_coverage()) {
        let bits = AlphaBits::Four;
        let (bbox, raster) = coverage.trim(bits);
        let inked: usize = coverage.mask.iter().filter(|&&s| bits.quantize(s) != 0).count();

        prop_assert_eq!(raster.len(), bbox.area());
        prop_assert_eq!(raster.iter().filter(|&&s| bits.quantize(s) != 0).count(), inked);
        if inked == 0 {
            prop_assert!(bbox.is_empty());
        } else {
            let w = bbox.width() as usize;
            let rows: Vec<&[u8]> = raster.chunks(w).collect();
            let ink = |s: &u8| bits.quantize(*s) != 0;
            prop_assert!(rows[0].iter().any(ink));
            prop_assert!(rows[rows.len() - 1].iter().any(ink));
            prop_assert!(rows.iter().any(|r| ink(&r[0])));
            prop_assert!(rows.iter().any(|r| ink(&r[w - 1])));
        }
    }
}
