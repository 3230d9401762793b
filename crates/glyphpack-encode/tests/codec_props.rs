// this_file: crates/glyphpack-encode/tests/codec_props.rs

use glyphpack_core::types::{AlphaBits, BoundingBox, Glyph};
use glyphpack_encode::{alpha4, width, GlyphEncoder};
use proptest::prelude::*;

/// A glyph with random size and coverage, biased towards runs
fn arb_glyph() -> impl Strategy<Value = Glyph> {
    (1u32..24, 1u32..24).prop_flat_map(|(w, h)| {
        let pixels = (w * h) as usize;
        let sample = prop_oneof![Just(0u8), Just(255u8), any::<u8>()];
        prop::collection::vec(sample, pixels).prop_map(move |raster| {
            let bbox = BoundingBox::new(0, 0, w as i32 - 1, h as i32 - 1);
            Glyph::new(0x41, bbox, w as i32 + 1, raster).unwrap()
        })
    })
}

fn quantized(glyph: &Glyph) -> Vec<u8> {
    glyph
        .raster()
        .iter()
        .map(|&p| AlphaBits::Four.quantize(p))
        .collect()
}

// Property: packed blocks decode to the quantized raster
proptest! {
    #[test]
    fn prop_packed_round_trip(glyph in arb_glyph()) {
        let encoder = GlyphEncoder::new(AlphaBits::Four, false).unwrap();
        let block = encoder.encode(&glyph);
        let pixels = glyph.raster().len();

        prop_assert_eq!(block.len(), pixels.div_ceil(2));
        prop_assert_eq!(alpha4::decode(&block, pixels, false), Some(quantized(&glyph)));
    }
}

// Property: RLE decodes to the same shades as packed
proptest! {
    #[test]
    fn prop_rle_matches_packed(glyph in arb_glyph()) {
        let pixels = glyph.raster().len();
        let packed = GlyphEncoder::new(AlphaBits::Four, false).unwrap().encode(&glyph);
        let rle = GlyphEncoder::new(AlphaBits::Four, true).unwrap().encode(&glyph);

        prop_assert_eq!(
            alpha4::decode(&rle, pixels, true),
            alpha4::decode(&packed, pixels, false)
        );
    }
}

// Property: no run token covers pixels from two rows
proptest! {
    #[test]
    fn prop_runs_stay_within_rows(glyph in arb_glyph()) {
        let width = glyph.bounding_box().width() as usize;
        let block = GlyphEncoder::new(AlphaBits::Four, true).unwrap().encode(&glyph);

        let mut i = 0usize;
        for token in alpha4::runs(&block) {
            let last = i + usize::from(token.length) - 1;
            prop_assert_eq!(i / width, last / width);
            i = last + 1;
        }
        prop_assert_eq!(i, glyph.raster().len());
    }
}

// Property: the chosen width holds the value and the next smaller one does not
proptest! {
    #[test]
    fn prop_signed_width_is_minimal(value in any::<i32>()) {
        let w = width::signed_width(value);
        let fits = |w: usize| {
            let half = 1i64 << (8 * w - 1);
            (-half..half).contains(&i64::from(value))
        };
        prop_assert!(w == 4 || fits(w));
        prop_assert!(w == 1 || !fits(w - 1));
    }
}
