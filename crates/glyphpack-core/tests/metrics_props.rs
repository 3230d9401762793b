// this_file: crates/glyphpack-core/tests/metrics_props.rs

use glyphpack_core::{
    metrics::{line_gap, FontExtents},
    types::{BoundingBox, Glyph},
};
use proptest::prelude::*;

fn arb_box() -> impl Strategy<Value = BoundingBox> {
    (-50i32..50, -50i32..50, 0i32..20, 0i32..20)
        .prop_map(|(x, y, w, h)| BoundingBox::new(x, y, x + w, y + h))
}

fn fold(boxes: &[BoundingBox]) -> BoundingBox {
    boxes[1..].iter().fold(boxes[0], |acc, b| acc.expand(b))
}

// Property: folding boxes gives the same result in any order
proptest! {
    #[test]
    fn prop_expand_order_independent(boxes in prop::collection::vec(arb_box(), 1..12)) {
        let forward = fold(&boxes);
        let mut reversed = boxes.clone();
        reversed.reverse();
        prop_assert_eq!(forward, fold(&reversed));
    }
}

// Property: the folded box contains every input box
proptest! {
    #[test]
    fn prop_expand_contains_all(boxes in prop::collection::vec(arb_box(), 1..12)) {
        let folded = fold(&boxes);
        for b in &boxes {
            prop_assert!(folded.contains(b));
        }
    }
}

// Property: extents bracket every glyph advance and overhang stays non-negative
proptest! {
    #[test]
    fn prop_extents_bracket_glyphs(
        specs in prop::collection::vec((arb_box(), -5i32..40), 1..10)
    ) {
        let glyphs: Vec<Glyph> = specs
            .iter()
            .enumerate()
            .map(|(i, (bbox, advance))| {
                Glyph::new(0x41 + i as u32, *bbox, *advance, vec![0xFF; bbox.area()]).unwrap()
            })
            .collect();
        let extents = FontExtents::from_glyphs(&glyphs).unwrap();

        prop_assert!(extents.max_right_overhang >= 0);
        for glyph in &glyphs {
            prop_assert!(extents.min_advance <= glyph.advance());
            prop_assert!(extents.max_advance >= glyph.advance());
            prop_assert!(extents.bounding_box.contains(glyph.bounding_box()));
            let overhang = glyph.advance() - glyph.bounding_box().x_max + 1;
            prop_assert!(extents.max_right_overhang >= overhang);
        }
    }
}

// Property: line gap never drops below a fifth of the span
proptest! {
    #[test]
    fn prop_line_gap_lower_bound(ascent in 0i32..200, descent in -100i32..0, height in 0i32..400) {
        let span = ascent - descent;
        let gap = line_gap(height, ascent, descent);
        prop_assert!(gap >= (0.2 * f64::from(span)).round() as i32);
        prop_assert!(gap >= height - span);
    }
}
