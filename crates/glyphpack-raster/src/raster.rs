// this_file: crates/glyphpack-raster/src/raster.rs

//! Outline to coverage
//!
//! Outlines are drawn unhinted into two paths at once: an SVG string for
//! zeno to fill and a kurbo path for exact bounds. The filled mask is
//! aligned to the pixel grid so that box coordinates stay integral.

use glyphpack_core::{
    error::{GlyphpackError, Result},
    types::{AlphaBits, BoundingBox},
};
use kurbo::Shape;
use skrifa::{
    instance::{LocationRef, Size},
    outline::{DrawSettings, OutlinePen},
    GlyphId, MetadataProvider,
};

/// Filled outline, top row first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    /// Left edge of column 0
    pub x0: i32,
    /// Top edge of row 0
    pub y1: i32,
    pub width: u32,
    pub height: u32,
    pub mask: Vec<u8>,
}

impl Coverage {
    fn row(&self, y: u32) -> &[u8] {
        let start = (y * self.width) as usize;
        &self.mask[start..start + self.width as usize]
    }

    fn sample(&self, x: u32, y: u32) -> u8 {
        self.mask[(y * self.width + x) as usize]
    }

    /// Drops border rows and columns with no visible ink at `alpha_bits`
    ///
    /// A pixel at row `r` gets `y = y1 - r`, the top edge of the pixel, and
    /// column `c` gets `x = x0 + c`.
    pub fn trim(&self, alpha_bits: AlphaBits) -> (BoundingBox, Vec<u8>) {
        let inked = |sample: u8| alpha_bits.quantize(sample) != 0;
        let row_inked = |y: u32| self.row(y).iter().any(|&s| inked(s));
        let col_inked = |x: u32| (0..self.height).any(|y| inked(self.sample(x, y)));

        let Some(top) = (0..self.height).find(|&y| row_inked(y)) else {
            return (BoundingBox::new(0, 0, -1, -1), Vec::new());
        };
        // A row with ink also has a column with ink
        let bottom = (0..self.height).rev().find(|&y| row_inked(y)).unwrap_or(top);
        let left = (0..self.width).find(|&x| col_inked(x)).unwrap_or(0);
        let right = (0..self.width).rev().find(|&x| col_inked(x)).unwrap_or(left);

        let mut raster = Vec::with_capacity(((right - left + 1) * (bottom - top + 1)) as usize);
        for y in top..=bottom {
            raster.extend_from_slice(&self.row(y)[left as usize..=right as usize]);
        }

        let bbox = BoundingBox::new(
            self.x0 + left as i32,
            self.y1 - bottom as i32,
            self.x0 + right as i32,
            self.y1 - top as i32,
        );
        (bbox, raster)
    }
}

/// Fills the outline of `glyph_id` at `size` pixels per em
///
/// Returns `None` when the font has no outline for the glyph. Glyphs that
/// draw nothing give zero-sized coverage.
pub fn rasterize(font: &skrifa::FontRef<'_>, glyph_id: GlyphId, size: f32) -> Result<Option<Coverage>> {
    let Some(glyph) = font.outline_glyphs().get(glyph_id) else {
        return Ok(None);
    };

    let mut pen = PathPen::default();
    let settings = DrawSettings::unhinted(Size::new(size), LocationRef::default());
    glyph.draw(settings, &mut pen).map_err(|e| GlyphpackError::Engine {
        engine: crate::ENGINE_NAME,
        message: format!("outline of glyph {} failed to draw: {}", glyph_id.to_u32(), e),
    })?;
    let (svg, path) = pen.finish();

    let bounds = path.bounding_box();
    if path.elements().is_empty() || !bounds.is_finite() || bounds.area() == 0.0 {
        return Ok(Some(Coverage {
            x0: 0,
            y1: 0,
            width: 0,
            height: 0,
            mask: Vec::new(),
        }));
    }

    let x0 = bounds.x0.floor() as i32;
    let y0 = bounds.y0.floor() as i32;
    let x1 = bounds.x1.ceil() as i32;
    let y1 = bounds.y1.ceil() as i32;
    let width = (x1 - x0) as u32;
    let height = (y1 - y0) as u32;

    let mut mask = vec![0u8; (width * height) as usize];
    zeno::Mask::new(svg.as_str())
        .size(width, height)
        .offset((-x0, -y0))
        .render_into(&mut mask, None);

    // Outlines are y-up, the mask is y-down
    for y in 0..(height / 2) {
        let top_row = (y * width) as usize;
        let bottom_row = ((height - 1 - y) * width) as usize;
        for x in 0..width as usize {
            mask.swap(top_row + x, bottom_row + x);
        }
    }

    Ok(Some(Coverage {
        x0,
        y1,
        width,
        height,
        mask,
    }))
}

/// Records an outline as zeno path data and a kurbo path
#[derive(Default)]
struct PathPen {
    commands: Vec<String>,
    path: kurbo::BezPath,
}

impl PathPen {
    fn finish(self) -> (String, kurbo::BezPath) {
        (self.commands.join(" "), self.path)
    }
}

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(format!("M {:.3},{:.3}", x, y));
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(format!("L {:.3},{:.3}", x, y));
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.commands
            .push(format!("Q {:.3},{:.3} {:.3},{:.3}", cx, cy, x, y));
        self.path
            .quad_to((cx as f64, cy as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.commands.push(format!(
            "C {:.3},{:.3} {:.3},{:.3} {:.3},{:.3}",
            cx0, cy0, cx1, cy1, x, y
        ));
        self.path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.commands.push("Z".to_string());
        self.path.close_path();
    }
}
