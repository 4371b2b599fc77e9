//! Text mask to block grid for the block-reveal logo.

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use eframe::egui::{pos2, Pos2, Rect};

/// A 1-bit coverage mask placed at `origin` in window pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pub origin: (i32, i32),
    pub width: usize,
    pub height: usize,
    bits: Vec<bool>,
}

impl Mask {
    pub fn new(origin: (i32, i32), width: usize, height: usize) -> Self {
        Self {
            origin,
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.bits[y * self.width + x] = true;
        }
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Dilate with a `(2r+1)²` square. The canvas grows by `r` on every side
    /// so nothing is clipped.
    pub fn dilate(&self, radius: usize) -> Mask {
        if radius == 0 {
            return self.clone();
        }
        let r = radius as i32;
        let mut out = Mask::new(
            (self.origin.0 - r, self.origin.1 - r),
            self.width + 2 * radius,
            self.height + 2 * radius,
        );
        // Copy into the padded canvas, then run a separable max filter
        let mut padded = vec![false; out.width * out.height];
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    padded[(y + radius) * out.width + x + radius] = true;
                }
            }
        }
        let horizontal = max_filter_rows(&padded, out.width, out.height, radius);
        out.bits = max_filter_cols(&horizontal, out.width, out.height, radius);
        out
    }

    /// Tight bounding box of the set pixels, in window coordinates.
    pub fn bounds(&self) -> Option<Rect> {
        let mut min = (usize::MAX, usize::MAX);
        let mut max = (0usize, 0usize);
        let mut any = false;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    any = true;
                    min = (min.0.min(x), min.1.min(y));
                    max = (max.0.max(x), max.1.max(y));
                }
            }
        }
        any.then(|| {
            Rect::from_min_max(
                pos2(
                    (self.origin.0 + min.0 as i32) as f32,
                    (self.origin.1 + min.1 as i32) as f32,
                ),
                pos2(
                    (self.origin.0 + max.0 as i32 + 1) as f32,
                    (self.origin.1 + max.1 as i32 + 1) as f32,
                ),
            )
        })
    }

    pub fn integral(&self) -> IntegralImage {
        IntegralImage::new(self)
    }
}

// Sliding-window count: a pixel is set when any of its 2r+1 neighbours is.
fn max_filter_rows(src: &[bool], width: usize, height: usize, r: usize) -> Vec<bool> {
    let mut out = vec![false; src.len()];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        let mut count = row.iter().take(r + 1).filter(|b| **b).count();
        for x in 0..width {
            out[y * width + x] = count > 0;
            if x + r + 1 < width && row[x + r + 1] {
                count += 1;
            }
            if x >= r && row[x - r] {
                count -= 1;
            }
        }
    }
    out
}

fn max_filter_cols(src: &[bool], width: usize, height: usize, r: usize) -> Vec<bool> {
    let mut out = vec![false; src.len()];
    for x in 0..width {
        let at = |y: usize| src[y * width + x];
        let mut count = (0..(r + 1).min(height)).filter(|&y| at(y)).count();
        for y in 0..height {
            out[y * width + x] = count > 0;
            if y + r + 1 < height && at(y + r + 1) {
                count += 1;
            }
            if y >= r && at(y - r) {
                count -= 1;
            }
        }
    }
    out
}

/// Summed-area table for constant-time "any pixel set in rect" queries.
#[derive(Debug, Clone)]
pub struct IntegralImage {
    origin: (i32, i32),
    width: usize,
    height: usize,
    sums: Vec<u32>,
}

impl IntegralImage {
    fn new(mask: &Mask) -> Self {
        let w = mask.width + 1;
        let mut sums = vec![0u32; w * (mask.height + 1)];
        for y in 0..mask.height {
            let mut row = 0u32;
            for x in 0..mask.width {
                row += mask.get(x, y) as u32;
                sums[(y + 1) * w + x + 1] = sums[y * w + x + 1] + row;
            }
        }
        Self {
            origin: mask.origin,
            width: mask.width,
            height: mask.height,
            sums,
        }
    }

    /// Set pixels inside the half-open window-space rect `[x0,x1)×[y0,y1)`.
    pub fn count_in(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> u32 {
        let clamp_x = |v: i32| (v - self.origin.0).clamp(0, self.width as i32) as usize;
        let clamp_y = |v: i32| (v - self.origin.1).clamp(0, self.height as i32) as usize;
        let (x0, x1) = (clamp_x(x0), clamp_x(x1));
        let (y0, y1) = (clamp_y(y0), clamp_y(y1));
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }
        let w = self.width + 1;
        self.sums[y1 * w + x1] + self.sums[y0 * w + x0] - self.sums[y0 * w + x1] - self.sums[y1 * w + x0]
    }

    pub fn intersects(&self, rect: Rect) -> bool {
        self.count_in(
            rect.min.x.floor() as i32,
            rect.min.y.floor() as i32,
            rect.max.x.ceil() as i32,
            rect.max.y.ceil() as i32,
        ) > 0
    }
}

/// Width of `text` laid out at `px`, kerning included.
pub fn text_advance(font: &FontArc, text: &str, px: f32) -> f32 {
    let scaled = font.as_scaled(PxScale::from(px));
    let mut caret = 0.0;
    let mut prev: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        caret += scaled.h_advance(id);
        prev = Some(id);
    }
    caret
}

/// Rasterise `text` with its baseline starting at `baseline`. Coverage of at
/// least one half counts as set.
pub fn rasterize_text(font: &FontArc, text: &str, px: f32, baseline: Pos2) -> Mask {
    let scaled = font.as_scaled(PxScale::from(px));
    let mut caret = baseline.x;
    let mut prev: Option<GlyphId> = None;
    let mut outlines = Vec::new();
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        let glyph = id.with_scale_and_position(px, point(caret, baseline.y));
        caret += scaled.h_advance(id);
        prev = Some(id);
        if let Some(outlined) = font.outline_glyph(glyph) {
            outlines.push(outlined);
        }
    }

    let Some(first) = outlines.first() else {
        return Mask::new((baseline.x as i32, baseline.y as i32), 0, 0);
    };
    let mut lo = first.px_bounds().min;
    let mut hi = first.px_bounds().max;
    for o in &outlines {
        let b = o.px_bounds();
        lo = point(lo.x.min(b.min.x), lo.y.min(b.min.y));
        hi = point(hi.x.max(b.max.x), hi.y.max(b.max.y));
    }

    let origin = (lo.x.floor() as i32, lo.y.floor() as i32);
    let width = (hi.x.ceil() as i32 - origin.0).max(0) as usize;
    let height = (hi.y.ceil() as i32 - origin.1).max(0) as usize;
    let mut mask = Mask::new(origin, width, height);
    for o in &outlines {
        let b = o.px_bounds();
        let ox = b.min.x as i32 - origin.0;
        let oy = b.min.y as i32 - origin.1;
        o.draw(|x, y, coverage| {
            if coverage >= 0.5 {
                let px = ox + x as i32;
                let py = oy + y as i32;
                if px >= 0 && py >= 0 {
                    mask.set(px as usize, py as usize);
                }
            }
        });
    }
    mask
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGridParams {
    pub cols: usize,
    pub rows: usize,
    /// Inner spacing inside each cell.
    pub block_gap: f32,
    /// Added to the raw cell height so short glyph boxes still get square cells.
    pub cell_h_bias: f32,
    /// Nominal title size before fitting to the badge.
    pub title_pt: f32,
    /// Share of the badge width the title should span.
    pub title_width_ratio: f32,
    pub dilate_px: usize,
}

impl Default for BlockGridParams {
    fn default() -> Self {
        Self {
            cols: 24,
            rows: 14,
            block_gap: 2.0,
            cell_h_bias: 9.0,
            title_pt: 94.0,
            title_width_ratio: 0.75,
            dilate_px: 1,
        }
    }
}

/// Cells that fall on the title, in reveal order.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    pub cells: Vec<Rect>,
    pub mask: Mask,
    pub text_bounds: Option<Rect>,
}

/// Smallest title size, in points.
pub const MIN_TITLE_PT: f32 = 8.0;

/// Fit `text` into `badge`, thicken it, and keep the grid cells it touches.
pub fn build_block_layout(
    font: &FontArc,
    text: &str,
    badge: Rect,
    params: &BlockGridParams,
) -> BlockLayout {
    // pt to px at 96 dpi
    let nominal_px = params.title_pt * 96.0 / 72.0;
    let target_w = (badge.width() * params.title_width_ratio).max(1.0);
    let nominal_w = text_advance(font, text, nominal_px).max(1.0);
    let px = (nominal_px * target_w / nominal_w).max(MIN_TITLE_PT * 96.0 / 72.0);

    let text_w = text_advance(font, text, px);
    let ascent = font.as_scaled(PxScale::from(px)).ascent();
    let baseline = pos2(badge.center().x - text_w / 2.0, badge.center().y + ascent / 2.0);

    let mask = rasterize_text(font, text, px, baseline).dilate(params.dilate_px);
    let text_bounds = mask.bounds();
    let cells = text_bounds
        .map(|tb| grid_cells(&mask, tb, params))
        .unwrap_or_default();

    BlockLayout {
        cells,
        mask,
        text_bounds,
    }
}

/// Grid over `tb`, scanned column by column left to right, each column bottom
/// to top, keeping blocks that touch the mask.
pub fn grid_cells(mask: &Mask, tb: Rect, params: &BlockGridParams) -> Vec<Rect> {
    let cols = params.cols.max(1);
    let rows = params.rows.max(1);
    let cell_w = tb.width() / cols as f32;
    let cell_h = tb.height() / rows as f32 + params.cell_h_bias;
    let cell = cell_w.min(cell_h).max(0.5);
    let block = (cell - params.block_gap).max(1.0).trunc();

    let origin_x = tb.min.x + (tb.width() - cols as f32 * cell) / 2.0;
    let origin_y = tb.min.y + (tb.height() - rows as f32 * cell) / 2.0;

    let integral = mask.integral();
    let mut cells = Vec::new();
    for c in 0..cols {
        for r in (0..rows).rev() {
            let x = (origin_x + c as f32 * cell + (cell - block) / 2.0).round();
            let y = (origin_y + r as f32 * cell + (cell - block) / 2.0).round();
            let rect = Rect::from_min_max(pos2(x, y), pos2(x + block, y + block));
            if integral.intersects(rect) {
                cells.push(rect);
            }
        }
    }
    cells
}
