//! Drawing surface abstraction.
//!
//! A surface implements exactly one primitive, [`Canvas::draw`], plus its size.
//! Every other operation is a provided method written against that primitive,
//! so lines, boxes, text and sprite blits come out identical on every surface.
//!
//! All operations silently ignore cells outside `[0, width) x [0, height)`.

use std::ops::RangeInclusive;

use crate::core::{Rgb, Sprite};
use crate::types::{
    Alignment, Point, Rect, BLANK_GLYPH, BORDER_BOTTOM_LEFT, BORDER_BOTTOM_RIGHT,
    BORDER_HORIZONTAL, BORDER_TOP_LEFT, BORDER_TOP_RIGHT, BORDER_VERTICAL,
};

pub trait Canvas {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Write one glyph with its colors. Out-of-range coordinates are a no-op.
    fn draw(&mut self, x: i32, y: i32, glyph: char, fg: Rgb, bg: Rgb);

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    fn draw_point(&mut self, p: Point, glyph: char, fg: Rgb, bg: Rgb) {
        self.draw(p.x, p.y, glyph, fg, bg);
    }

    /// Fill the half-open rectangle, clipped to the canvas.
    fn fill(&mut self, rect: Rect, glyph: char, fg: Rgb, bg: Rgb) {
        let x1 = rect.x.clamp(0, self.width());
        let y1 = rect.y.clamp(0, self.height());
        let x2 = rect.x.saturating_add(rect.width).clamp(0, self.width());
        let y2 = rect.y.saturating_add(rect.height).clamp(0, self.height());
        for y in y1..y2 {
            for x in x1..x2 {
                self.draw(x, y, glyph, fg, bg);
            }
        }
    }

    fn fill_all(&mut self, glyph: char, fg: Rgb, bg: Rgb) {
        let bounds = self.bounds();
        self.fill(bounds, glyph, fg, bg);
    }

    /// Blank the whole canvas with spaces.
    fn clear(&mut self, fg: Rgb, bg: Rgb) {
        self.fill_all(BLANK_GLYPH, fg, bg);
    }

    /// Bresenham line, both endpoints inclusive.
    ///
    /// Only the stretch of the major axis that lies on the canvas is walked, so
    /// lines with far off-canvas endpoints cost no more than visible ones.
    fn draw_line(&mut self, start: Point, end: Point, glyph: char, fg: Rgb, bg: Rgb) {
        let dx = i64::from(end.x) - i64::from(start.x);
        let dy = i64::from(end.y) - i64::from(start.y);
        let dx1 = dx.abs();
        let dy1 = dy.abs();
        // Minor axis steps forward when both deltas share a sign.
        let minor_step = if (dx < 0 && dy < 0) || (dx > 0 && dy > 0) { 1 } else { -1 };

        if dy1 <= dx1 {
            let (x0, y0) = if dx >= 0 { (start.x, start.y) } else { (end.x, end.y) };
            let (x0, y0) = (i64::from(x0), i64::from(y0));
            for k in visible_steps(x0, dx1, self.width()) {
                // Ties step the minor axis.
                let y = y0 + minor_step * minor_offset(k, dy1, dx1, 0);
                put(self, x0 + k, y, glyph, fg, bg);
            }
        } else {
            let (x0, y0) = if dy >= 0 { (start.x, start.y) } else { (end.x, end.y) };
            let (x0, y0) = (i64::from(x0), i64::from(y0));
            for k in visible_steps(y0, dy1, self.height()) {
                // Ties hold the minor axis.
                let x = x0 + minor_step * minor_offset(k, dx1, dy1, 1);
                put(self, x, y0 + k, glyph, fg, bg);
            }
        }
    }

    /// Rectangle outline through `position` and `position + size` (both inclusive).
    fn draw_box(&mut self, position: Point, size: Point, glyph: char, fg: Rgb, bg: Rgb) {
        let (x0, y0) = (i64::from(position.x), i64::from(position.y));
        let (x1, y1) = (x0 + i64::from(size.x), y0 + i64::from(size.y));
        let top_left = clamp_point(x0, y0);
        let top_right = clamp_point(x1, y0);
        let bottom_left = clamp_point(x0, y1);
        let bottom_right = clamp_point(x1, y1);
        self.draw_line(top_left, top_right, glyph, fg, bg);
        self.draw_line(top_right, bottom_right, glyph, fg, bg);
        self.draw_line(bottom_right, bottom_left, glyph, fg, bg);
        self.draw_line(bottom_left, top_left, glyph, fg, bg);
    }

    /// Frame drawn one cell outside `rect`, with line glyphs and corner pieces.
    ///
    /// The outline runs from `rect.position() - 1` to `rect.position() - 1 + rect.size() + 1`.
    fn draw_border(&mut self, rect: Rect, fg: Rgb, bg: Rgb) {
        let (x0, y0) = (i64::from(rect.x) - 1, i64::from(rect.y) - 1);
        let (x1, y1) = (x0 + i64::from(rect.width) + 1, y0 + i64::from(rect.height) + 1);
        let top_left = clamp_point(x0, y0);
        let top_right = clamp_point(x1, y0);
        let bottom_left = clamp_point(x0, y1);
        let bottom_right = clamp_point(x1, y1);

        self.draw_line(top_left, top_right, BORDER_HORIZONTAL, fg, bg);
        self.draw_line(bottom_left, bottom_right, BORDER_HORIZONTAL, fg, bg);
        self.draw_line(top_left, bottom_left, BORDER_VERTICAL, fg, bg);
        self.draw_line(top_right, bottom_right, BORDER_VERTICAL, fg, bg);

        put(self, x0, y0, BORDER_TOP_LEFT, fg, bg);
        put(self, x1, y0, BORDER_TOP_RIGHT, fg, bg);
        put(self, x0, y1, BORDER_BOTTOM_LEFT, fg, bg);
        put(self, x1, y1, BORDER_BOTTOM_RIGHT, fg, bg);
    }

    /// One glyph per char on a single row.
    ///
    /// Line breaks are not interpreted: `'\n'` is drawn like any other char.
    fn draw_string(&mut self, x: i32, y: i32, text: &str, fg: Rgb, bg: Rgb, align: Alignment) {
        let len = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        let start = i64::from(x) + i64::from(align.start_offset(len));
        for (i, ch) in text.chars().enumerate() {
            put(self, start + i as i64, i64::from(y), ch, fg, bg);
        }
    }

    /// Blit `sprite` with its top-left at `position`. Space cells are transparent.
    fn draw_sprite(&mut self, sprite: &Sprite, position: Point) {
        let (px, py) = (i64::from(position.x), i64::from(position.y));
        for (x, y, p) in sprite.iter() {
            if p.glyph != BLANK_GLYPH {
                put(self, px + i64::from(x), py + i64::from(y), p.glyph, p.fg, p.bg);
            }
        }
    }
}

/// Draw at wide coordinates; anything outside the `i32` range is off-canvas.
fn put<C: Canvas + ?Sized>(canvas: &mut C, x: i64, y: i64, glyph: char, fg: Rgb, bg: Rgb) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        canvas.draw(x, y, glyph, fg, bg);
    }
}

/// Saturate to the `i32` range. Only used for axis-aligned edge endpoints,
/// where a clamped endpoint covers the same on-canvas cells as the real one.
fn clamp_point(x: i64, y: i64) -> Point {
    let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Point::new(clamp(x), clamp(y))
}

/// Steps `k` in `0..=len` for which `origin + k` falls in `[0, extent)`.
fn visible_steps(origin: i64, len: i64, extent: i32) -> RangeInclusive<i64> {
    let lo = (-origin).max(0);
    let hi = len.min(i64::from(extent) - 1 - origin);
    lo..=hi
}

/// Minor-axis offset after `k` major steps of a Bresenham walk.
///
/// Closed form of the incremental error term: `floor((2k*minor + major - bias) / (2*major))`.
/// `bias` 0 lets ties step the minor axis, 1 holds it.
fn minor_offset(k: i64, minor: i64, major: i64, bias: i64) -> i64 {
    if major == 0 {
        return 0;
    }
    let num = 2 * i128::from(k) * i128::from(minor) + i128::from(major) - i128::from(bias);
    (num / (2 * i128::from(major))) as i64
}
