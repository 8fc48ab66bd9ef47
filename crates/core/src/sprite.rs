//! Sprite module - owned grid of colored glyphs
//!
//! A sprite stores three parallel row-major arrays (`index = y * width + x`):
//! glyphs, foreground colors and background colors. The size is fixed at
//! construction.
//!
//! Color-adjacency rule: a cell holding [`SOLID_GLYPH`] always has
//! `foreground == background`. Every setter re-establishes the rule for the
//! cell it touches.
//!
//! Coordinates are never an error. Out-of-range reads return a blank cell
//! (space on black), out-of-range writes are ignored.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{GlyphError, Result};
use crate::types::{Point, BLANK_GLYPH, SOLID_GLYPH};

/// One cell of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Pixel {
    /// Value returned for out-of-range reads.
    pub const BLANK: Pixel = Pixel {
        glyph: BLANK_GLYPH,
        fg: Rgb::BLACK,
        bg: Rgb::BLACK,
    };

    pub const fn new(glyph: char, fg: Rgb, bg: Rgb) -> Self {
        Self { glyph, fg, bg }
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Pixel::BLANK
    }
}

/// Raw sprite arrays for persistence outside the sprite itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteData {
    pub width: i32,
    pub height: i32,
    pub glyphs: Vec<char>,
    pub foreground: Vec<Rgb>,
    pub background: Vec<Rgb>,
}

impl SpriteData {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// 2D grid of (glyph, foreground, background) cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: i32,
    height: i32,
    glyphs: Vec<char>,
    fg: Vec<Rgb>,
    bg: Vec<Rgb>,
}

impl Sprite {
    /// Create a sprite of spaces.
    ///
    /// Fails with `InvalidArgument` when either dimension is not positive.
    pub fn new(width: i32, height: i32, fg: Rgb, bg: Rgb) -> Result<Self> {
        if width <= 0 || height <= 0 {
            tracing::debug!(width, height, "rejected sprite size");
            return Err(GlyphError::invalid(format!(
                "sprite size must be positive, got {width}x{height}"
            )));
        }
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            glyphs: vec![BLANK_GLYPH; len],
            fg: vec![fg; len],
            bg: vec![bg; len],
        })
    }

    /// Build a sprite from newline-delimited text art.
    ///
    /// Trailing empty lines are dropped and shorter rows are right-padded with
    /// spaces to the longest row. Fails with `InvalidArgument` when no
    /// non-empty line remains.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_core::{Rgb, Sprite};
    ///
    /// let s = Sprite::from_text("##\n#\n\n", Rgb::WHITE, Rgb::BLACK).unwrap();
    /// assert_eq!((s.width(), s.height()), (2, 2));
    /// assert_eq!(s.glyph(1, 1), ' ');
    /// ```
    pub fn from_text(text: &str, fg: Rgb, bg: Rgb) -> Result<Self> {
        let mut rows: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }

        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(GlyphError::invalid("sprite text has no non-empty lines"));
        }

        let mut sprite = Sprite::new(width as i32, rows.len() as i32, fg, bg)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let i = y * width + x;
                sprite.glyphs[i] = ch;
                sprite.normalize(i);
            }
        }
        Ok(sprite)
    }

    /// A block of solid glyphs in one color.
    pub fn solid(width: i32, height: i32, color: Rgb) -> Result<Self> {
        let mut sprite = Sprite::new(width, height, color, color)?;
        sprite.glyphs.fill(SOLID_GLYPH);
        Ok(sprite)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn foregrounds(&self) -> &[Rgb] {
        &self.fg
    }

    pub fn backgrounds(&self) -> &[Rgb] {
        &self.bg
    }

    #[inline(always)]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y).is_some()
    }

    // Color-adjacency rule, with the foreground as the source of truth.
    #[inline(always)]
    fn normalize(&mut self, i: usize) {
        if self.glyphs[i] == SOLID_GLYPH {
            self.bg[i] = self.fg[i];
        }
    }

    pub fn glyph_at(&self, index: usize) -> char {
        self.glyphs.get(index).copied().unwrap_or(BLANK_GLYPH)
    }

    pub fn set_glyph_at(&mut self, index: usize, glyph: char) {
        if index < self.glyphs.len() {
            self.glyphs[index] = glyph;
            self.normalize(index);
        }
    }

    pub fn glyph(&self, x: i32, y: i32) -> char {
        self.index_of(x, y)
            .map(|i| self.glyphs[i])
            .unwrap_or(BLANK_GLYPH)
    }

    pub fn set_glyph(&mut self, x: i32, y: i32, glyph: char) {
        if let Some(i) = self.index_of(x, y) {
            self.set_glyph_at(i, glyph);
        }
    }

    pub fn glyph_at_point(&self, p: Point) -> char {
        self.glyph(p.x, p.y)
    }

    pub fn set_glyph_at_point(&mut self, p: Point, glyph: char) {
        self.set_glyph(p.x, p.y, glyph);
    }

    pub fn foreground(&self, x: i32, y: i32) -> Rgb {
        self.index_of(x, y).map(|i| self.fg[i]).unwrap_or(Rgb::BLACK)
    }

    pub fn set_foreground(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index_of(x, y) {
            self.fg[i] = color;
            self.normalize(i);
        }
    }

    pub fn background(&self, x: i32, y: i32) -> Rgb {
        self.index_of(x, y).map(|i| self.bg[i]).unwrap_or(Rgb::BLACK)
    }

    /// Set the background; on a solid cell the foreground follows it.
    pub fn set_background(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index_of(x, y) {
            self.bg[i] = color;
            if self.glyphs[i] == SOLID_GLYPH {
                self.fg[i] = color;
            }
        }
    }

    pub fn foreground_at_point(&self, p: Point) -> Rgb {
        self.foreground(p.x, p.y)
    }

    pub fn set_foreground_at_point(&mut self, p: Point, color: Rgb) {
        self.set_foreground(p.x, p.y, color);
    }

    pub fn background_at_point(&self, p: Point) -> Rgb {
        self.background(p.x, p.y)
    }

    pub fn set_background_at_point(&mut self, p: Point, color: Rgb) {
        self.set_background(p.x, p.y, color);
    }

    pub fn pixel(&self, x: i32, y: i32) -> Pixel {
        match self.index_of(x, y) {
            Some(i) => Pixel::new(self.glyphs[i], self.fg[i], self.bg[i]),
            None => Pixel::BLANK,
        }
    }

    /// Write a whole cell at once; solid glyphs take the foreground color on both sides.
    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel) {
        if let Some(i) = self.index_of(x, y) {
            self.glyphs[i] = pixel.glyph;
            self.fg[i] = pixel.fg;
            self.bg[i] = pixel.bg;
            self.normalize(i);
        }
    }

    /// Recolor every foreground, and the background of solid cells.
    pub fn set_sprite_color(&mut self, color: Rgb) {
        self.fg.fill(color);
        for i in 0..self.glyphs.len() {
            self.normalize(i);
        }
    }

    /// Recolor every background, solid cells included.
    ///
    /// This deliberately leaves foregrounds alone; callers who need solid cells
    /// to stay uniform follow up with [`Sprite::set_sprite_color`].
    pub fn set_sprite_background(&mut self, color: Rgb) {
        self.bg.fill(color);
    }

    /// Iterate all cells as `(x, y, pixel)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Pixel)> + '_ {
        let w = self.width as usize;
        (0..self.glyphs.len()).map(move |i| {
            (
                (i % w) as i32,
                (i / w) as i32,
                Pixel::new(self.glyphs[i], self.fg[i], self.bg[i]),
            )
        })
    }

    /// Copy the raw arrays out.
    pub fn export(&self) -> SpriteData {
        SpriteData {
            width: self.width,
            height: self.height,
            glyphs: self.glyphs.clone(),
            foreground: self.fg.clone(),
            background: self.bg.clone(),
        }
    }

    /// Rebuild a sprite from raw arrays, copying them into fresh storage.
    ///
    /// Fails with `InvalidArgument` if the size is not positive or any array
    /// length differs from `width * height`.
    pub fn import(data: &SpriteData) -> Result<Self> {
        let mut sprite = Sprite::new(data.width, data.height, Rgb::BLACK, Rgb::BLACK)?;
        let len = sprite.len();
        if data.glyphs.len() != len || data.foreground.len() != len || data.background.len() != len
        {
            tracing::debug!(
                expected = len,
                glyphs = data.glyphs.len(),
                foreground = data.foreground.len(),
                background = data.background.len(),
                "rejected sprite data"
            );
            return Err(GlyphError::invalid(format!(
                "sprite arrays must all hold {len} cells"
            )));
        }

        sprite.glyphs.copy_from_slice(&data.glyphs);
        sprite.fg.copy_from_slice(&data.foreground);
        sprite.bg.copy_from_slice(&data.background);
        for i in 0..len {
            sprite.normalize(i);
        }
        Ok(sprite)
    }
}

impl TryFrom<&SpriteData> for Sprite {
    type Error = GlyphError;

    fn try_from(data: &SpriteData) -> Result<Self> {
        Sprite::import(data)
    }
}
