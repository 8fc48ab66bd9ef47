//! Canvas that draws straight into a [`Sprite`].
//!
//! Writes go through the sprite's own setters, so solid glyphs keep equal
//! colors. There is no dirty tracking and nothing to flush.

use crate::canvas::Canvas;
use crate::core::{Pixel, Rgb, Sprite};

pub struct SpriteCanvas<'a> {
    sprite: &'a mut Sprite,
}

impl<'a> SpriteCanvas<'a> {
    pub fn new(sprite: &'a mut Sprite) -> Self {
        Self { sprite }
    }

    pub fn sprite(&self) -> &Sprite {
        &*self.sprite
    }
}

impl Canvas for SpriteCanvas<'_> {
    fn width(&self) -> i32 {
        self.sprite.width()
    }

    fn height(&self) -> i32 {
        self.sprite.height()
    }

    fn draw(&mut self, x: i32, y: i32, glyph: char, fg: Rgb, bg: Rgb) {
        self.sprite.set_pixel(x, y, Pixel::new(glyph, fg, bg));
    }
}
