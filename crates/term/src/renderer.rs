//! Frame encoding: turns a framebuffer into one escape-coded byte stream.
//!
//! Cells are written in row-major order. A foreground or background code is
//! only emitted when it differs from the previous cell's, and rows are joined
//! with `\r\n` (none after the last row). The stream starts at the home
//! position so each frame overwrites the previous one in place.

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};

use crate::core::{Palette, PaletteCache, Rgb};
use crate::fb::FrameBuffer;

/// How colors are addressed on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit `38;2;r;g;b` / `48;2;r;g;b` sequences.
    #[default]
    TrueColor,
    /// xterm 256-color indices.
    Ansi256,
    /// The 16 standard console colors.
    Ansi16,
}

impl ColorMode {
    /// Parse "truecolor"/"24bit", "256", "16" (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => Some(ColorMode::TrueColor),
            "256" | "ansi256" => Some(ColorMode::Ansi256),
            "16" | "ansi16" => Some(ColorMode::Ansi16),
            _ => None,
        }
    }
}

/// Stateful encoder; owns the palette cache for quantized modes.
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    mode: ColorMode,
    cache: Option<PaletteCache>,
}

impl FrameEncoder {
    pub fn new(mode: ColorMode) -> Self {
        let cache = match mode {
            ColorMode::TrueColor => None,
            ColorMode::Ansi256 => Some(PaletteCache::new(Palette::xterm256())),
            ColorMode::Ansi16 => Some(PaletteCache::new(Palette::ansi16())),
        };
        Self { mode, cache }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn cache(&self) -> Option<&PaletteCache> {
        self.cache.as_ref()
    }

    fn device_color(&mut self, rgb: Rgb) -> Color {
        match self.cache.as_mut() {
            Some(cache) => Color::AnsiValue(cache.nearest(rgb)),
            None => Color::Rgb {
                r: rgb.r,
                g: rgb.g,
                b: rgb.b,
            },
        }
    }

    /// Append the full frame to `out`.
    pub fn encode_into(&mut self, fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
        out.queue(cursor::MoveTo(0, 0))?;

        let width = fb.width() as usize;
        let cells = fb.cells();
        let mut current_fg: Option<Color> = None;
        let mut current_bg: Option<Color> = None;

        for (i, cell) in cells.iter().enumerate() {
            let fg = self.device_color(cell.fg);
            if current_fg != Some(fg) {
                out.queue(SetForegroundColor(fg))?;
                current_fg = Some(fg);
            }
            let bg = self.device_color(cell.bg);
            if current_bg != Some(bg) {
                out.queue(SetBackgroundColor(bg))?;
                current_bg = Some(bg);
            }
            out.queue(Print(cell.glyph))?;

            let n = i + 1;
            if n % width == 0 && n != cells.len() {
                out.queue(Print("\r\n"))?;
            }
        }

        out.queue(ResetColor)?;
        Ok(())
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new(ColorMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    fn encode(fb: &FrameBuffer, mode: ColorMode) -> String {
        let mut out = Vec::new();
        FrameEncoder::new(mode).encode_into(fb, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn uniform_frame_emits_each_color_once() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.clear(Cell::new('.', Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)));
        let s = encode(&fb, ColorMode::TrueColor);
        assert_eq!(s.matches("38;2;1;2;3").count(), 1);
        assert_eq!(s.matches("48;2;4;5;6").count(), 1);
        assert_eq!(s.matches('.').count(), 12);
    }

    #[test]
    fn rows_are_separated_but_not_terminated() {
        let mut fb = FrameBuffer::new(2, 3);
        fb.clear(Cell::new('x', Rgb::WHITE, Rgb::BLACK));
        let s = encode(&fb, ColorMode::TrueColor);
        assert_eq!(s.matches("\r\n").count(), 2);
        let body = s.trim_end_matches("\x1b[0m");
        assert!(body.ends_with('x'));
    }

    #[test]
    fn color_codes_follow_changes_only() {
        let mut fb = FrameBuffer::new(3, 1);
        let a = Rgb::new(10, 0, 0);
        let b = Rgb::new(0, 10, 0);
        fb.set(0, 0, Cell::new('a', a, Rgb::BLACK));
        fb.set(1, 0, Cell::new('b', b, Rgb::BLACK));
        fb.set(2, 0, Cell::new('c', b, Rgb::BLACK));
        let s = encode(&fb, ColorMode::TrueColor);
        assert_eq!(s.matches("38;2;10;0;0").count(), 1);
        assert_eq!(s.matches("38;2;0;10;0").count(), 1);
        assert_eq!(s.matches("48;2;").count(), 1);
        assert!(s.find('b').unwrap() < s.find('c').unwrap());
    }

    #[test]
    fn palette_modes_emit_indexed_colors() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.clear(Cell::new('x', Rgb::new(250, 5, 5), Rgb::BLACK));
        let s = encode(&fb, ColorMode::Ansi16);
        assert!(s.contains("38;5;9"));
        assert!(s.contains("48;5;0"));
        assert!(!s.contains("38;2;"));
    }

    #[test]
    fn palette_cache_is_owned_by_the_encoder() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.set(0, 0, Cell::new('x', Rgb::new(1, 1, 1), Rgb::BLACK));
        fb.set(1, 0, Cell::new('y', Rgb::new(2, 2, 2), Rgb::BLACK));
        let mut enc = FrameEncoder::new(ColorMode::Ansi256);
        let mut out = Vec::new();
        enc.encode_into(&fb, &mut out).unwrap();
        assert_eq!(enc.cache().map(|c| c.len()), Some(3));
        assert!(FrameEncoder::new(ColorMode::TrueColor).cache().is_none());
    }

    #[test]
    fn color_mode_parse() {
        assert_eq!(ColorMode::from_str("TrueColor"), Some(ColorMode::TrueColor));
        assert_eq!(ColorMode::from_str("256"), Some(ColorMode::Ansi256));
        assert_eq!(ColorMode::from_str(" 16 "), Some(ColorMode::Ansi16));
        assert_eq!(ColorMode::from_str("mono"), None);
    }
}
