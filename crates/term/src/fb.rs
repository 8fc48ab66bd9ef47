//! Framebuffer of colored glyph cells for device-backed canvases.

use crate::core::Rgb;

/// A single device cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    pub const fn new(glyph: char, fg: Rgb, bg: Rgb) -> Self {
        Self { glyph, fg, bg }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::BLACK,
        }
    }
}

/// 2D framebuffer, row-major, fixed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Store `cell`, returning whether the stored value changed.
    ///
    /// Out-of-range writes are ignored and report no change.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.idx(x, y) {
            Some(i) if self.cells[i] != cell => {
                self.cells[i] = cell;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }
}
