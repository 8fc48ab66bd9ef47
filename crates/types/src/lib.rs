//! Shared types module - plain data structures and constants
//!
//! This module defines the value types used throughout the engine. Nothing here
//! performs I/O, so the types are usable from the pure core (sprites, raycasting),
//! the terminal layer, and input handling alike.
//!
//! # Coordinates
//!
//! All cell coordinates are signed integers with the origin at the top-left:
//!
//! - **x** grows to the right
//! - **y** grows downwards
//! - Negative or overflowing coordinates are legal inputs everywhere; reads
//!   return a blank value and writes are ignored.
//!
//! # Glyph Constants
//!
//! | Constant | Glyph | Meaning |
//! |----------|-------|---------|
//! | `BLANK_GLYPH` | `' '` | Empty cell, sprite transparency key |
//! | `SOLID_GLYPH` | `'█'` | Full block; foreground and background are kept equal |
//! | `WALL_GLYPH` | `'#'` | Default impassable map tile |
//!
//! # Examples
//!
//! ```
//! use glyphcast_types::{Alignment, Point, Rect};
//!
//! let rect = Rect::new(2, 3, 4, 5);
//! assert_eq!(rect.max(), Point::new(6, 8));
//! assert!(rect.contains(Point::new(2, 3)));
//! assert!(!rect.contains(Point::new(6, 3)));
//!
//! assert_eq!(Alignment::from_str("center"), Some(Alignment::Centered));
//! ```

use serde::{Deserialize, Serialize};

/// Integer cell coordinate (x, y).
pub type Point = glam::IVec2;

/// Empty cell glyph. Sprite blits skip cells holding it.
pub const BLANK_GLYPH: char = ' ';

/// Full block glyph. Cells holding it always have `fg == bg`.
pub const SOLID_GLYPH: char = '█';

/// Default impassable glyph for tile maps.
pub const WALL_GLYPH: char = '#';

/// Border glyphs used by `draw_border`.
pub const BORDER_HORIZONTAL: char = '─';
pub const BORDER_VERTICAL: char = '│';
pub const BORDER_TOP_LEFT: char = '┌';
pub const BORDER_TOP_RIGHT: char = '┐';
pub const BORDER_BOTTOM_LEFT: char = '└';
pub const BORDER_BOTTOM_RIGHT: char = '┘';

/// Maximum distance (in map cells) a ray travels before giving up.
pub const MAX_RAY_DEPTH: f32 = 20.0;

/// Default frame rate target for the render loop.
pub const DEFAULT_TARGET_FPS: u32 = 30;

/// Upper bound accepted for the frame rate target.
pub const MAX_TARGET_FPS: u32 = 240;

/// Axis-aligned rectangle given by its top-left corner and size.
///
/// The covered area is half-open: `[x, x + width) x [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its inclusive top-left and exclusive bottom-right corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_types::{Point, Rect};
    ///
    /// let r = Rect::from_corners(Point::new(-5, -5), Point::new(20, 20));
    /// assert_eq!(r, Rect::new(-5, -5, 25, 25));
    /// ```
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Exclusive bottom-right corner.
    pub fn max(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }
}

/// Horizontal anchoring for text drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    /// Text starts at `x`.
    #[default]
    Left,
    /// Text starts at `x - len / 2` (integer division).
    Centered,
    /// Text starts at `x - len`.
    Right,
}

impl Alignment {
    /// Parse alignment from string (case-insensitive)
    ///
    /// Accepts "left", "center"/"centered"/"centre", "right".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Alignment::Left),
            "center" | "centered" | "centre" => Some(Alignment::Centered),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }

    /// Offset applied to the start column for a string of `len` glyphs.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_types::Alignment;
    ///
    /// assert_eq!(Alignment::Left.start_offset(5), 0);
    /// assert_eq!(Alignment::Centered.start_offset(5), -2);
    /// assert_eq!(Alignment::Right.start_offset(5), -5);
    /// ```
    pub fn start_offset(&self, len: i32) -> i32 {
        match self {
            Alignment::Left => 0,
            Alignment::Centered => -(len / 2),
            Alignment::Right => -len,
        }
    }
}
