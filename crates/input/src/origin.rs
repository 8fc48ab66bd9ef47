//! Window-origin query and cursor translation.
//!
//! The only thing the engine needs from the windowing layer is where the
//! rendering window's top-left corner sits on screen, so absolute cursor
//! positions can be made canvas-local.

use crate::types::Point;

pub trait WindowOrigin {
    /// Screen-space coordinates of the window's top-left corner.
    fn window_origin(&self) -> Point;
}

/// Terminals report mouse positions in cells relative to the window already.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalOrigin;

impl WindowOrigin for TerminalOrigin {
    fn window_origin(&self) -> Point {
        Point::ZERO
    }
}

/// Fixed origin, for windowed hosts that look the value up once.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrigin(pub Point);

impl WindowOrigin for FixedOrigin {
    fn window_origin(&self) -> Point {
        self.0
    }
}

/// Convert an absolute screen position into canvas cell coordinates.
///
/// `cell_size` is the size of one cell in screen units; components below 1
/// are treated as 1.
pub fn to_canvas(absolute: Point, origin: &impl WindowOrigin, cell_size: Point) -> Point {
    let cell = cell_size.max(Point::ONE);
    (absolute - origin.window_origin()).div_euclid(cell)
}
