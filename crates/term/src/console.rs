//! Device-backed canvas with dirty tracking and a batched flush.
//!
//! Draw calls only touch the in-memory [`FrameBuffer`]. [`ConsoleCanvas::render`]
//! encodes the whole buffer and hands it to the sink in a single write, and
//! only when something changed since the previous flush.

use anyhow::Result;

use crate::canvas::Canvas;
use crate::core::Rgb;
use crate::fb::{Cell, FrameBuffer};
use crate::renderer::{ColorMode, FrameEncoder};
use crate::sink::OutputSink;

pub struct ConsoleCanvas<S: OutputSink> {
    fb: FrameBuffer,
    dirty: bool,
    encoder: FrameEncoder,
    sink: S,
    out: Vec<u8>,
}

impl<S: OutputSink> ConsoleCanvas<S> {
    /// Create a canvas of fixed size. It starts dirty so the first render
    /// paints the initial blank frame.
    pub fn new(width: u16, height: u16, sink: S, mode: ColorMode) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            fb: FrameBuffer::new(width, height),
            dirty: true,
            encoder: FrameEncoder::new(mode),
            sink,
            // Rough upper bound for a frame with a color change on most cells.
            out: Vec::with_capacity(len * 8 + 64),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the next render to flush even if nothing changed.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.fb.get(x, y)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn color_mode(&self) -> ColorMode {
        self.encoder.mode()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Flush the frame to the sink if it is dirty.
    ///
    /// On a write error the frame stays dirty and the error is returned; the
    /// caller decides whether the next frame should try again.
    pub fn render(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        self.out.clear();
        self.encoder.encode_into(&self.fb, &mut self.out)?;
        self.sink.write_frame(&self.out)?;
        tracing::trace!(bytes = self.out.len(), "flushed frame");
        self.dirty = false;
        Ok(())
    }
}

impl<S: OutputSink> Canvas for ConsoleCanvas<S> {
    fn width(&self) -> i32 {
        self.fb.width() as i32
    }

    fn height(&self) -> i32 {
        self.fb.height() as i32
    }

    fn draw(&mut self, x: i32, y: i32, glyph: char, fg: Rgb, bg: Rgb) {
        if self.fb.set(x, y, Cell::new(glyph, fg, bg)) {
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::types::{Alignment, Point};

    struct FailingSink;

    impl OutputSink for FailingSink {
        fn write_frame(&mut self, _bytes: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone"))
        }
    }

    fn canvas(w: u16, h: u16) -> ConsoleCanvas<Vec<u8>> {
        ConsoleCanvas::new(w, h, Vec::new(), ColorMode::TrueColor)
    }

    #[test]
    fn first_render_flushes_then_goes_clean() {
        let mut c = canvas(4, 2);
        assert!(c.is_dirty());
        c.render().unwrap();
        assert!(!c.is_dirty());
        let first = c.sink().len();
        assert!(first > 0);

        c.render().unwrap();
        assert_eq!(c.sink().len(), first, "clean canvas must not write");
    }

    #[test]
    fn draw_marks_dirty_only_on_change() {
        let mut c = canvas(4, 2);
        c.render().unwrap();

        c.draw(1, 1, 'x', Rgb::WHITE, Rgb::BLACK);
        assert!(c.is_dirty());
        c.render().unwrap();

        c.draw(1, 1, 'x', Rgb::WHITE, Rgb::BLACK);
        assert!(!c.is_dirty());

        c.draw(99, 99, 'x', Rgb::WHITE, Rgb::BLACK);
        assert!(!c.is_dirty());
    }

    #[test]
    fn invalidate_forces_a_flush() {
        let mut c = canvas(2, 2);
        c.render().unwrap();
        let before = c.sink().len();
        c.invalidate();
        c.render().unwrap();
        assert_eq!(c.sink().len(), before * 2);
    }

    #[test]
    fn each_render_is_one_write() {
        let mut c = canvas(3, 2);
        c.draw_string(0, 0, "abc", Rgb::WHITE, Rgb::BLACK, Alignment::Left);
        c.draw_line(Point::new(0, 1), Point::new(2, 1), '-', Rgb::WHITE, Rgb::BLACK);
        c.render().unwrap();
        let text = String::from_utf8(c.into_sink()).unwrap();
        assert!(text.contains("abc\r\n"));
        assert!(text.contains("---"));
    }

    #[test]
    fn write_errors_propagate_and_keep_frame_dirty() {
        let mut c = ConsoleCanvas::new(2, 2, FailingSink, ColorMode::TrueColor);
        c.draw(0, 0, 'x', Rgb::WHITE, Rgb::BLACK);
        let err = c.render().unwrap_err();
        assert!(err.to_string().contains("device gone"));
        assert!(c.is_dirty());
    }

    #[test]
    fn cells_are_readable() {
        let mut c = canvas(3, 3);
        c.draw(2, 2, 'q', Rgb::WHITE, Rgb::BLACK);
        assert_eq!(c.cell(2, 2), Some(Cell::new('q', Rgb::WHITE, Rgb::BLACK)));
        assert_eq!(c.cell(3, 3), None);
    }
}
