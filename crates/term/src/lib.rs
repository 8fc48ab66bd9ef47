//! Terminal rendering layer.
//!
//! Drawing surfaces share one contract, the [`Canvas`] trait: a surface only
//! knows how to put a colored glyph at `(x, y)`, and lines, boxes, borders,
//! text and sprite blits are built on top of that once.
//!
//! Surfaces:
//! - [`ConsoleCanvas`]: framebuffer with dirty tracking; `render()` encodes the
//!   whole frame and writes it to an [`OutputSink`] in one call
//! - [`SpriteCanvas`]: draws straight into a [`Sprite`](crate::core::Sprite)
//!
//! Drawing is single-threaded: finish all draw calls for a frame, then render.

pub mod canvas;
pub mod config;
pub mod console;
pub mod fb;
pub mod first_person;
pub mod renderer;
pub mod sink;
pub mod sprite_canvas;

pub use glyphcast_core as core;
pub use glyphcast_types as types;

pub use canvas::Canvas;
pub use config::RenderConfig;
pub use console::ConsoleCanvas;
pub use fb::{Cell, FrameBuffer};
pub use first_person::{Camera, FirstPersonView};
pub use renderer::{ColorMode, FrameEncoder};
pub use sink::{OutputSink, TerminalSink};
pub use sprite_canvas::SpriteCanvas;
