//! Terminal input: a per-frame key/mouse snapshot built from `crossterm`
//! events, plus the window-origin query used to make cursor positions
//! canvas-local.

pub mod map;
pub mod origin;
pub mod state;

pub use glyphcast_types as types;

pub use map::{normalize, should_quit};
pub use origin::{to_canvas, FixedOrigin, TerminalOrigin, WindowOrigin};
pub use state::{InputState, KeyState, MAX_TRACKED_KEYS};
