//! Core rendering model - pure, deterministic, and testable
//!
//! This crate contains the data model and algorithms of the engine. It has
//! **no dependencies** on terminals or other devices, making it:
//!
//! - **Deterministic**: the same inputs always produce the same sprites and rays
//! - **Testable**: every operation is a plain function or method on owned data
//! - **Portable**: usable from a terminal canvas, a sprite canvas or headless tools
//!
//! # Module Structure
//!
//! - [`color`]: 24-bit RGB values, hex/HSV conversion, gradients
//! - [`palette`]: nearest-color quantization with an explicitly owned cache
//! - [`sprite`]: owned glyph grids with the solid-glyph color-adjacency rule
//! - [`raycast`]: DDA grid traversal against a sprite used as a tile map
//! - [`error`]: error taxonomy for malformed input
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use glyphcast_core::{cast, Rgb, Sprite};
//! use glyphcast_core::types::WALL_GLYPH;
//!
//! let map = Sprite::from_text(
//!     "#######\n#     #\n#######",
//!     Rgb::WHITE,
//!     Rgb::BLACK,
//! )
//! .unwrap();
//!
//! let info = cast(&map, Vec2::new(1.5, 1.5), Vec2::X, WALL_GLYPH, 0.05);
//! assert!(info.hit);
//! assert!((info.distance - 4.5).abs() < 1e-4);
//! ```

pub mod color;
pub mod error;
pub mod palette;
pub mod raycast;
pub mod sprite;

pub use glyphcast_types as types;

// Re-export commonly used types for convenience
pub use color::Rgb;
pub use error::{GlyphError, Result};
pub use palette::{Palette, PaletteCache};
pub use raycast::{cast, RaycastInfo};
pub use sprite::{Pixel, Sprite, SpriteData};
