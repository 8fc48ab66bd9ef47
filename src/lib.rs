//! Glyphcast (workspace facade crate).
//!
//! This package exposes `glyphcast::{core,input,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use glyphcast_core as core;
pub use glyphcast_input as input;
pub use glyphcast_term as term;
pub use glyphcast_types as types;
