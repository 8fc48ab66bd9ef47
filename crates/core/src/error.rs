//! Error taxonomy for the pure core.
//!
//! Only malformed input is an error here. Out-of-range coordinates are not:
//! sprite reads return a blank value and writes are ignored.

/// Errors produced by color, sprite and persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum GlyphError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("sprite serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GlyphError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GlyphError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GlyphError>;
