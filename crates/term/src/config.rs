//! Render configuration.
//!
//! Configure with environment variables:
//!
//! - `GLYPHCAST_COLOR`: `truecolor` | `256` | `16` (default: `truecolor`)
//! - `GLYPHCAST_FPS`: target frame rate, 1..=240 (default: 30)
//! - `GLYPHCAST_LOG_PATH`: write logs to this file (default: no logging)

use std::env;
use std::time::Duration;

use crate::renderer::ColorMode;
use crate::types::{DEFAULT_TARGET_FPS, MAX_TARGET_FPS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub color_mode: ColorMode,
    pub target_fps: u32,
    pub log_path: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::TrueColor,
            target_fps: DEFAULT_TARGET_FPS,
            log_path: None,
        }
    }
}

impl RenderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let color_mode = match lookup("GLYPHCAST_COLOR") {
            Some(v) => ColorMode::from_str(&v).unwrap_or_else(|| {
                tracing::debug!(value = %v, "unknown GLYPHCAST_COLOR, using default");
                defaults.color_mode
            }),
            None => defaults.color_mode,
        };

        let target_fps = match lookup("GLYPHCAST_FPS") {
            Some(v) => match v.trim().parse::<u32>() {
                Ok(fps) if (1..=MAX_TARGET_FPS).contains(&fps) => fps,
                _ => {
                    tracing::debug!(value = %v, "invalid GLYPHCAST_FPS, using default");
                    defaults.target_fps
                }
            },
            None => defaults.target_fps,
        };

        let log_path = lookup("GLYPHCAST_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            color_mode,
            target_fps,
            log_path,
        }
    }

    /// Duration of one frame at the target rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}
