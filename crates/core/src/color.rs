//! Color model - 24-bit RGB values, conversions and gradients
//!
//! [`Rgb`] is an immutable `Copy` value. Everything that can reject input
//! (hex parsing, gradients) returns [`Result`](crate::error::Result).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GlyphError, Result};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive, exactly 6 hex digits).
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_core::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
    /// assert_eq!(Rgb::from_hex("FF8000").unwrap(), Rgb::new(255, 128, 0));
    /// assert!(Rgb::from_hex("#fff").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GlyphError::invalid(format!(
                "malformed hex color {hex:?}: expected 6 hex digits"
            )));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| GlyphError::invalid(format!("malformed hex color {hex:?}: {e}")))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert HSV to RGB.
    ///
    /// `hue` is in degrees and wraps every 360; `saturation` and `value` are in `[0, 1]`
    /// and are clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_core::Rgb;
    ///
    /// assert_eq!(Rgb::from_hsv(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
    /// assert_eq!(Rgb::from_hsv(120.0, 1.0, 1.0), Rgb::new(0, 255, 0));
    /// assert_eq!(Rgb::from_hsv(600.0, 1.0, 1.0), Rgb::from_hsv(240.0, 1.0, 1.0));
    /// ```
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);

        let h = hue / 60.0;
        let sector = (h.floor() as i64).rem_euclid(6);
        let f = h - h.floor();

        let v255 = v * 255.0;
        let to_u8 = |x: f32| x.round().clamp(0.0, 255.0) as u8;
        let vv = to_u8(v255);
        let p = to_u8(v255 * (1.0 - s));
        let q = to_u8(v255 * (1.0 - f * s));
        let t = to_u8(v255 * (1.0 - (1.0 - f) * s));

        match sector {
            0 => Rgb::new(vv, t, p),
            1 => Rgb::new(q, vv, p),
            2 => Rgb::new(p, vv, t),
            3 => Rgb::new(p, q, vv),
            4 => Rgb::new(t, p, vv),
            _ => Rgb::new(vv, p, q),
        }
    }

    /// Euclidean distance in RGB space.
    pub fn distance(&self, other: &Rgb) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Linear interpolation per channel; `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, target: &Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, target.r), mix(self.g, target.g), mix(self.b, target.b))
    }

    /// Multi-stop gradient of exactly `steps` colors.
    ///
    /// The control colors split `[0, steps)` into `colors.len() - 1` contiguous
    /// segments of `steps / segments` entries, with one extra entry for each of
    /// the first `steps % segments` segments. The last element always equals the
    /// last control color exactly. With `steps < 2` the first two control colors
    /// are returned as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_core::Rgb;
    ///
    /// let g = Rgb::gradient(5, &[Rgb::BLACK, Rgb::WHITE]).unwrap();
    /// assert_eq!(g.len(), 5);
    /// assert_eq!(g[0], Rgb::BLACK);
    /// assert_eq!(g[4], Rgb::WHITE);
    /// ```
    pub fn gradient(steps: usize, colors: &[Rgb]) -> Result<Vec<Rgb>> {
        if colors.len() < 2 {
            return Err(GlyphError::invalid(format!(
                "gradient needs at least 2 colors, got {}",
                colors.len()
            )));
        }
        if steps < 2 {
            return Ok(vec![colors[0], colors[1]]);
        }

        let segments = colors.len() - 1;
        let base = steps / segments;
        let extra = steps % segments;

        let mut out = Vec::with_capacity(steps);
        for seg in 0..segments {
            let len = base + usize::from(seg < extra);
            let start = colors[seg];
            let end = colors[seg + 1];
            // The last segment lands on its end stop; earlier ones stop one short
            // because the next segment starts there.
            let denom = if seg + 1 == segments {
                len.saturating_sub(1).max(1)
            } else {
                len.max(1)
            };
            for i in 0..len {
                out.push(start.lerp(&end, i as f32 / denom as f32));
            }
        }

        if let Some(last) = out.last_mut() {
            *last = colors[segments];
        }
        Ok(out)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parse_accepts_both_forms_and_any_case() {
        assert_eq!(Rgb::from_hex("#1A2b3C").unwrap(), Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(Rgb::from_hex("1a2b3c").unwrap(), Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!("#ffffff".parse::<Rgb>().unwrap(), Rgb::WHITE);
    }

    #[test]
    fn hex_parse_rejects_malformed_input() {
        for bad in ["", "#", "#12345", "1234567", "#12345g", "##123456", "+12345"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(GlyphError::InvalidArgument(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn hex_round_trip_through_display() {
        let c = Rgb::new(1, 128, 255);
        assert_eq!(c.to_string(), "#0180ff");
        assert_eq!(c.to_string().parse::<Rgb>().unwrap(), c);
    }

    #[test]
    fn hsv_primary_and_secondary_hues() {
        assert_eq!(Rgb::from_hsv(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hsv(60.0, 1.0, 1.0), Rgb::new(255, 255, 0));
        assert_eq!(Rgb::from_hsv(180.0, 1.0, 1.0), Rgb::new(0, 255, 255));
        assert_eq!(Rgb::from_hsv(240.0, 1.0, 1.0), Rgb::new(0, 0, 255));
        assert_eq!(Rgb::from_hsv(300.0, 1.0, 1.0), Rgb::new(255, 0, 255));
        assert_eq!(Rgb::from_hsv(360.0, 1.0, 1.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn hsv_zero_saturation_is_gray() {
        assert_eq!(Rgb::from_hsv(123.0, 0.0, 0.5), Rgb::new(128, 128, 128));
        assert_eq!(Rgb::from_hsv(42.0, 0.7, 0.0), Rgb::BLACK);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Rgb::BLACK.distance(&Rgb::BLACK), 0.0);
        assert_eq!(Rgb::new(3, 4, 0).distance(&Rgb::BLACK), 5.0);
    }

    #[test]
    fn gradient_length_and_endpoints() {
        let a = Rgb::new(10, 200, 30);
        let b = Rgb::new(250, 3, 99);
        for steps in 2..40 {
            let g = Rgb::gradient(steps, &[a, b]).unwrap();
            assert_eq!(g.len(), steps);
            assert_eq!(g[0], a);
            assert_eq!(g[steps - 1], b);
        }
    }

    #[test]
    fn gradient_multi_stop_segments_hit_interior_stops() {
        let red = Rgb::new(255, 0, 0);
        let green = Rgb::new(0, 255, 0);
        let blue = Rgb::new(0, 0, 255);
        // 9 steps over 2 segments: lengths 5 and 4.
        let g = Rgb::gradient(9, &[red, green, blue]).unwrap();
        assert_eq!(g.len(), 9);
        assert_eq!(g[0], red);
        assert_eq!(g[5], green);
        assert_eq!(g[8], blue);
    }

    #[test]
    fn gradient_more_stops_than_steps_still_has_exact_length() {
        let stops = [Rgb::BLACK, Rgb::WHITE, Rgb::BLACK, Rgb::WHITE, Rgb::new(1, 2, 3)];
        let g = Rgb::gradient(3, &stops).unwrap();
        assert_eq!(g.len(), 3);
        assert_eq!(g[2], Rgb::new(1, 2, 3));
    }

    #[test]
    fn gradient_small_step_counts_return_first_two_stops() {
        let stops = [Rgb::new(1, 1, 1), Rgb::new(2, 2, 2), Rgb::new(3, 3, 3)];
        assert_eq!(Rgb::gradient(0, &stops).unwrap(), vec![stops[0], stops[1]]);
        assert_eq!(Rgb::gradient(1, &stops).unwrap(), vec![stops[0], stops[1]]);
    }

    #[test]
    fn gradient_requires_two_colors() {
        assert!(matches!(
            Rgb::gradient(10, &[Rgb::WHITE]),
            Err(GlyphError::InvalidArgument(_))
        ));
        assert!(matches!(Rgb::gradient(10, &[]), Err(GlyphError::InvalidArgument(_))));
    }
}
