//! Palette quantization for devices that cannot address arbitrary RGB.
//!
//! A [`PaletteCache`] owns both the palette and the memo of nearest-color
//! lookups, so two encoders never share hidden state.

use std::collections::HashMap;

use crate::color::Rgb;

/// The 16 standard console colors, in ANSI index order.
const ANSI16: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(128, 0, 0),
    Rgb::new(0, 128, 0),
    Rgb::new(128, 128, 0),
    Rgb::new(0, 0, 128),
    Rgb::new(128, 0, 128),
    Rgb::new(0, 128, 128),
    Rgb::new(192, 192, 192),
    Rgb::new(128, 128, 128),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

/// Channel levels of the xterm 6x6x6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Ordered set of device colors addressed by `u8` index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette from explicit entries. At most 256 entries are kept.
    pub fn new(colors: impl IntoIterator<Item = Rgb>) -> Self {
        Self {
            colors: colors.into_iter().take(256).collect(),
        }
    }

    pub fn ansi16() -> Self {
        Self::new(ANSI16)
    }

    /// 16 system colors, the 6x6x6 cube (indices 16..232), then 24 grays.
    pub fn xterm256() -> Self {
        let mut colors = Vec::with_capacity(256);
        colors.extend_from_slice(&ANSI16);
        for r in CUBE_LEVELS {
            for g in CUBE_LEVELS {
                for b in CUBE_LEVELS {
                    colors.push(Rgb::new(r, g, b));
                }
            }
        }
        for i in 0..24u8 {
            let level = 8 + i * 10;
            colors.push(Rgb::new(level, level, level));
        }
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.colors.get(index as usize).copied()
    }

    /// Index of the entry closest to `color` (lowest index on ties).
    ///
    /// Returns 0 for an empty palette.
    pub fn nearest_uncached(&self, color: Rgb) -> u8 {
        let mut best = 0usize;
        let mut best_dist = f32::INFINITY;
        for (i, c) in self.colors.iter().enumerate() {
            let d = color.distance(c);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        best as u8
    }
}

/// Memoizing nearest-color lookup over an owned [`Palette`].
#[derive(Debug, Clone)]
pub struct PaletteCache {
    palette: Palette,
    memo: HashMap<Rgb, u8>,
}

impl PaletteCache {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            memo: HashMap::new(),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index nearest to `color`, computed once per distinct color.
    pub fn nearest(&mut self, color: Rgb) -> u8 {
        let palette = &self.palette;
        *self
            .memo
            .entry(color)
            .or_insert_with(|| palette.nearest_uncached(color))
    }

    /// Number of memoized colors.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    pub fn clear(&mut self) {
        self.memo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xterm256_layout() {
        let p = Palette::xterm256();
        assert_eq!(p.len(), 256);
        assert_eq!(p.get(16), Some(Rgb::new(0, 0, 0)));
        assert_eq!(p.get(231), Some(Rgb::new(255, 255, 255)));
        assert_eq!(p.get(232), Some(Rgb::new(8, 8, 8)));
        assert_eq!(p.get(255), Some(Rgb::new(238, 238, 238)));
    }

    #[test]
    fn exact_palette_colors_map_to_themselves() {
        let p = Palette::ansi16();
        for i in 0..16u8 {
            let c = p.get(i).unwrap();
            assert_eq!(p.nearest_uncached(c), i);
        }
    }

    #[test]
    fn nearest_picks_closest_entry() {
        let p = Palette::ansi16();
        assert_eq!(p.nearest_uncached(Rgb::new(250, 10, 5)), 9);
        assert_eq!(p.nearest_uncached(Rgb::new(20, 20, 20)), 0);
    }

    #[test]
    fn cache_memoizes_each_distinct_color_once() {
        let mut cache = PaletteCache::new(Palette::ansi16());
        assert!(cache.is_empty());

        let a = cache.nearest(Rgb::new(250, 10, 5));
        let b = cache.nearest(Rgb::new(250, 10, 5));
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);

        cache.nearest(Rgb::new(1, 2, 3));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn independent_caches_do_not_share_state() {
        let mut a = PaletteCache::new(Palette::ansi16());
        let b = PaletteCache::new(Palette::ansi16());
        a.nearest(Rgb::WHITE);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 0);
    }
}
