//! FirstPersonView: projects a tile map into a pseudo-3D column render.
//!
//! This module is pure (no I/O). It draws into any [`Canvas`], so it can be
//! unit-tested against a sprite canvas.
//!
//! Each screen column casts one ray. The hit distance (corrected for fish-eye)
//! sets the wall slice height; rows above are ceiling and rows below are floor,
//! both shaded with vertical gradients.

use anyhow::Result;
use glam::Vec2;

use crate::canvas::Canvas;
use crate::core::{cast, Rgb, Sprite};
use crate::types::{Rect, MAX_RAY_DEPTH, SOLID_GLYPH, WALL_GLYPH};

/// Wall glyphs from nearest to farthest.
const WALL_SHADES: [char; 4] = [SOLID_GLYPH, '▓', '▒', '░'];

/// Viewer position and orientation in map space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    /// Radians; 0 looks along +x, positive turns towards +y.
    pub heading: f32,
    /// Horizontal field of view in radians.
    pub fov: f32,
}

impl Camera {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading,
            fov: std::f32::consts::FRAC_PI_3,
        }
    }

    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.heading.cos(), self.heading.sin())
    }

    pub fn turn(&mut self, radians: f32) {
        self.heading = (self.heading + radians).rem_euclid(std::f32::consts::TAU);
    }

    /// Move along the heading, refusing to step into a cell holding `blocking`.
    ///
    /// Each axis is checked separately so the camera slides along walls.
    /// Returns whether the camera moved at all.
    pub fn walk(&mut self, map: &Sprite, distance: f32, blocking: char) -> bool {
        let delta = self.forward() * distance;
        let mut moved = false;

        let next_x = Vec2::new(self.position.x + delta.x, self.position.y);
        if !blocked(map, next_x, blocking) {
            self.position = next_x;
            moved |= delta.x != 0.0;
        }
        let next_y = Vec2::new(self.position.x, self.position.y + delta.y);
        if !blocked(map, next_y, blocking) {
            self.position = next_y;
            moved |= delta.y != 0.0;
        }
        moved
    }
}

fn blocked(map: &Sprite, p: Vec2, blocking: char) -> bool {
    map.glyph(p.x.floor() as i32, p.y.floor() as i32) == blocking
}

/// Column renderer configuration.
#[derive(Debug, Clone)]
pub struct FirstPersonView {
    pub blocking: char,
    /// Angular tolerance (radians) for drawing a seam at a tile corner.
    pub seam_tolerance: f32,
    pub wall: Rgb,
    pub seam: Rgb,
    pub ceiling_top: Rgb,
    pub horizon: Rgb,
    pub floor_bottom: Rgb,
}

impl Default for FirstPersonView {
    fn default() -> Self {
        Self {
            blocking: WALL_GLYPH,
            seam_tolerance: 0.01,
            wall: Rgb::new(200, 190, 170),
            seam: Rgb::new(40, 36, 30),
            ceiling_top: Rgb::new(20, 24, 48),
            horizon: Rgb::new(8, 8, 10),
            floor_bottom: Rgb::new(70, 60, 40),
        }
    }
}

impl FirstPersonView {
    /// Render the view of `map` from `camera` into `area` of `canvas`.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        map: &Sprite,
        camera: &Camera,
        area: Rect,
    ) -> Result<()> {
        if area.width <= 0 || area.height <= 0 {
            return Ok(());
        }

        let h = area.height;
        let half = h / 2;
        let ceiling = Rgb::gradient(half.max(0) as usize, &[self.ceiling_top, self.horizon])?;
        let floor = Rgb::gradient((h - half) as usize, &[self.horizon, self.floor_bottom])?;

        for col in 0..area.width {
            let ray_angle =
                camera.heading - camera.fov / 2.0 + camera.fov * (col as f32 / area.width as f32);
            let dir = Vec2::new(ray_angle.cos(), ray_angle.sin());
            let info = cast(map, camera.position, dir, self.blocking, self.seam_tolerance);

            let (wall_top, wall_bottom) = if info.hit {
                let corrected = (info.distance * (ray_angle - camera.heading).cos()).max(0.1);
                let wall_h = (h as f32 / corrected).min(h as f32);
                let top = ((h as f32 - wall_h) / 2.0).round() as i32;
                (top, h - top)
            } else {
                (half, half)
            };

            let (glyph, fg) = if info.hit_boundary {
                (SOLID_GLYPH, self.seam)
            } else {
                let depth = (info.distance / MAX_RAY_DEPTH).clamp(0.0, 1.0);
                let shade = ((depth * WALL_SHADES.len() as f32) as usize).min(WALL_SHADES.len() - 1);
                (WALL_SHADES[shade], self.wall.lerp(&Rgb::BLACK, depth))
            };

            let x = area.x + col;
            for row in 0..h {
                let y = area.y + row;
                if row < wall_top {
                    let c = ceiling.get(row as usize).copied().unwrap_or(self.horizon);
                    canvas.draw(x, y, ' ', c, c);
                } else if row >= wall_bottom {
                    let c = floor
                        .get((row - half) as usize)
                        .copied()
                        .unwrap_or(self.floor_bottom);
                    canvas.draw(x, y, ' ', c, c);
                } else {
                    canvas.draw(x, y, glyph, fg, Rgb::BLACK);
                }
            }
        }
        Ok(())
    }
}
