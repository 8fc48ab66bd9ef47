//! Grid raycasting (DDA) against a sprite used as a tile map.
//!
//! Map cells are unit squares: cell `(cx, cy)` covers `[cx, cx + 1) x [cy, cy + 1)`
//! in world space. A ray walks cell boundaries one at a time, always advancing
//! along the axis whose next boundary is closer, until it enters a cell holding
//! the blocking glyph or travels further than [`MAX_RAY_DEPTH`].

use glam::{IVec2, Vec2};

use crate::sprite::Sprite;
use crate::types::MAX_RAY_DEPTH;

/// Result of a single cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastInfo {
    /// A blocking cell was reached within the maximum depth.
    pub hit: bool,
    /// The ray struck close (angularly) to one of the two nearest corners of the hit cell.
    pub hit_boundary: bool,
    /// Distance travelled along the ray. At least `MAX_RAY_DEPTH` when nothing was hit.
    pub distance: f32,
    /// World-space end point: `origin + direction * distance`.
    pub intersection: Vec2,
}

impl RaycastInfo {
    fn miss(origin: Vec2, direction: Vec2, distance: f32) -> Self {
        Self {
            hit: false,
            hit_boundary: false,
            distance,
            intersection: origin + direction * distance,
        }
    }
}

/// Cast a ray from `origin` along `direction` through `map`.
///
/// `direction` is normalized before use; a zero vector never hits, and neither
/// does a non-finite origin or one further than `MAX_RAY_DEPTH` from the map. Zero components are valid and make that axis unreachable
/// (infinite step).
/// `boundary_tolerance` is in radians.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use glyphcast_core::{cast, Rgb, Sprite};
///
/// let map = Sprite::from_text("#####\n#   #\n#####", Rgb::WHITE, Rgb::BLACK).unwrap();
/// let info = cast(&map, Vec2::new(1.5, 1.5), Vec2::X, '#', 0.0);
/// assert!(info.hit);
/// assert!((info.distance - 2.5).abs() < 1e-5);
/// ```
pub fn cast(
    map: &Sprite,
    origin: Vec2,
    direction: Vec2,
    blocking: char,
    boundary_tolerance: f32,
) -> RaycastInfo {
    let dir = direction.normalize_or_zero();
    if dir == Vec2::ZERO || !within_reach(map, origin) {
        return RaycastInfo::miss(origin, dir, MAX_RAY_DEPTH);
    }

    // Length of ray travelled per unit step along each axis. Division by a zero
    // component yields +inf, which only ever takes part in comparisons.
    let unit_step = Vec2::new(
        (1.0 + (dir.y / dir.x) * (dir.y / dir.x)).sqrt(),
        (1.0 + (dir.x / dir.y) * (dir.x / dir.y)).sqrt(),
    );

    let mut cell = IVec2::new(origin.x.floor() as i32, origin.y.floor() as i32);
    let mut step = IVec2::ZERO;
    let mut ray_len = Vec2::splat(f32::INFINITY);

    if dir.x < 0.0 {
        step.x = -1;
        ray_len.x = (origin.x - cell.x as f32) * unit_step.x;
    } else if dir.x > 0.0 {
        step.x = 1;
        ray_len.x = (cell.x as f32 + 1.0 - origin.x) * unit_step.x;
    }
    if dir.y < 0.0 {
        step.y = -1;
        ray_len.y = (origin.y - cell.y as f32) * unit_step.y;
    } else if dir.y > 0.0 {
        step.y = 1;
        ray_len.y = (cell.y as f32 + 1.0 - origin.y) * unit_step.y;
    }

    let mut distance: f32;
    loop {
        if ray_len.x < ray_len.y {
            cell.x = cell.x.saturating_add(step.x);
            distance = ray_len.x;
            ray_len.x += unit_step.x;
        } else {
            cell.y = cell.y.saturating_add(step.y);
            distance = ray_len.y;
            ray_len.y += unit_step.y;
        }

        if distance > MAX_RAY_DEPTH {
            return RaycastInfo::miss(origin, dir, distance);
        }
        if map.glyph(cell.x, cell.y) == blocking {
            break;
        }
    }

    RaycastInfo {
        hit: true,
        hit_boundary: near_corner(origin, dir, cell, boundary_tolerance),
        distance,
        intersection: origin + dir * distance,
    }
}

/// A ray can only hit when it starts within `MAX_RAY_DEPTH` of the map.
fn within_reach(map: &Sprite, origin: Vec2) -> bool {
    let reach = Vec2::splat(MAX_RAY_DEPTH);
    let lo = -reach;
    let hi = map.size().as_vec2() + reach;
    origin.is_finite() && !origin.cmplt(lo).any() && !origin.cmpgt(hi).any()
}

/// True when the angle between `dir` and either of the two corners of `cell`
/// nearest to `origin` is below `tolerance`.
fn near_corner(origin: Vec2, dir: Vec2, cell: IVec2, tolerance: f32) -> bool {
    let base = cell.as_vec2();
    let mut corners: [(f32, f32); 4] = [(0.0, 0.0); 4];
    for (i, offset) in [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
    ]
    .into_iter()
    .enumerate()
    {
        let v = base + offset - origin;
        corners[i] = (v.length(), v.normalize_or_zero().dot(dir));
    }
    corners.sort_by(|a, b| a.0.total_cmp(&b.0));

    corners[..2]
        .iter()
        .any(|&(_, cos)| cos.clamp(-1.0, 1.0).acos() < tolerance)
}
