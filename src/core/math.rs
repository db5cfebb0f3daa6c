//! Planar vector primitives for the geometric inference chain.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D vector. Units depend on context: degree space for directions,
/// local meters wherever true distances matter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector along +x, the documented fallback for every degenerate
    /// direction in the pipeline.
    pub const UNIT_X: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    #[inline]
    pub fn dot(&self, other: &Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// 2D cross product (z component).
    #[inline]
    pub fn cross(&self, other: &Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Normalize, substituting `(1, 0)` when the norm is below `eps`.
    #[inline]
    pub fn normalized_or_unit_x(&self, eps: f64) -> Vec2 {
        let n = self.norm();
        if n < eps {
            Vec2::UNIT_X
        } else {
            Vec2::new(self.x / n, self.y / n)
        }
    }

    /// Rotate +90° counter-clockwise: the "left of travel" direction.
    #[inline]
    pub fn left(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

/// Rotate a vector counter-clockwise by an angle in degrees.
#[inline]
pub fn rotate_deg(v: Vec2, angle_deg: f64) -> Vec2 {
    let (s, c) = angle_deg.to_radians().sin_cos();
    Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
}

/// Intersect a ray with an infinite line.
///
/// Ray: origin `r0`, direction `rd` (need not be unit length).
/// Line: point `p0`, direction `d`.
///
/// Returns None when the ray is parallel to the line (determinant below
/// 1e-9) or the intersection lies behind the ray origin (t < 0).
pub fn ray_line_intersection(r0: Vec2, rd: Vec2, p0: Vec2, d: Vec2) -> Option<Vec2> {
    let denom = rd.cross(&d);
    if denom.abs() < 1e-9 {
        return None;
    }
    let diff = p0 - r0;
    let t = diff.cross(&d) / denom;
    if t < 0.0 {
        return None;
    }
    Some(r0 + rd * t)
}

/// Perpendicular distance from point `p` to the infinite line through `p0`
/// with unit direction `d`.
#[inline]
pub fn point_to_line_distance(p: Vec2, p0: Vec2, d: Vec2) -> f64 {
    let v = p - p0;
    let foot = p0 + d * v.dot(&d);
    (p - foot).norm()
}
