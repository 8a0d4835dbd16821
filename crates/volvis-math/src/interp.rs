//! Linear interpolation over one, two and three axes.
//!
//! The multi-axis helpers are generic over [`Lerp`] so the same blending
//! order is used for scalar intensities and for gradient cells:
//! x first, then y, then z.
//!
//! # Usage
//!
//! ```rust
//! use volvis_math::{bilerp, lerp};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
//!
//! // c00, c10, c01, c11 at the corners of a unit square
//! let v = bilerp(0.0, 10.0, 20.0, 30.0, 0.5, 0.5);
//! assert_eq!(v, 15.0);
//! ```

use glam::Vec3;

/// A value that can be blended linearly between two endpoints.
///
/// `a.lerp(b, 0.0)` must return `a` exactly, so that interpolation at
/// lattice points reproduces the stored samples.
pub trait Lerp: Copy {
    /// Blends from `self` (at `t = 0`) towards `other` (at `t = 1`).
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        lerp(self, other, t)
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
///
/// # Formula
///
/// `a + (b - a) * t`
///
/// # Example
///
/// ```rust
/// use volvis_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
/// assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Bilinear interpolation over the four corners of a unit square.
///
/// Corners are named `c<x><y>`. Blends along x on both rows, then along y.
#[inline]
pub fn bilerp<T: Lerp>(c00: T, c10: T, c01: T, c11: T, tx: f32, ty: f32) -> T {
    let bottom = c00.lerp(c10, tx);
    let top = c01.lerp(c11, tx);
    bottom.lerp(top, ty)
}

/// Trilinear interpolation over the eight corners of a unit cube.
///
/// Corner `i` sits at offset `(i & 1, (i >> 1) & 1, (i >> 2) & 1)`, i.e.
/// x varies fastest, matching the flat voxel layout.
///
/// Four blends along x, two along y, one along z.
///
/// # Example
///
/// ```rust
/// use volvis_math::trilerp;
///
/// let corners = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0];
/// assert_eq!(trilerp(&corners, [0.5, 0.0, 0.0]), 5.0);
/// assert_eq!(trilerp(&corners, [0.0, 0.0, 1.0]), 40.0);
/// ```
#[inline]
pub fn trilerp<T: Lerp>(c: &[T; 8], t: [f32; 3]) -> T {
    let [tx, ty, tz] = t;
    let front = bilerp(c[0], c[1], c[2], c[3], tx, ty);
    let back = bilerp(c[4], c[5], c[6], c[7], tx, ty);
    front.lerp(back, tz)
}
