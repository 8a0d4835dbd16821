//! Central-difference gradient field.
//!
//! Gradients are computed once from a [`ScalarField`] and stored per voxel
//! together with their magnitude. Only interior voxels are computed; every
//! voxel on a face of the grid keeps the zero gradient, so shading quality
//! degrades within one voxel of the boundary.

use std::time::Instant;

use tracing::debug;
use volvis_math::Lerp;

use crate::lattice::{self, Lattice};
use crate::{Dims, InterpolationMode, ScalarField, Vec3};

/// Gradient direction and its cached magnitude.
///
/// Interpolated gradients blend `magnitude` independently of `dir`, so for
/// a blended value `magnitude` need not equal `dir.length()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gradient {
    /// Unnormalised gradient vector
    pub dir: Vec3,
    /// Euclidean length of `dir` at lattice points
    pub magnitude: f32,
}

impl Gradient {
    /// Zero gradient, used for boundary voxels and outside the grid.
    pub const ZERO: Self = Self {
        dir: Vec3::ZERO,
        magnitude: 0.0,
    };

    /// Creates a gradient, computing its magnitude.
    #[inline]
    pub fn new(dir: Vec3) -> Self {
        Self {
            dir,
            magnitude: dir.length(),
        }
    }
}

impl Lerp for Gradient {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            dir: Lerp::lerp(self.dir, other.dir, t),
            magnitude: self.magnitude.lerp(other.magnitude, t),
        }
    }
}

/// Per-voxel gradients of a scalar field.
///
/// Holds no reference to the source field. Has its own interpolation mode;
/// [`InterpolationMode::Cubic`] reconstructs as [`InterpolationMode::Linear`].
///
/// # Example
///
/// ```rust
/// use volvis_volume::{Dims, GradientField, ScalarField};
///
/// let dims = Dims::new(4, 4, 4);
/// let mut samples = vec![0u16; dims.len()];
/// samples[dims.index(2, 2, 2)] = 100;
/// let field = ScalarField::new(samples, dims).unwrap();
///
/// let gradients = GradientField::from_scalar(&field);
/// assert_eq!(gradients.raw_gradient(1, 2, 2).dir.x, 50.0);
/// assert_eq!(gradients.raw_gradient(0, 2, 2).magnitude, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct GradientField {
    dims: Dims,
    cells: Vec<Gradient>,
    min_magnitude: f32,
    max_magnitude: f32,
    interpolation: InterpolationMode,
}

impl GradientField {
    /// Computes central differences over every interior voxel of `field`.
    ///
    /// `g = (v(i + 1) - v(i - 1)) / 2` along each axis. Single sequential
    /// pass, O(n).
    pub fn from_scalar(field: &ScalarField) -> Self {
        let start = Instant::now();
        let dims = field.dims();
        let cells = central_differences(field);

        let (min_magnitude, max_magnitude) = cells.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY),
            |(lo, hi), g| (lo.min(g.magnitude), hi.max(g.magnitude)),
        );

        debug!(
            %dims,
            min_magnitude,
            max_magnitude,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "gradient field computed"
        );

        Self {
            dims,
            cells,
            min_magnitude,
            max_magnitude,
            interpolation: InterpolationMode::default(),
        }
    }

    /// Sets the stored interpolation mode.
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }

    /// Grid extent, equal to the source field's.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Smallest stored magnitude (zero whenever the grid has a boundary).
    #[inline]
    pub fn min_magnitude(&self) -> f32 {
        self.min_magnitude
    }

    /// Largest stored magnitude.
    #[inline]
    pub fn max_magnitude(&self) -> f32 {
        self.max_magnitude
    }

    /// Stored interpolation mode, used by [`GradientField::gradient`].
    #[inline]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    /// Changes the stored interpolation mode.
    pub fn set_interpolation(&mut self, mode: InterpolationMode) {
        self.interpolation = mode;
    }

    /// All cells, x-fastest.
    pub fn cells(&self) -> &[Gradient] {
        &self.cells
    }

    /// Gradient at integer coordinates. Same contract as
    /// [`ScalarField::raw_value`].
    #[inline]
    pub fn raw_gradient(&self, x: usize, y: usize, z: usize) -> Gradient {
        debug_assert!(
            self.dims.contains(x, y, z),
            "voxel ({x}, {y}, {z}) outside {}",
            self.dims
        );
        self.cells[self.dims.index(x, y, z)]
    }

    /// Reconstructs the gradient at `coord` with the stored mode.
    #[inline]
    pub fn gradient(&self, coord: Vec3) -> Gradient {
        self.gradient_with(coord, self.interpolation)
    }

    /// Reconstructs the gradient at `coord` with an explicit mode.
    ///
    /// Nearest uses the half-voxel margin, Linear and Cubic the `[0, dim)`
    /// range; outside, [`Gradient::ZERO`] is returned.
    pub fn gradient_with(&self, coord: Vec3, mode: InterpolationMode) -> Gradient {
        match mode {
            InterpolationMode::NearestNeighbor => lattice::nearest(self, coord),
            InterpolationMode::Linear | InterpolationMode::Cubic => {
                lattice::trilinear(self, coord)
            }
        }
    }
}

impl Lattice for GradientField {
    type Value = Gradient;

    #[inline]
    fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    fn at(&self, x: usize, y: usize, z: usize) -> Gradient {
        self.raw_gradient(x, y, z)
    }
}

fn central_differences(field: &ScalarField) -> Vec<Gradient> {
    let dims = field.dims();
    let mut cells = vec![Gradient::ZERO; dims.len()];

    for z in 1..dims.z.saturating_sub(1) {
        for y in 1..dims.y.saturating_sub(1) {
            for x in 1..dims.x.saturating_sub(1) {
                let gx = (field.raw_value(x + 1, y, z) - field.raw_value(x - 1, y, z)) / 2.0;
                let gy = (field.raw_value(x, y + 1, z) - field.raw_value(x, y - 1, z)) / 2.0;
                let gz = (field.raw_value(x, y, z + 1) - field.raw_value(x, y, z - 1)) / 2.0;
                cells[dims.index(x, y, z)] = Gradient::new(Vec3::new(gx, gy, gz));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn spike() -> ScalarField {
        let dims = Dims::new(4, 4, 4);
        let mut samples = vec![0u16; dims.len()];
        samples[dims.index(2, 2, 2)] = 100;
        ScalarField::new(samples, dims).unwrap()
    }

    fn wavy() -> ScalarField {
        let dims = Dims::new(7, 6, 5);
        let mut samples = Vec::with_capacity(dims.len());
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    samples.push(((x * 13 + y * y * 5 + z * 31) % 97) as u16);
                }
            }
        }
        ScalarField::new(samples, dims).unwrap()
    }

    #[test]
    fn test_spike() {
        let g = GradientField::from_scalar(&spike());
        let at = g.raw_gradient(1, 2, 2);
        assert_eq!(at.dir, Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(at.magnitude, 50.0);
        assert_eq!(g.raw_gradient(2, 1, 2).dir, Vec3::new(0.0, 50.0, 0.0));
        assert_eq!(g.raw_gradient(2, 2, 2), Gradient::ZERO);
        assert_eq!(g.raw_gradient(0, 2, 2), Gradient::ZERO);
        assert_eq!(g.max_magnitude(), 50.0);
        assert_eq!(g.min_magnitude(), 0.0);
    }

    #[test]
    fn test_boundary_cells_zero() {
        let g = GradientField::from_scalar(&wavy());
        let dims = g.dims();
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    if dims.is_boundary(x, y, z) {
                        assert_eq!(g.raw_gradient(x, y, z), Gradient::ZERO);
                        let c = Vec3::new(x as f32, y as f32, z as f32);
                        assert_eq!(g.gradient_with(c, InterpolationMode::Linear).magnitude, 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_interior_matches_source() {
        let field = wavy();
        let g = GradientField::from_scalar(&field);
        let dims = field.dims();
        let v = |x: usize, y: usize, z: usize| field.samples()[dims.index(x, y, z)] as f32;
        for z in 1..dims.z - 1 {
            for y in 1..dims.y - 1 {
                for x in 1..dims.x - 1 {
                    let expected = Vec3::new(
                        (v(x + 1, y, z) - v(x - 1, y, z)) / 2.0,
                        (v(x, y + 1, z) - v(x, y - 1, z)) / 2.0,
                        (v(x, y, z + 1) - v(x, y, z - 1)) / 2.0,
                    );
                    let got = g.raw_gradient(x, y, z);
                    assert_eq!(got.dir, expected);
                    assert_eq!(got.magnitude, expected.length());
                }
            }
        }
    }

    #[test]
    fn test_thin_grid_all_zero() {
        let dims = Dims::new(2, 5, 5);
        let field = ScalarField::new((0..dims.len() as u16).collect(), dims).unwrap();
        let g = GradientField::from_scalar(&field);
        assert!(g.cells().iter().all(|c| *c == Gradient::ZERO));
        assert_eq!(g.max_magnitude(), 0.0);
    }

    #[test]
    fn test_linear_blends_magnitude() {
        let g = GradientField::from_scalar(&spike());
        // between (1,2,2) = (50,0,0) and (2,2,2) = 0
        let mid = g.gradient_with(Vec3::new(1.5, 2.0, 2.0), InterpolationMode::Linear);
        assert_abs_diff_eq!(mid.dir.x, 25.0, epsilon = 1e-5);
        assert_abs_diff_eq!(mid.magnitude, 25.0, epsilon = 1e-5);

        // (2,1,2) = (0,50,0) and (2,2,2) = 0, blended diagonally with (1,2,2)
        let diag = g.gradient_with(Vec3::new(1.5, 1.5, 2.0), InterpolationMode::Linear);
        assert_abs_diff_eq!(diag.magnitude, 25.0, epsilon = 1e-5);
        assert!(diag.dir.length() < diag.magnitude);
    }

    #[test]
    fn test_lerp_direction_tracks_magnitude() {
        // Along one axis the blended magnitude equals the blended component.
        for i in 1..200 {
            let a = Gradient::new(Vec3::new(0.1 * i as f32, 0.0, 0.0));
            let b = Gradient::new(Vec3::new(7.3 + 0.37 * i as f32, 0.0, 0.0));
            let t = (i as f32 * 0.137).fract();
            let g = a.lerp(b, t);
            assert_eq!(g.dir.x, g.magnitude, "i = {i}, t = {t}");
            assert_eq!(g.dir.x, a.magnitude.lerp(b.magnitude, t));
        }
    }

    #[test]
    fn test_cubic_aliases_linear() {
        let g = GradientField::from_scalar(&wavy());
        for c in [Vec3::new(2.3, 1.1, 3.7), Vec3::new(0.2, 4.9, 1.0), Vec3::new(-1.0, 2.0, 2.0)] {
            assert_eq!(
                g.gradient_with(c, InterpolationMode::Cubic),
                g.gradient_with(c, InterpolationMode::Linear)
            );
        }
    }

    #[test]
    fn test_nearest_margin() {
        let g = GradientField::from_scalar(&spike());
        let nn = InterpolationMode::NearestNeighbor;
        assert_eq!(g.gradient_with(Vec3::new(1.4, 2.2, 1.6), nn).dir.x, 50.0);
        assert_eq!(g.gradient_with(Vec3::new(3.6, 2.0, 2.0), nn), Gradient::ZERO);
        assert_eq!(g.gradient_with(Vec3::new(-0.6, 2.0, 2.0), nn), Gradient::ZERO);
    }

    #[test]
    fn test_stored_mode_independent() {
        let mut field = spike();
        field.set_interpolation(InterpolationMode::Cubic);
        let mut g = GradientField::from_scalar(&field);
        assert_eq!(g.interpolation(), InterpolationMode::Linear);
        g.set_interpolation(InterpolationMode::NearestNeighbor);
        assert_eq!(g.gradient(Vec3::new(1.2, 2.0, 2.0)).magnitude, 50.0);
        assert_eq!(field.interpolation(), InterpolationMode::Cubic);
    }
}
