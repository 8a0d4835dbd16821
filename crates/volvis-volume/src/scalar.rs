//! Scalar intensity field.
//!
//! A [`ScalarField`] owns a flat `u16` voxel buffer together with its
//! statistics and answers point queries at continuous coordinates using one
//! of three reconstruction kernels:
//!
//! | Mode | Neighbourhood | Valid coordinates (per axis) |
//! |------|---------------|------------------------------|
//! | Nearest | 1 voxel | `-0.5 <= c < dim - 0.5` |
//! | Linear | 2x2x2 | `0 <= c < dim` |
//! | Cubic | 4x4x4 | `1 <= c < dim - 2` |
//!
//! Outside its valid range every mode returns `0.0`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;
use volvis_math::CubicKernel;

use crate::lattice::{self, Lattice};
use crate::{Dims, InterpolationMode, Statistics, Vec3, VolumeError, VolumeResult};

/// Dense grid of scalar intensities.
///
/// # Example
///
/// ```rust
/// use volvis_volume::{Dims, InterpolationMode, ScalarField, Vec3};
///
/// let mut field = ScalarField::new(vec![0, 10, 20, 30, 40, 50, 60, 70], Dims::new(2, 2, 2)).unwrap();
/// assert_eq!(field.raw_value(1, 1, 1), 70.0);
///
/// field.set_interpolation(InterpolationMode::NearestNeighbor);
/// assert_eq!(field.sample(Vec3::new(0.6, 0.2, 0.0)), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScalarField {
    dims: Dims,
    samples: Vec<u16>,
    stats: Statistics,
    provenance: Option<PathBuf>,
    interpolation: InterpolationMode,
    kernel: CubicKernel,
}

impl ScalarField {
    /// Builds a field from a flat x-fastest buffer.
    ///
    /// Computes minimum, maximum and histogram eagerly; this is the only
    /// expensive step and is O(n) in the voxel count.
    ///
    /// # Errors
    ///
    /// [`VolumeError::InvalidDimensions`] for a zero or overflowing extent,
    /// [`VolumeError::SizeMismatch`] if `samples.len()` differs from it.
    pub fn new(samples: Vec<u16>, dims: Dims) -> VolumeResult<Self> {
        let expected = dims.validate()?;
        if samples.len() != expected {
            return Err(VolumeError::SizeMismatch {
                expected,
                actual: samples.len(),
            });
        }

        let start = Instant::now();
        let stats = Statistics::compute(&samples)?;
        debug!(
            %dims,
            min = stats.minimum(),
            max = stats.maximum(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "scalar field statistics"
        );

        Ok(Self {
            dims,
            samples,
            stats,
            provenance: None,
            interpolation: InterpolationMode::default(),
            kernel: CubicKernel::default(),
        })
    }

    /// Records where the samples came from.
    pub fn with_provenance(mut self, path: impl Into<PathBuf>) -> Self {
        self.provenance = Some(path.into());
        self
    }

    /// Sets the stored interpolation mode.
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }

    /// Sets the kernel used by [`InterpolationMode::Cubic`].
    pub fn with_cubic_kernel(mut self, kernel: CubicKernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Grid extent.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Source path, if the field was loaded from a file.
    pub fn provenance(&self) -> Option<&Path> {
        self.provenance.as_deref()
    }

    /// Smallest sample.
    #[inline]
    pub fn minimum(&self) -> f32 {
        self.stats.minimum()
    }

    /// Largest sample.
    #[inline]
    pub fn maximum(&self) -> f32 {
        self.stats.maximum()
    }

    /// Count per integral intensity, `0..=maximum`.
    #[inline]
    pub fn histogram(&self) -> &[usize] {
        self.stats.histogram()
    }

    /// All statistics at once.
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Raw sample buffer, x-fastest.
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Stored interpolation mode, used by [`ScalarField::sample`].
    #[inline]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    /// Changes the stored interpolation mode.
    ///
    /// Takes `&mut self`: a field shared across render threads cannot have
    /// its mode changed until those borrows end.
    pub fn set_interpolation(&mut self, mode: InterpolationMode) {
        self.interpolation = mode;
    }

    /// Cubic kernel used by [`InterpolationMode::Cubic`].
    pub fn cubic_kernel(&self) -> CubicKernel {
        self.kernel
    }

    /// Changes the cubic kernel.
    pub fn set_cubic_kernel(&mut self, kernel: CubicKernel) {
        self.kernel = kernel;
    }

    /// Voxel value at integer coordinates.
    ///
    /// Callers must pass in-range indices. Debug builds assert it; release
    /// builds still panic on an index past the end of the buffer, but an
    /// out-of-range axis that stays within the buffer reads another voxel.
    #[inline]
    pub fn raw_value(&self, x: usize, y: usize, z: usize) -> f32 {
        debug_assert!(
            self.dims.contains(x, y, z),
            "voxel ({x}, {y}, {z}) outside {}",
            self.dims
        );
        self.samples[self.dims.index(x, y, z)] as f32
    }

    /// Reconstructs the intensity at `coord` with the stored mode.
    #[inline]
    pub fn sample(&self, coord: Vec3) -> f32 {
        self.sample_with(coord, self.interpolation)
    }

    /// Reconstructs the intensity at `coord` with an explicit mode.
    #[inline]
    pub fn sample_with(&self, coord: Vec3, mode: InterpolationMode) -> f32 {
        self.sample_with_kernel(coord, mode, &self.kernel)
    }

    /// Reconstructs the intensity with an explicit mode and cubic kernel.
    ///
    /// `kernel` is only consulted for [`InterpolationMode::Cubic`].
    pub fn sample_with_kernel(
        &self,
        coord: Vec3,
        mode: InterpolationMode,
        kernel: &CubicKernel,
    ) -> f32 {
        match mode {
            InterpolationMode::NearestNeighbor => lattice::nearest(self, coord),
            InterpolationMode::Linear => lattice::trilinear(self, coord),
            InterpolationMode::Cubic => self.sample_tricubic(coord, kernel),
        }
    }

    /// Returns `true` if the full 4x4x4 neighbourhood of `coord` is inside
    /// the grid: `1 <= c < dim - 2` on every axis.
    #[inline]
    pub fn within_cubic_margin(&self, coord: Vec3) -> bool {
        let hi = self.dims.as_vec3() - Vec3::splat(2.0);
        lattice::within(coord, Vec3::ONE, hi)
    }

    fn sample_tricubic(&self, coord: Vec3, kernel: &CubicKernel) -> f32 {
        if !self.within_cubic_margin(coord) {
            return 0.0;
        }

        let base = coord.floor();
        let t = coord - base;
        let (x1, y1, z1) = (base.x as usize, base.y as usize, base.z as usize);

        let mut levels = [0.0f32; 4];
        for (k, level) in levels.iter_mut().enumerate() {
            *level = self.bicubic(x1, y1, z1 + k - 1, t.x, t.y, kernel);
        }
        kernel.interpolate(levels, t.z)
    }

    /// Bicubic reconstruction in the xy-plane at integer level `z`.
    ///
    /// `x1`, `y1` are the floors of the query; the neighbourhood spans
    /// `x1 - 1 ..= x1 + 2` and `y1 - 1 ..= y1 + 2`.
    fn bicubic(&self, x1: usize, y1: usize, z: usize, tx: f32, ty: f32, kernel: &CubicKernel) -> f32 {
        let mut rows = [[0.0f32; 4]; 4];
        for (j, row) in rows.iter_mut().enumerate() {
            let y = y1 + j - 1;
            for (i, value) in row.iter_mut().enumerate() {
                *value = self.raw_value(x1 + i - 1, y, z);
            }
        }
        kernel.interpolate_2d(&rows, tx, ty)
    }
}

impl Lattice for ScalarField {
    type Value = f32;

    #[inline]
    fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    fn at(&self, x: usize, y: usize, z: usize) -> f32 {
        self.raw_value(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn cube_2() -> ScalarField {
        ScalarField::new(vec![0, 10, 20, 30, 40, 50, 60, 70], Dims::new(2, 2, 2)).unwrap()
    }

    /// 6x5x7 grid with distinct, non-linear values.
    fn ramp() -> ScalarField {
        let dims = Dims::new(6, 5, 7);
        let mut samples = Vec::with_capacity(dims.len());
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    samples.push((x * x + 3 * y + 7 * z * z) as u16);
                }
            }
        }
        ScalarField::new(samples, dims).unwrap()
    }

    #[test]
    fn test_new_rejects_mismatch() {
        let err = ScalarField::new(vec![1, 2, 3], Dims::new(2, 2, 1)).unwrap_err();
        assert!(matches!(err, VolumeError::SizeMismatch { expected: 4, actual: 3 }));
    }

    #[test]
    fn test_new_rejects_zero_extent() {
        let err = ScalarField::new(vec![], Dims::new(0, 2, 2)).unwrap_err();
        assert!(matches!(err, VolumeError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_statistics() {
        let field = ramp();
        let n = field.dims().len();
        assert_eq!(field.histogram().iter().sum::<usize>(), n);
        assert_eq!(field.histogram().len(), field.maximum() as usize + 1);
        for &v in field.samples() {
            assert!(field.minimum() <= v as f32 && v as f32 <= field.maximum());
        }
    }

    #[test]
    fn test_provenance() {
        let field = cube_2();
        assert!(field.provenance().is_none());
        let field = field.with_provenance("data/orange.fld");
        assert_eq!(field.provenance(), Some(Path::new("data/orange.fld")));
    }

    #[test]
    fn test_linear_midpoint() {
        let field = cube_2();
        assert_eq!(field.sample_with(Vec3::new(0.5, 0.0, 0.0), InterpolationMode::Linear), 5.0);
        assert_eq!(field.sample_with(Vec3::new(0.0, 0.5, 0.0), InterpolationMode::Linear), 10.0);
        assert_eq!(field.sample_with(Vec3::new(0.5, 0.5, 0.5), InterpolationMode::Linear), 35.0);
    }

    #[test]
    fn test_linear_lattice_identity() {
        let field = ramp();
        let dims = field.dims();
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    let c = Vec3::new(x as f32, y as f32, z as f32);
                    assert_eq!(
                        field.sample_with(c, InterpolationMode::Linear),
                        field.raw_value(x, y, z)
                    );
                }
            }
        }
    }

    #[test]
    fn test_linear_outside_is_zero() {
        let field = ramp();
        let dims = field.dims().as_vec3();
        for c in [
            Vec3::new(-0.01, 1.0, 1.0),
            Vec3::new(1.0, -3.0, 1.0),
            Vec3::new(dims.x, 1.0, 1.0),
            Vec3::new(1.0, dims.y + 0.5, 1.0),
            Vec3::new(1.0, 1.0, 100.0),
            Vec3::new(f32::NAN, 1.0, 1.0),
        ] {
            assert_eq!(field.sample_with(c, InterpolationMode::Linear), 0.0);
        }
    }

    #[test]
    fn test_linear_last_cell_clamps() {
        let field = ramp();
        let c = Vec3::new(5.5, 4.0, 6.0);
        assert_eq!(field.sample_with(c, InterpolationMode::Linear), field.raw_value(5, 4, 6));
    }

    #[test]
    fn test_nearest() {
        let field = cube_2();
        let nn = InterpolationMode::NearestNeighbor;
        assert_eq!(field.sample_with(Vec3::new(0.49, 0.0, 0.0), nn), 0.0);
        // ties round up
        assert_eq!(field.sample_with(Vec3::new(0.5, 0.0, 0.0), nn), 10.0);
        assert_eq!(field.sample_with(Vec3::new(-0.5, 0.0, 1.2), nn), 40.0);
        assert_eq!(field.sample_with(Vec3::new(1.4, 1.4, 1.4), nn), 70.0);
    }

    #[test]
    fn test_nearest_margin() {
        let field = cube_2();
        let nn = InterpolationMode::NearestNeighbor;
        assert_eq!(field.sample_with(Vec3::new(-0.51, 0.0, 0.0), nn), 0.0);
        assert_eq!(field.sample_with(Vec3::new(1.5, 1.0, 1.0), nn), 0.0);
    }

    #[test]
    fn test_cubic_lattice_identity() {
        let field = ramp();
        for z in 1..5 {
            for y in 1..3 {
                for x in 1..4 {
                    let c = Vec3::new(x as f32, y as f32, z as f32);
                    assert_eq!(
                        field.sample_with(c, InterpolationMode::Cubic),
                        field.raw_value(x, y, z)
                    );
                }
            }
        }
    }

    #[test]
    fn test_cubic_margin() {
        let field = ramp();
        let cubic = InterpolationMode::Cubic;
        assert!(field.within_cubic_margin(Vec3::new(1.0, 1.0, 1.0)));
        assert!(field.within_cubic_margin(Vec3::new(3.99, 2.5, 4.99)));
        assert_eq!(field.sample_with(Vec3::new(0.99, 2.0, 2.0), cubic), 0.0);
        assert_eq!(field.sample_with(Vec3::new(4.0, 2.0, 2.0), cubic), 0.0);
        assert_eq!(field.sample_with(Vec3::new(2.0, 3.0, 2.0), cubic), 0.0);
    }

    #[test]
    fn test_cubic_constant_field() {
        let dims = Dims::new(6, 6, 6);
        let field = ScalarField::new(vec![42; dims.len()], dims).unwrap();
        let v = field.sample_with(Vec3::new(2.3, 1.7, 3.9), InterpolationMode::Cubic);
        assert_abs_diff_eq!(v, 42.0, epsilon = 1e-3);
    }

    #[test]
    fn test_cubic_kernel_parameter() {
        let field = ramp();
        let c = Vec3::new(2.5, 1.5, 2.5);
        let a = field.sample_with(c, InterpolationMode::Cubic);
        let b = field.sample_with_kernel(c, InterpolationMode::Cubic, &CubicKernel::new(-0.5));
        assert!((a - b).abs() > 1e-3);
        let field = field.with_cubic_kernel(CubicKernel::new(-0.5));
        assert_eq!(field.sample_with(c, InterpolationMode::Cubic), b);
    }

    #[test]
    fn test_stored_mode() {
        let mut field = cube_2();
        let c = Vec3::new(0.7, 0.0, 0.0);
        assert_eq!(field.interpolation(), InterpolationMode::Linear);
        assert_abs_diff_eq!(field.sample(c), 7.0, epsilon = 1e-5);
        field.set_interpolation(InterpolationMode::NearestNeighbor);
        assert_eq!(field.sample(c), 10.0);
        assert_eq!(field.minimum(), 0.0);
        assert_eq!(field.maximum(), 70.0);
    }

    #[test]
    fn test_idempotent() {
        let field = ramp();
        let c = Vec3::new(2.25, 1.75, 3.5);
        for mode in InterpolationMode::ALL {
            let first = field.sample_with(c, mode);
            for _ in 0..4 {
                assert_eq!(field.sample_with(c, mode), first);
            }
        }
    }
}
