//! Immutable sampling configuration.

use volvis_math::CubicKernel;

use crate::{Gradient, GradientField, InterpolationMode, ScalarField, Vec3};

/// Interpolation settings applied at call sites.
///
/// Pairs a mode for each field with the cubic kernel shape, so a render
/// pass can hold one `SampleConfig` by value and query shared fields
/// without touching their stored modes.
///
/// With the `serde` feature this (de)serialises; missing keys take their
/// defaults:
///
/// ```yaml
/// scalar: cubic
/// gradient: linear
/// cubic_param: -0.5
/// ```
///
/// # Example
///
/// ```rust
/// use volvis_volume::{Dims, InterpolationMode, SampleConfig, ScalarField, Vec3};
///
/// let field = ScalarField::new(vec![0, 10, 20, 30, 40, 50, 60, 70], Dims::new(2, 2, 2)).unwrap();
/// let config = SampleConfig::default().with_scalar(InterpolationMode::NearestNeighbor);
/// assert_eq!(config.sample(&field, Vec3::new(0.8, 0.0, 0.0)), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SampleConfig {
    /// Mode for intensity queries
    pub scalar: InterpolationMode,
    /// Mode for gradient queries
    pub gradient: InterpolationMode,
    /// Shape parameter `a` of the cubic kernel
    pub cubic_param: f32,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            scalar: InterpolationMode::default(),
            gradient: InterpolationMode::default(),
            cubic_param: CubicKernel::DEFAULT_A,
        }
    }
}

impl SampleConfig {
    /// Sets the scalar mode.
    pub fn with_scalar(mut self, mode: InterpolationMode) -> Self {
        self.scalar = mode;
        self
    }

    /// Sets the gradient mode.
    pub fn with_gradient(mut self, mode: InterpolationMode) -> Self {
        self.gradient = mode;
        self
    }

    /// Sets the cubic kernel shape parameter.
    pub fn with_cubic_param(mut self, a: f32) -> Self {
        self.cubic_param = a;
        self
    }

    /// Kernel built from [`SampleConfig::cubic_param`].
    #[inline]
    pub fn kernel(&self) -> CubicKernel {
        CubicKernel::new(self.cubic_param)
    }

    /// Samples `field` with this configuration, ignoring its stored mode.
    #[inline]
    pub fn sample(&self, field: &ScalarField, coord: Vec3) -> f32 {
        field.sample_with_kernel(coord, self.scalar, &self.kernel())
    }

    /// Reconstructs a gradient with this configuration, ignoring the
    /// field's stored mode.
    #[inline]
    pub fn gradient(&self, field: &GradientField, coord: Vec3) -> Gradient {
        field.gradient_with(coord, self.gradient)
    }
}
