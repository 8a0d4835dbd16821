//! Parallel batch queries using Rayon.
//!
//! Fields are read-only during querying, so any number of threads can
//! sample them at once. These helpers split coordinate batches and whole
//! output grids across the Rayon pool.
//!
//! # Example
//!
//! ```rust
//! use volvis_volume::{parallel, Dims, InterpolationMode, ScalarField};
//!
//! let dims = Dims::new(8, 8, 8);
//! let field = ScalarField::new(vec![100; dims.len()], dims).unwrap();
//! let up = parallel::resample(&field, Dims::new(15, 15, 15), InterpolationMode::Linear).unwrap();
//! assert_eq!(up.len(), 15 * 15 * 15);
//! assert!(up.iter().all(|&v| v == 100.0));
//! ```

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{Dims, Gradient, GradientField, InterpolationMode, SampleConfig, ScalarField, Vec3, VolumeResult};

/// Samples `field` at every coordinate in `coords`.
pub fn sample_batch(field: &ScalarField, coords: &[Vec3], mode: InterpolationMode) -> Vec<f32> {
    trace!(count = coords.len(), %mode, "sample_batch");
    coords.par_iter().map(|&c| field.sample_with(c, mode)).collect()
}

/// Reconstructs gradients at every coordinate in `coords`.
pub fn gradient_batch(
    field: &GradientField,
    coords: &[Vec3],
    mode: InterpolationMode,
) -> Vec<Gradient> {
    trace!(count = coords.len(), %mode, "gradient_batch");
    coords.par_iter().map(|&c| field.gradient_with(c, mode)).collect()
}

/// Samples both fields at every coordinate with one configuration.
///
/// This is the per-step query pattern of a shaded raycaster.
pub fn sample_shaded_batch(
    scalar: &ScalarField,
    gradients: &GradientField,
    coords: &[Vec3],
    config: &SampleConfig,
) -> Vec<(f32, Gradient)> {
    trace!(count = coords.len(), "sample_shaded_batch");
    coords
        .par_iter()
        .map(|&c| (config.sample(scalar, c), config.gradient(gradients, c)))
        .collect()
}

/// Resamples `field` onto a grid of extent `target`.
///
/// The first and last lattice points of each axis map onto the first and
/// last voxels of the source, so the output spans the same physical extent.
/// An axis of extent 1 samples source position 0. With
/// [`InterpolationMode::Cubic`] the outer voxels fall outside the tricubic
/// margin and come out as zero.
///
/// # Errors
///
/// [`crate::VolumeError::InvalidDimensions`] if `target` is empty.
pub fn resample(field: &ScalarField, target: Dims, mode: InterpolationMode) -> VolumeResult<Vec<f32>> {
    let len = target.validate()?;
    let source = field.dims();
    debug!(from = %source, to = %target, %mode, "Resampling volume");

    let step = |src: usize, dst: usize| {
        if dst > 1 {
            (src - 1) as f32 / (dst - 1) as f32
        } else {
            0.0
        }
    };
    let scale = Vec3::new(
        step(source.x, target.x),
        step(source.y, target.y),
        step(source.z, target.z),
    );

    let mut out = vec![0.0f32; len];
    out.par_chunks_mut(target.x)
        .enumerate()
        .for_each(|(row_index, row)| {
            let y = row_index % target.y;
            let z = row_index / target.y;
            for (x, value) in row.iter_mut().enumerate() {
                let c = Vec3::new(x as f32, y as f32, z as f32) * scale;
                *value = field.sample_with(c, mode);
            }
        });

    Ok(out)
}
