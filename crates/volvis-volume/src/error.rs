//! Volume error types.

use thiserror::Error;

/// Result type for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors that can occur while building or configuring a volume.
///
/// Out-of-range continuous queries are not errors; they sample as zero.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// One or more grid extents is zero, or the voxel count overflows.
    #[error("invalid dimensions: {x}x{y}x{z}")]
    InvalidDimensions {
        /// Extent along x
        x: usize,
        /// Extent along y
        y: usize,
        /// Extent along z
        z: usize,
    },

    /// Sample buffer length does not match the grid extent.
    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Voxel count implied by the dimensions
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Statistics were requested over an empty buffer.
    #[error("volume has no samples")]
    Empty,

    /// Interpolation mode name or code is not recognised.
    #[error("invalid interpolation mode: {0}")]
    InvalidMode(String),
}
