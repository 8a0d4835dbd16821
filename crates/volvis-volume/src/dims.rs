//! Grid extents and flat voxel indexing.

use std::fmt;

use crate::{Vec3, VolumeError, VolumeResult};

/// Extent of a voxel grid.
///
/// Voxels are stored x-fastest: `index(x, y, z) = x + nx * (y + ny * z)`.
///
/// # Example
///
/// ```rust
/// use volvis_volume::Dims;
///
/// let dims = Dims::new(4, 3, 2);
/// assert_eq!(dims.len(), 24);
/// assert_eq!(dims.index(1, 2, 1), 1 + 4 * (2 + 3 * 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dims {
    /// Extent along x
    pub x: usize,
    /// Extent along y
    pub y: usize,
    /// Extent along z
    pub z: usize,
}

impl Dims {
    /// Creates an extent. Use [`Dims::validate`] before allocating from it.
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Total voxel count.
    ///
    /// Only meaningful for validated extents; see [`Dims::checked_len`].
    #[inline]
    pub const fn len(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Returns `true` if any extent is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.x == 0 || self.y == 0 || self.z == 0
    }

    /// Voxel count, or `None` on overflow.
    pub fn checked_len(&self) -> Option<usize> {
        self.x.checked_mul(self.y)?.checked_mul(self.z)
    }

    /// Checks that every extent is positive and the voxel count fits in `usize`.
    pub fn validate(&self) -> VolumeResult<usize> {
        match self.checked_len() {
            Some(len) if len > 0 => Ok(len),
            _ => Err(VolumeError::InvalidDimensions {
                x: self.x,
                y: self.y,
                z: self.z,
            }),
        }
    }

    /// Flat buffer offset of voxel `(x, y, z)`.
    #[inline]
    pub const fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.x * (y + self.y * z)
    }

    /// Returns `true` if `(x, y, z)` addresses a voxel of this grid.
    #[inline]
    pub const fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.x && y < self.y && z < self.z
    }

    /// Returns `true` if `(x, y, z)` touches a face of the grid.
    #[inline]
    pub const fn is_boundary(&self, x: usize, y: usize, z: usize) -> bool {
        x == 0
            || y == 0
            || z == 0
            || x + 1 >= self.x
            || y + 1 >= self.y
            || z + 1 >= self.z
    }

    /// Extents as a float vector, for bounds tests on continuous coordinates.
    #[inline]
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Extents as an array.
    #[inline]
    pub const fn to_array(self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[usize; 3]> for Dims {
    fn from(a: [usize; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}
