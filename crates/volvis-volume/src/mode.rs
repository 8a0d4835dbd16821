//! Reconstruction kernel selector.

use std::fmt;
use std::str::FromStr;

use crate::VolumeError;

/// Interpolation method for continuous-coordinate queries.
///
/// Parses from names (`"nearest"`, `"linear"`, `"cubic"` and the usual
/// aliases) and from the numeric codes `0`, `1`, `2`; anything else is a
/// [`VolumeError::InvalidMode`].
///
/// # Example
///
/// ```rust
/// use volvis_volume::InterpolationMode;
///
/// let mode: InterpolationMode = "tricubic".parse().unwrap();
/// assert_eq!(mode, InterpolationMode::Cubic);
/// assert!("bilateral".parse::<InterpolationMode>().is_err());
/// assert!(InterpolationMode::try_from(7u8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InterpolationMode {
    /// Rounds to the closest voxel (ties round up).
    #[cfg_attr(feature = "serde", serde(alias = "nearest"))]
    NearestNeighbor,

    /// Trilinear blend of the 8 bracketing voxels.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "trilinear"))]
    Linear,

    /// Tricubic convolution over a 4x4x4 neighbourhood.
    ///
    /// Gradient fields treat this as [`InterpolationMode::Linear`].
    #[cfg_attr(feature = "serde", serde(alias = "tricubic"))]
    Cubic,
}

impl InterpolationMode {
    /// All modes, in numeric-code order.
    pub const ALL: [Self; 3] = [Self::NearestNeighbor, Self::Linear, Self::Cubic];

    /// Short lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nearest",
            Self::Linear => "linear",
            Self::Cubic => "cubic",
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationMode {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "nearest_neighbor" | "nearest-neighbor" | "nearest_neighbour"
            | "nearest-neighbour" | "nn" => Ok(Self::NearestNeighbor),
            "linear" | "trilinear" => Ok(Self::Linear),
            "cubic" | "tricubic" => Ok(Self::Cubic),
            _ => Err(VolumeError::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<u8> for InterpolationMode {
    type Error = VolumeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| VolumeError::InvalidMode(code.to_string()))
    }
}
