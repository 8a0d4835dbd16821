//! # volvis-math
//!
//! Reconstruction kernels shared by the scalar and gradient fields.
//!
//! - [`Lerp`], [`lerp`], [`bilerp`], [`trilerp`] - linear blending of any
//!   value that can be linearly combined (intensities, gradient vectors)
//! - [`CubicKernel`] - piecewise-cubic convolution kernel with a tunable
//!   shape parameter, plus 1D and 2D reconstruction over 4-tap neighbourhoods
//!
//! # Usage
//!
//! ```rust
//! use volvis_math::{lerp, CubicKernel};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//!
//! let kernel = CubicKernel::default();
//! // Zero offset reproduces the second tap exactly
//! assert_eq!(kernel.interpolate([3.0, 7.0, 1.0, 4.0], 0.0), 7.0);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - `Vec3` for coordinates and gradient directions
//!
//! # Used By
//!
//! - `volvis-volume` - scalar and gradient field sampling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interp;
mod kernel;

pub use interp::*;
pub use kernel::*;

/// Re-export of the vector type used for coordinates and gradients.
pub use glam::Vec3;
