//! # volvis-volume
//!
//! Continuous sampling of dense voxel grids for volume raycasting.
//!
//! - [`ScalarField`] - intensity grid with statistics and nearest /
//!   trilinear / tricubic reconstruction
//! - [`GradientField`] - central-difference gradients derived once from a
//!   [`ScalarField`], with nearest / trilinear reconstruction
//! - [`InterpolationMode`] - the reconstruction kernel selector
//! - [`SampleConfig`] - an immutable pairing of modes and cubic kernel
//!   shape, for call sites that want no mutable state on the fields
//!
//! # Usage
//!
//! ```rust
//! use volvis_volume::{Dims, GradientField, InterpolationMode, ScalarField, Vec3};
//!
//! let samples = vec![0, 10, 20, 30, 40, 50, 60, 70];
//! let field = ScalarField::new(samples, Dims::new(2, 2, 2)).unwrap();
//!
//! assert_eq!(field.sample_with(Vec3::new(0.5, 0.0, 0.0), InterpolationMode::Linear), 5.0);
//! assert_eq!(field.maximum(), 70.0);
//!
//! let gradients = GradientField::from_scalar(&field);
//! assert_eq!(gradients.dims(), field.dims());
//! ```
//!
//! # Coordinates
//!
//! Voxel `(x, y, z)` sits at lattice point `(x, y, z)`. Continuous queries
//! use the same space. Queries outside the margin a kernel needs return
//! zero rather than an error, because rays routinely start and end outside
//! the grid.
//!
//! # Threading
//!
//! Fields are `Send + Sync` and every query takes `&self`. The stored
//! interpolation mode can only be changed through `&mut self`, so it cannot
//! change while queries are in flight.
//!
//! # Feature Flags
//!
//! - `parallel` (default) - rayon batch sampling and resampling
//! - `serde` - serialization for [`InterpolationMode`] and [`SampleConfig`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod dims;
mod error;
mod gradient;
mod lattice;
mod mode;
mod scalar;
mod stats;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use config::SampleConfig;
pub use dims::Dims;
pub use error::{VolumeError, VolumeResult};
pub use gradient::{Gradient, GradientField};
pub use mode::InterpolationMode;
pub use scalar::ScalarField;
pub use stats::Statistics;

pub use volvis_math::{CubicKernel, Vec3};
