//! # volvis-io
//!
//! Loading and saving volumes in the AVS field format (`.fld`).
//!
//! The volume core never parses bytes itself; this crate turns a file into
//! the dimension triple and flat `u16` buffer a
//! [`ScalarField`](volvis_volume::ScalarField) is built from.
//!
//! # Usage
//!
//! ```rust,ignore
//! use volvis_io::fld;
//!
//! let field = fld::read("data/orange.fld")?;
//! println!("{} voxels, max {}", field.dims().len(), field.maximum());
//! ```
//!
//! # Dependencies
//!
//! - [`volvis-volume`] - field types
//! - [`thiserror`] - error handling
//! - [`tracing`] - load timing and header warnings

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod fld;

pub use error::{FldError, FldResult};
pub use fld::{FldHeader, SampleKind};
