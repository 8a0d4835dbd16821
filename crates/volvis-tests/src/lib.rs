//! Integration tests for volvis crates.
//!
//! End-to-end checks across the io, volume and math crates: files on disk
//! through to sampled values.
