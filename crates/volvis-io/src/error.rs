//! Field file error types.

use thiserror::Error;
use volvis_volume::VolumeError;

/// Result type for field file operations.
pub type FldResult<T> = Result<T, FldError>;

/// Errors that can occur while reading or writing `.fld` files.
#[derive(Debug, Error)]
pub enum FldError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed header.
    #[error("header error on line {line}: {message}")]
    Header {
        /// 1-based header line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Header is well formed but describes data we do not handle.
    #[error("unsupported field: {0}")]
    Unsupported(String),

    /// Data section ends before the declared voxel count.
    #[error("truncated data: expected {expected} bytes, found {actual}")]
    Truncated {
        /// Bytes implied by the header
        expected: usize,
        /// Bytes actually present
        actual: usize,
    },

    /// Decoded samples do not form a valid volume.
    #[error(transparent)]
    Volume(#[from] VolumeError),
}
