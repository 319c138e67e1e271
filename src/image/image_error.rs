//! Error types for disk image access.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a disk image.
#[derive(Error, Debug)]
pub enum ImageError {
    /// The path does not resolve to a regular file.
    #[error("Image not found: `{0}` is not a regular file")]
    NotFound(PathBuf),

    /// The image ends before the requested range.
    #[error("Truncated image: requested {requested} bytes at byte {offset}, only {available} available")]
    Truncated {
        offset: u64,
        requested: usize,
        available: usize,
    },

    /// Underlying I/O errors.
    #[error("IO Error: `{0}`")]
    IOError(io::Error),
}

/// Converts standard I/O errors into ImageError.
impl From<io::Error> for ImageError {
    fn from(err: io::Error) -> Self {
        ImageError::IOError(err)
    }
}
