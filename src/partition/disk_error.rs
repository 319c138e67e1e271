//! Error types for disk analysis.
//!
//! This module wraps the errors of the image reader and of the layout engine so that a
//! disk analysis reports a single error type.

use thiserror::Error;

use crate::image::ImageError;
use crate::layout::LayoutError;

/// Represents errors that can occur while analysing a disk image.
#[derive(Error, Debug)]
pub enum DiskError {
    /// Wraps an error that occurred while reading the image.
    #[error("Image error: {0}")]
    Image(ImageError),
    /// Wraps an error that occurred while decoding a structure.
    #[error("Parsing error: {0}")]
    Layout(LayoutError),
}

/// Converts image errors into DiskError.
impl From<ImageError> for DiskError {
    fn from(err: ImageError) -> Self {
        DiskError::Image(err)
    }
}

/// Converts layout errors into DiskError.
impl From<LayoutError> for DiskError {
    fn from(err: LayoutError) -> Self {
        DiskError::Layout(err)
    }
}
