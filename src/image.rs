//! Raw disk image access.
//!
//! This module provides a sector-addressed reader over a raw disk image that never pads
//! short reads, plus whole-file streaming used for checksums.

pub mod image_error;
pub mod reader;

pub use image_error::ImageError;
pub use reader::ImageReader;
