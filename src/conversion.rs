//! Companion conversions used while examining an image by hand.
//!
//! - [`address`]: logical, physical and cluster address conversions
//! - [`mac`]: decoding of FAT directory entry time and date values

pub mod address;
pub mod conversion_error;
pub mod mac;

pub use conversion_error::ConversionError;
