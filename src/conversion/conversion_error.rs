//! Error types for address and time conversions.

use std::io;
use thiserror::Error;

/// Errors that can occur during a conversion.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The conversion needs layout parameters that were not supplied.
    #[error("Missing prerequisite: {0} must be provided")]
    MissingPrerequisite(String),

    /// The address lies before the region it is converted into.
    #[error("Address {address} lies before the start of the {region} ({start})")]
    AddressBeforeRegion {
        address: u64,
        region: &'static str,
        start: u64,
    },

    /// Clusters 0 and 1 do not exist in the data region.
    #[error("Invalid cluster number: `{0}`. Data clusters start at 2.")]
    InvalidCluster(u64),

    /// A cluster holds at least one sector.
    #[error("Invalid cluster size: `{0}`. Any value greater than 0 is valid.")]
    InvalidClusterSize(u64),

    /// Byte addresses only make sense for sector addresses.
    #[error("Byte addresses cannot be computed for cluster addresses")]
    ByteAddressForCluster,

    /// The computed address does not fit in 64 bits.
    #[error("Address overflow")]
    Overflow,

    /// The value is not a hexadecimal number such as `0x1234`.
    #[error("Invalid hex value: `{0}`")]
    InvalidHex(String),

    /// The month field of a FAT date must be between 1 and 12.
    #[error("Invalid month in date value: `{0}`")]
    InvalidMonth(u16),

    /// Underlying I/O errors while reading a value from a file.
    #[error("IO Error: `{0}`")]
    IOError(io::Error),
}

/// Converts standard I/O errors into ConversionError.
impl From<io::Error> for ConversionError {
    fn from(err: io::Error) -> Self {
        ConversionError::IOError(err)
    }
}
