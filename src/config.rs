//! Run configuration shared by the library and the binaries.

use getset::Getters;
use thiserror::Error;

use crate::constants::{CHUNK_SIZE, SECTOR_SIZE};

/// Sector sizes a disk image may use.
pub const VALID_SECTOR_SIZES: [usize; 4] = [512, 1024, 2048, 4096];

/// Errors raised by invalid configuration values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid sector size: `{0}`. Legal values: 512, 1024, 2048 or 4096")]
    InvalidSectorSize(usize),
    #[error("Invalid chunk size: `{0}`. Any value greater than 0 is valid.")]
    InvalidChunkSize(usize),
}

/// Parameters of an image analysis.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Config {
    /// The size in bytes of a sector.
    #[get = "pub"]
    sector_size: usize,
    /// The size in bytes of the chunks read when hashing an image.
    #[get = "pub"]
    chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sector_size: SECTOR_SIZE,
            chunk_size: CHUNK_SIZE,
        }
    }
}

impl Config {
    pub fn new(sector_size: usize, chunk_size: usize) -> Result<Self, ConfigError> {
        if !VALID_SECTOR_SIZES.contains(&sector_size) {
            return Err(ConfigError::InvalidSectorSize(sector_size));
        }
        if chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(chunk_size));
        }

        Ok(Config {
            sector_size,
            chunk_size,
        })
    }
}
