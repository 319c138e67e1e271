//! Master Boot Record parsing and disk analysis.
//!
//! This module provides functionality for:
//! - Extracting the four partition table entries of an MBR
//! - Classifying partition types
//! - Reading and interpreting the VBR of every FAT partition

pub mod disk;
pub mod disk_error;
pub mod mbr;

pub use disk::{Disk, FatVolume};
pub use disk_error::DiskError;
pub use mbr::{Mbr, PartitionEntry};
