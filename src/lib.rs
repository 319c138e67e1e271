//!
//! image_forensics: A library and CLI tools for reading the partition table and the FAT
//! volume boot records of raw disk images.
//!
//! This crate provides tools for:
//! - Describing on-disk records declaratively and extracting their fields
//! - Reading sectors of raw disk images without padding truncated data
//! - Interpreting MBR partition tables and FAT12/16/32 volume boot records
//! - Hashing images and converting sector addresses and FAT timestamps
//!
//! # Re-exports
//! - [`Disk`]: Disk analysis with its partition table and FAT volumes
//! - [`Layouts`]: The MBR and VBR layouts
//! - [`Config`]: Parameters of an analysis

pub mod checksum;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod filesystem;
pub mod image;
pub mod layout;
pub mod partition;
pub mod traits;

/// Parameters of an analysis (see [`config::Config`]).
pub use crate::config::Config;
/// The MBR and VBR layouts (see [`layout::Layouts`]).
pub use crate::layout::Layouts;
/// Disk analysis (see [`partition::disk::Disk`]).
pub use crate::partition::Disk;
