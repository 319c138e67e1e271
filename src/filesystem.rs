//! FAT volume boot records.
//!
//! This module implements:
//! - FAT type classification from the partition type code (FAT12/16/32)
//! - Derivation of the reserved area, FAT area and first data sector from a VBR

pub mod fat_type;
pub mod vbr;

pub use fat_type::FATType;
pub use vbr::{SectorRange, VbrFacts};
