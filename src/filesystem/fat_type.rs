//! Enum for the different FAT types (FAT12, FAT16, FAT32).
//!
//! The type of a volume is decided by the partition type code of its MBR entry.
//! Codes 0x0B and 0x0C denote FAT32; the FAT12 and FAT16 codes share the legacy layout
//! with a fixed root directory region.

use std::fmt;

/// Represents the different types of FAT filesystems.
///
/// # Values
/// - `FAT12`: 12-bit File Allocation Table entries
/// - `FAT16`: 16-bit File Allocation Table entries
/// - `FAT32`: 32-bit File Allocation Table entries (most common on large volumes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FATType {
    FAT12,
    FAT16,
    FAT32,
}

impl FATType {
    /// Classifies an MBR partition type code.
    ///
    /// # Returns
    /// - `Some(FATType)` for 0x01 (FAT12), 0x04 and 0x06 (FAT16), 0x0B and 0x0C (FAT32)
    /// - `None` for any other code
    pub fn from_partition_type(code: u32) -> Option<Self> {
        match code {
            0x01 => Some(FATType::FAT12),
            0x04 | 0x06 => Some(FATType::FAT16),
            0x0B | 0x0C => Some(FATType::FAT32),
            _ => None,
        }
    }

    /// FAT12 and FAT16 keep the root directory in a fixed region after the FATs.
    pub fn has_root_dir_region(&self) -> bool {
        *self != FATType::FAT32
    }
}

impl fmt::Display for FATType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FATType::FAT12 => "FAT12",
            FATType::FAT16 => "FAT16",
            FATType::FAT32 => "FAT32",
        };
        write!(f, "{s}")
    }
}
