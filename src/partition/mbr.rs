//! This module provides functionality for parsing the partition table of a
//! Master Boot Record (MBR).
//!
//! The four partition table entries are extracted with the declarative MBR entry layout
//! and kept in slot order, populated or not. Anomalies such as an invalid boot
//! signature or overlapping partitions are logged but never abort the parsing.
use getset::Getters;
use log::warn;
use std::fmt::{self, Write};

use crate::constants::{BOOT_SIGNATURE, PART_CNT, PART_ENTRY_SIZE, PART_TABLE_OFFSET};
use crate::filesystem::FATType;
use crate::layout::{ExtractedRecord, LayoutError, Layouts};
use crate::traits::LayoutDisplay;

/// Represents a single partition table entry.
#[derive(Debug, Clone, Getters)]
pub struct PartitionEntry {
    /// Position of the entry in the partition table (0 to 3).
    #[get = "pub"]
    slot: usize,
    /// The decoded fields of the entry, including the `partition_type_str` label.
    #[get = "pub"]
    record: ExtractedRecord,
    /// The partition type code.
    #[get = "pub"]
    pt_type: u32,
    /// The starting Logical Block Address (LBA) of the partition.
    #[get = "pub"]
    lba_start: u32,
    /// The number of sectors in the partition.
    #[get = "pub"]
    sector_cnt: u32,
}

impl PartitionEntry {
    /// Extracts the entry of `slot` from the first sector of a disk.
    ///
    /// # Errors
    /// - `LayoutError::OutOfBounds` if `sector` is too short to hold the slot
    pub fn from_slot(sector: &[u8], slot: usize, layouts: &Layouts) -> Result<Self, LayoutError> {
        let base = PART_TABLE_OFFSET + slot * PART_ENTRY_SIZE;
        let label = layouts.partition_type.decode(sector, base)?;
        let record = layouts
            .mbr_entry
            .extract(sector, base)?
            .with_field("partition_type_str", label);

        Ok(PartitionEntry {
            slot,
            pt_type: record.raw("partition_type")?,
            lba_start: record.raw("sectors_before_partition")?,
            sector_cnt: record.raw("sectors_in_partition")?,
            record,
        })
    }

    /// Returns the label of the partition type, `? (0xNN)` for unknown codes.
    pub fn type_label(&self) -> String {
        self.record
            .rendered("partition_type_str")
            .unwrap_or_else(|| format!("? ({:#x})", self.pt_type))
    }

    /// Returns the FAT type of the partition, `None` for other partition types.
    pub fn fat_type(&self) -> Option<FATType> {
        FATType::from_partition_type(self.pt_type)
    }

    /// An entry without type nor sectors is an unused slot.
    pub fn is_empty(&self) -> bool {
        self.pt_type == 0 && self.sector_cnt == 0
    }

    /// Returns the sector following the last sector of the partition.
    fn lba_end(&self) -> u64 {
        u64::from(self.lba_start) + u64::from(self.sector_cnt)
    }
}

/// Renders the entry as `(tt) <label>, <start>, <count>`.
impl LayoutDisplay for PartitionEntry {
    fn display_layout(&self, indent: u8) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(
            out,
            "{}({:02x}) {}, {:010}, {:010}",
            " ".repeat(indent.into()),
            self.pt_type,
            self.type_label(),
            self.lba_start,
            self.sector_cnt
        )?;
        Ok(out)
    }
}

/// Represents the boot signature of a Master Boot Record (MBR).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootSignature {
    /// Standard MBR boot signature (0x55AA).
    Mbr(u32),
    /// Unsupported boot signature, encapsulating the raw value.
    Unsupported(u32),
}

impl BootSignature {
    /// Creates a `BootSignature` instance from the value read in little-endian order.
    ///
    /// # Returns
    /// - `BootSignature::Mbr` if the signature matches `0x55AA`.
    /// - `BootSignature::Unsupported(other)` for any other value.
    pub fn from_raw(sig: u32) -> BootSignature {
        match sig {
            // The signature 0x55AA is stored on disk in little-endian byte order.
            BOOT_SIGNATURE => BootSignature::Mbr(sig),
            other => BootSignature::Unsupported(other),
        }
    }
}

/// Implements the trait Display for BootSignature by displaying its on-disk bytes.
impl fmt::Display for BootSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootSignature::Mbr(sig) | BootSignature::Unsupported(sig) => {
                write!(f, "0x{:04X}", (*sig as u16).swap_bytes())
            }
        }
    }
}

/// Represents the partition table of a Master Boot Record (MBR) and its boot signature.
#[derive(Debug, Clone, Getters)]
pub struct Mbr {
    /// The four partition table entries, in slot order.
    #[get = "pub"]
    pt_entries: Vec<PartitionEntry>,
    /// The boot signature of the MBR.
    #[get = "pub"]
    boot_signature: BootSignature,
}

impl Mbr {
    /// Parses the partition table out of the first sector of a disk.
    ///
    /// # Errors
    /// - `LayoutError::OutOfBounds` if `sector` is shorter than a boot sector
    pub fn from_sector(sector: &[u8], layouts: &Layouts) -> Result<Mbr, LayoutError> {
        let pt_entries = (0..PART_CNT)
            .map(|slot| PartitionEntry::from_slot(sector, slot, layouts))
            .collect::<Result<Vec<_>, _>>()?;
        let boot_signature =
            BootSignature::from_raw(layouts.boot_signature.read_integer(sector, 0)?);

        let mbr = Mbr {
            pt_entries,
            boot_signature,
        };
        mbr.check_signature().check_partitions_non_overlapping();

        Ok(mbr)
    }

    /// Returns the populated partition table entries.
    pub fn used_entries(&self) -> Vec<&PartitionEntry> {
        self.pt_entries
            .iter()
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    /// Returns the entries whose type code denotes a FAT volume.
    pub fn fat_entries(&self) -> Vec<(&PartitionEntry, FATType)> {
        self.pt_entries
            .iter()
            .filter_map(|entry| entry.fat_type().map(|fat_type| (entry, fat_type)))
            .collect()
    }

    /// Logs a warning if the boot signature is invalid.
    fn check_signature(&self) -> &Self {
        if let BootSignature::Unsupported(_) = self.boot_signature {
            warn!(
                "Invalid MBR boot signature {}. Expected signature: 0x55AA",
                self.boot_signature
            );
        }
        self
    }

    /// Logs a warning for every pair of populated partitions sharing sectors.
    fn check_partitions_non_overlapping(&self) -> &Self {
        let mut entries = self.used_entries();
        entries.sort_by_key(|entry| entry.lba_start);

        for pair in entries.windows(2) {
            if pair[0].lba_end() > u64::from(pair[1].lba_start) {
                warn!(
                    "Partitions in slots {} and {} are overlapping",
                    pair[0].slot, pair[1].slot
                );
            }
        }
        self
    }
}

/// Lists the four partition table entries in slot order.
impl LayoutDisplay for Mbr {
    fn display_layout(&self, indent: u8) -> Result<String, fmt::Error> {
        let mut out = String::new();
        for entry in &self.pt_entries {
            out.push_str(&entry.display_layout(indent)?);
        }
        Ok(out)
    }
}
