//! FAT Volume Boot Record interpretation.
//!
//! The VBR fields are extracted with the declarative VBR layout, then the volume
//! regions are derived from them:
//! - the reserved area starts the volume and holds `reserved_sectors` sectors
//! - the FAT area follows with `num_fat_tables` copies of the FAT
//! - FAT12/16 keep a fixed root directory region after the FATs
//! - cluster 2 is the first sector of the data region
//!
//! Sector numbers are relative to the start of the partition unless stated otherwise.

use getset::Getters;
use std::fmt::Write;

use super::fat_type::FATType;
use crate::constants::DIR_ENTRY_SIZE;
use crate::layout::{ExtractedRecord, LayoutError, StructSpec};
use crate::traits::LayoutDisplay;

/// A contiguous run of sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorRange {
    start: u64,
    count: u64,
}

impl SectorRange {
    pub fn new(start: u64, count: u64) -> Self {
        SectorRange { start, count }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the last sector of the range, `None` for an empty range.
    pub fn end(&self) -> Option<u64> {
        self.count.checked_sub(1).map(|last| self.start + last)
    }
}

/// The values decoded from a VBR and the volume layout derived from them.
#[derive(Debug, Clone, Getters)]
pub struct VbrFacts {
    /// The decoded VBR fields.
    #[get = "pub"]
    record: ExtractedRecord,
    /// FAT type of the volume, as given by its partition type code.
    #[get = "pub"]
    fat_type: FATType,
    /// Absolute sector at which the partition starts.
    #[get = "pub"]
    partition_start: u64,
    #[get = "pub"]
    reserved_sectors: u64,
    #[get = "pub"]
    sectors_per_cluster: u64,
    #[get = "pub"]
    num_fat_tables: u64,
    /// Size of one FAT in sectors.
    #[get = "pub"]
    fat_table_size: u64,
    /// Size of the fixed root directory region in sectors (0 for FAT32).
    #[get = "pub"]
    root_dir_sectors: u64,
}

impl VbrFacts {
    /// Extracts the VBR fields from `sector` and derives the volume layout.
    ///
    /// # Parameters
    /// - `sector`: The first sector of the partition
    /// - `layout`: The VBR layout
    /// - `fat_type`: The FAT type given by the partition type code
    /// - `partition_start`: The absolute sector where the partition starts
    /// - `sector_size`: The size in bytes of a sector
    pub fn from_sector(
        sector: &[u8],
        layout: &StructSpec,
        fat_type: FATType,
        partition_start: u64,
        sector_size: usize,
    ) -> Result<Self, LayoutError> {
        let record = layout.extract(sector, 0)?;
        Self::derive(record, fat_type, partition_start, sector_size)
    }

    /// Derives the volume layout from an extracted VBR record.
    ///
    /// FAT32 stores the FAT size in `fat_table_size32` since the 16-bit field cannot
    /// hold it. FAT12/16 reserve `ceil(max_root_files / entries per sector)` sectors
    /// for the root directory.
    ///
    /// # Errors
    /// - `LayoutError::MissingField` if the record lacks a field the derivation needs
    pub fn derive(
        record: ExtractedRecord,
        fat_type: FATType,
        partition_start: u64,
        sector_size: usize,
    ) -> Result<Self, LayoutError> {
        let fat_table_size = match fat_type {
            FATType::FAT32 => record.raw("fat_table_size32")?,
            FATType::FAT12 | FATType::FAT16 => record.raw("fat_table_size")?,
        };

        let root_dir_sectors = if fat_type.has_root_dir_region() {
            let entries_per_sector = (sector_size as u64 / DIR_ENTRY_SIZE).max(1);
            u64::from(record.raw("max_root_files")?).div_ceil(entries_per_sector)
        } else {
            0
        };

        Ok(VbrFacts {
            fat_type,
            partition_start,
            reserved_sectors: record.raw("reserved_sectors")?.into(),
            sectors_per_cluster: record.raw("sectors_per_cluster")?.into(),
            num_fat_tables: record.raw("num_fat_tables")?.into(),
            fat_table_size: fat_table_size.into(),
            root_dir_sectors,
            record,
        })
    }

    /// The boot sector and the other reserved sectors.
    pub fn reserved_area(&self) -> SectorRange {
        SectorRange::new(0, self.reserved_sectors)
    }

    /// All the copies of the FAT.
    pub fn fat_area(&self) -> SectorRange {
        SectorRange::new(
            self.reserved_sectors,
            self.fat_table_size * self.num_fat_tables,
        )
    }

    /// The fixed root directory region, empty for FAT32.
    pub fn root_dir_area(&self) -> SectorRange {
        let fat_area = self.fat_area();
        SectorRange::new(fat_area.start() + fat_area.count(), self.root_dir_sectors)
    }

    /// First sector of cluster 2, relative to the partition start.
    pub fn first_data_sector(&self) -> u64 {
        let root_dir = self.root_dir_area();
        root_dir.start() + root_dir.count()
    }

    /// First sector of cluster 2, as an absolute sector of the disk.
    pub fn first_data_sector_absolute(&self) -> u64 {
        self.partition_start + self.first_data_sector()
    }
}

/// Formats the end of a range, `-` when the range is empty.
fn range_end(range: SectorRange) -> String {
    range
        .end()
        .map_or_else(|| String::from("-"), |end| end.to_string())
}

impl LayoutDisplay for VbrFacts {
    fn display_layout(&self, indent: u8) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        let indent = " ".repeat(indent.into());

        let reserved = self.reserved_area();
        writeln!(
            out,
            "{indent}Reserved area: Start sector: {} Ending sector: {} Size: {} sectors",
            reserved.start(),
            range_end(reserved),
            reserved.count()
        )?;
        writeln!(
            out,
            "{indent}Sectors per cluster: {} sectors",
            self.sectors_per_cluster
        )?;
        let fat_area = self.fat_area();
        writeln!(
            out,
            "{indent}FAT area: Start sector: {} Ending sector: {}",
            fat_area.start(),
            range_end(fat_area)
        )?;
        writeln!(out, "{indent}# of FATs: {}", self.num_fat_tables)?;
        writeln!(
            out,
            "{indent}The size of each FAT: {} sectors",
            self.fat_table_size
        )?;
        writeln!(
            out,
            "{indent}The first sector of cluster 2: {} sectors",
            self.first_data_sector_absolute()
        )?;

        Ok(out)
    }
}
