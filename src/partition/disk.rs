//! Disk image parsing and analysis.
//!
//! This module provides functionality for:
//! - Opening and parsing disk images
//! - Reading the MBR partition table (a failure here aborts the analysis)
//! - Interpreting the VBR of every FAT partition (a failure only affects its partition)
//! - Displaying the disk layout facts

use getset::Getters;
use log::{error, info};
use std::fmt::Write;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use super::disk_error::DiskError;
use super::mbr::{Mbr, PartitionEntry};
use crate::config::Config;
use crate::filesystem::{FATType, VbrFacts};
use crate::image::ImageReader;
use crate::layout::Layouts;
use crate::traits::LayoutDisplay;

/// The outcome of interpreting the VBR of one FAT partition.
#[derive(Debug, Getters)]
pub struct FatVolume {
    /// Slot of the partition in the partition table.
    #[get = "pub"]
    slot: usize,
    /// FAT type given by the partition type code.
    #[get = "pub"]
    fat_type: FATType,
    /// The VBR facts, or the error that prevented reading them.
    #[get = "pub"]
    facts: Result<VbrFacts, DiskError>,
}

/// Represents a disk image with its partition table and FAT volumes.
#[derive(Debug, Getters)]
pub struct Disk {
    /// The disk image file path.
    #[get = "pub"]
    file_path: PathBuf,
    /// The partition table found on the disk.
    #[get = "pub"]
    mbr: Mbr,
    /// One entry per FAT partition, in slot order.
    #[get = "pub"]
    volumes: Vec<FatVolume>,
    /// The size in bytes of a sector.
    #[get = "pub"]
    sector_size: usize,
}

impl Disk {
    /// Opens a disk image file and analyzes its structure.
    ///
    /// # Parameters
    /// - `path`: Path to the disk image file
    /// - `config`: The sector size to use
    /// - `layouts`: The MBR and VBR layouts
    ///
    /// # Errors
    /// - Returns `DiskError::Image` if the file cannot be opened or its first sector read
    /// - Returns `DiskError::Layout` if the partition table cannot be decoded
    ///
    /// A partition whose VBR cannot be read or decoded does not make this call fail; the
    /// error is kept in the corresponding [`FatVolume`].
    pub fn from_file(path: &Path, config: &Config, layouts: &Layouts) -> Result<Self, DiskError> {
        let mut reader = ImageReader::open(path)?;
        Self::from_reader(&mut reader, path, config, layouts)
    }

    /// Analyzes a disk image from an already opened reader.
    pub fn from_reader<R: Read + Seek>(
        reader: &mut ImageReader<R>,
        path: &Path,
        config: &Config,
        layouts: &Layouts,
    ) -> Result<Self, DiskError> {
        let sector_size = *config.sector_size();

        let boot_sector = reader.read_sector(0, sector_size)?;
        let mbr = Mbr::from_sector(&boot_sector, layouts)?;
        info!(
            "{}: {} used partition table entries",
            path.display(),
            mbr.used_entries().len()
        );

        let volumes = mbr
            .fat_entries()
            .into_iter()
            .map(|(entry, fat_type)| {
                let facts = Self::read_volume(reader, entry, fat_type, sector_size, layouts);
                if let Err(err) = &facts {
                    error!("Error while reading partition #{}: {err}", entry.slot() + 1);
                }
                FatVolume {
                    slot: *entry.slot(),
                    fat_type,
                    facts,
                }
            })
            .collect();

        Ok(Disk {
            file_path: path.to_path_buf(),
            mbr,
            volumes,
            sector_size,
        })
    }

    /// Reads and interprets the VBR found at the start of a FAT partition.
    fn read_volume<R: Read + Seek>(
        reader: &mut ImageReader<R>,
        entry: &PartitionEntry,
        fat_type: FATType,
        sector_size: usize,
        layouts: &Layouts,
    ) -> Result<VbrFacts, DiskError> {
        let start = u64::from(*entry.lba_start());
        info!(
            "Reading {fat_type} VBR of partition #{} at sector {start}",
            entry.slot() + 1
        );

        let sector = reader.read_sector(start, sector_size)?;
        let facts = VbrFacts::from_sector(&sector, &layouts.vbr, fat_type, start, sector_size)?;
        Ok(facts)
    }

    /// Prints the layout facts of the disk.
    pub fn print_layout(&self) -> Result<(), std::fmt::Error> {
        print!("{}", self.display_layout(0)?);
        Ok(())
    }
}

/// Lists the partition table entries, then the facts of every FAT volume.
impl LayoutDisplay for Disk {
    fn display_layout(&self, indent: u8) -> Result<String, std::fmt::Error> {
        let mut out = self.mbr.display_layout(indent)?;
        let pad = " ".repeat(indent.into());

        for volume in &self.volumes {
            match &volume.facts {
                Ok(facts) => {
                    writeln!(
                        out,
                        "{pad}Partition {} ({}):",
                        volume.slot + 1,
                        volume.fat_type
                    )?;
                    out.push_str(&facts.display_layout(indent)?);
                }
                Err(err) => writeln!(out, "{pad}Partition {}: {err}", volume.slot + 1)?,
            }
        }

        Ok(out)
    }
}
