//! Conversions between the addresses of a sector.
//!
//! A sector can be addressed in three ways:
//! - physically, by its sector number from the start of the disk
//! - logically, by its sector number from the start of its partition
//! - by cluster, for sectors of the data region of a FAT volume
//!
//! Every conversion goes through the physical address.

use log::debug;

use super::conversion_error::ConversionError;
use crate::constants::SECTOR_SIZE;

/// The kind of address to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    Logical,
    Physical,
    Cluster,
}

/// An address known to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownAddress {
    Logical(u64),
    Physical(u64),
    Cluster(u64),
}

/// Volume parameters needed by cluster conversions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterLayout {
    /// Number of sectors per cluster.
    pub cluster_size: Option<u64>,
    /// Number of reserved sectors of the partition.
    pub reserved: Option<u64>,
    /// Number of FAT tables.
    pub fat_tables: Option<u64>,
    /// Length of each FAT table in sectors.
    pub fat_length: Option<u64>,
}

impl ClusterLayout {
    /// Returns the cluster size and the offset of cluster 2 within the partition.
    ///
    /// # Errors
    /// - `ConversionError::MissingPrerequisite` naming every missing parameter
    /// - `ConversionError::InvalidClusterSize` for a zero cluster size
    fn resolve(&self) -> Result<(u64, u64), ConversionError> {
        let params = [
            ("cluster size (-k)", self.cluster_size),
            ("reserved sectors (-r)", self.reserved),
            ("FAT tables (-t)", self.fat_tables),
            ("FAT length (-f)", self.fat_length),
        ];
        let missing: Vec<&str> = params
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        match (self.cluster_size, self.reserved, self.fat_tables, self.fat_length) {
            (Some(0), ..) => Err(ConversionError::InvalidClusterSize(0)),
            (Some(cluster_size), Some(reserved), Some(fat_tables), Some(fat_length)) => {
                let data_offset = fat_tables
                    .checked_mul(fat_length)
                    .and_then(|fats| fats.checked_add(reserved))
                    .ok_or(ConversionError::Overflow)?;
                Ok((cluster_size, data_offset))
            }
            _ => Err(ConversionError::MissingPrerequisite(missing.join(", "))),
        }
    }
}

/// Converts addresses for one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressConverter {
    partition_start: u64,
    sector_size: u64,
    layout: ClusterLayout,
}

impl Default for AddressConverter {
    fn default() -> Self {
        AddressConverter::new(0, SECTOR_SIZE as u64, ClusterLayout::default())
    }
}

impl AddressConverter {
    /// # Parameters
    /// - `partition_start`: Physical sector of the start of the partition (logical 0)
    /// - `sector_size`: Bytes per sector, used for byte addresses
    /// - `layout`: Volume parameters, needed for cluster addresses only
    pub fn new(partition_start: u64, sector_size: u64, layout: ClusterLayout) -> Self {
        AddressConverter {
            partition_start,
            sector_size,
            layout,
        }
    }

    /// Converts `known` into the physical sector address.
    pub fn to_physical(&self, known: KnownAddress) -> Result<u64, ConversionError> {
        match known {
            KnownAddress::Physical(physical) => Ok(physical),
            KnownAddress::Logical(logical) => self
                .partition_start
                .checked_add(logical)
                .ok_or(ConversionError::Overflow),
            KnownAddress::Cluster(cluster) => {
                if cluster < 2 {
                    return Err(ConversionError::InvalidCluster(cluster));
                }
                let (cluster_size, data_offset) = self.layout.resolve()?;
                (cluster - 2)
                    .checked_mul(cluster_size)
                    .and_then(|offset| offset.checked_add(data_offset))
                    .and_then(|offset| offset.checked_add(self.partition_start))
                    .ok_or(ConversionError::Overflow)
            }
        }
    }

    /// Converts `known` into an address of kind `target`.
    ///
    /// With `byte_address`, sector addresses are multiplied by the sector size.
    ///
    /// # Errors
    /// - `ConversionError::MissingPrerequisite` if a cluster address is involved and the
    ///   cluster layout is incomplete
    /// - `ConversionError::ByteAddressForCluster` if bytes are requested for a cluster
    /// - `ConversionError::AddressBeforeRegion` if the address precedes the partition or
    ///   its data region
    pub fn convert(
        &self,
        known: KnownAddress,
        target: AddressKind,
        byte_address: bool,
    ) -> Result<u64, ConversionError> {
        if byte_address && target == AddressKind::Cluster {
            return Err(ConversionError::ByteAddressForCluster);
        }

        let physical = self.to_physical(known)?;
        debug!("{known:?} is physical sector {physical}");

        let converted = match target {
            AddressKind::Physical => physical,
            AddressKind::Logical => physical.checked_sub(self.partition_start).ok_or(
                ConversionError::AddressBeforeRegion {
                    address: physical,
                    region: "partition",
                    start: self.partition_start,
                },
            )?,
            AddressKind::Cluster => {
                let (cluster_size, data_offset) = self.layout.resolve()?;
                let data_start = self
                    .partition_start
                    .checked_add(data_offset)
                    .ok_or(ConversionError::Overflow)?;
                let offset = physical.checked_sub(data_start).ok_or(
                    ConversionError::AddressBeforeRegion {
                        address: physical,
                        region: "data region",
                        start: data_start,
                    },
                )?;
                offset / cluster_size + 2
            }
        };

        if byte_address {
            converted
                .checked_mul(self.sector_size)
                .ok_or(ConversionError::Overflow)
        } else {
            Ok(converted)
        }
    }
}
