//! The on-disk layouts of the Master Boot Record and of FAT Volume Boot Records.
//!
//! All layouts are built once by [`Layouts::standard`] and handed to the interpreter.

use super::field::{DisplayMode, FieldSpec};
use super::layout_error::LayoutError;
use super::structure::StructSpec;
use crate::constants::{BOOT_SIGNATURE_OFFSET, PART_ENTRY_SIZE, SECTOR_SIZE};

use DisplayMode::{Decimal, Hex};

/// Labels of the `current_state` byte of a partition table entry.
pub const PARTITION_STATES: &[(u32, &str)] = &[(0x00, "Inactive"), (0x80, "Active")];

/// Labels of the partition type codes found in partition table entries.
pub const PARTITION_TYPES: &[(u32, &str)] = &[
    (0x01, "DOS 12-bit FAT"),
    (0x04, "DOS 16-bit FAT for partitions smaller than 32MB"),
    (0x05, "Extended partition"),
    (0x06, "DOS 16-bit FAT for partitions larger than 32MB"),
    (0x07, "NTFS"),
    (0x08, "AIX bootable partition"),
    (0x09, "AIX data partition"),
    (0x0B, "DOS 32-bit FAT"),
    (0x0C, "DOS 32-bit FAT for interrupt 13 support"),
    (0x17, "Hidden NTFS partition (XP and earlier)"),
    (0x1B, "Hidden FAT32 partition"),
    (0x1E, "Hidden VFAT partition"),
    (0x3C, "Partition Magic recovery partition"),
    (0x66, "Novell partitions"),
    (0x67, "Novell partitions"),
    (0x68, "Novell partitions"),
    (0x69, "Novell partitions"),
    (0x81, "Linux"),
    (
        0x82,
        "Linux swap partition (can also be associated with Solaris partitions)",
    ),
    (0x83, "Linux native file systems (Ext2, Ext3, Reiser, xiso)"),
    (0x86, "FAT16 volume/stripe set (Windows NT)"),
    (
        0x87,
        "High Performance File System (HPFS) fault-tolerant mirrored partition or NTFS volume/stripe set",
    ),
    (0xA5, "FreeBSD and BSD/386"),
    (0xA6, "OpenBSD"),
    (0xA9, "NetBSD"),
    (0xC7, "Typical of a corrupted NTFS volume/stripe set"),
    (0xEB, "BeOS"),
];

/// The set of layouts needed to interpret a disk image.
#[derive(Debug, Clone)]
pub struct Layouts {
    /// A 16-byte partition table entry.
    pub mbr_entry: StructSpec,
    /// The fields of a FAT Volume Boot Record used for layout derivation.
    pub vbr: StructSpec,
    /// Classification of the partition type byte of an entry.
    pub partition_type: FieldSpec,
    /// The signature closing a boot sector.
    pub boot_signature: FieldSpec,
}

impl Layouts {
    /// Builds the MBR and VBR layouts.
    pub fn standard() -> Result<Self, LayoutError> {
        Ok(Layouts {
            mbr_entry: mbr_entry()?,
            vbr: vbr()?,
            partition_type: FieldSpec::enumerated(0x04, 1, PARTITION_TYPES),
            boot_signature: FieldSpec::int(BOOT_SIGNATURE_OFFSET, 2, Hex),
        })
    }
}

/// Layout of a partition table entry, relative to the start of its slot.
fn mbr_entry() -> Result<StructSpec, LayoutError> {
    StructSpec::new(
        "mbr_entry",
        PART_ENTRY_SIZE,
        vec![
            ("current_state", FieldSpec::enumerated(0x00, 1, PARTITION_STATES)),
            ("beginning_head", FieldSpec::int(0x01, 1, Decimal)),
            ("beginning_cylinder", FieldSpec::int(0x02, 2, Decimal)),
            ("partition_type", FieldSpec::int(0x04, 1, Hex)),
            ("end_head", FieldSpec::int(0x05, 1, Decimal)),
            ("end_cylinder", FieldSpec::int(0x06, 2, Decimal)),
            ("sectors_before_partition", FieldSpec::int(0x08, 4, Decimal)),
            ("sectors_in_partition", FieldSpec::int(0x0C, 4, Decimal)),
        ],
    )
}

/// Layout of the BIOS Parameter Block fields of a FAT boot sector.
fn vbr() -> Result<StructSpec, LayoutError> {
    StructSpec::new(
        "vbr",
        SECTOR_SIZE,
        vec![
            ("bytes_per_sector", FieldSpec::int(11, 2, Decimal)),
            ("sectors_per_cluster", FieldSpec::int(13, 1, Decimal)),
            ("reserved_sectors", FieldSpec::int(14, 2, Decimal)),
            ("num_fat_tables", FieldSpec::int(16, 1, Decimal)),
            ("max_root_files", FieldSpec::int(17, 2, Decimal)),
            ("num_sectors_16", FieldSpec::int(19, 2, Decimal)),
            ("media_descriptor", FieldSpec::int(21, 1, Hex)),
            ("fat_table_size", FieldSpec::int(22, 2, Decimal)),
            ("sectors_per_track", FieldSpec::int(24, 2, Decimal)),
            ("num_heads", FieldSpec::int(26, 2, Decimal)),
            ("partition_offset", FieldSpec::int(28, 4, Decimal)),
            ("num_sectors", FieldSpec::int(32, 4, Decimal)),
            ("fat_table_size32", FieldSpec::int(36, 4, Decimal)),
            ("boot_signature", FieldSpec::int(BOOT_SIGNATURE_OFFSET, 2, Hex)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layouts_are_valid() {
        let layouts = Layouts::standard().unwrap();
        assert_eq!(layouts.mbr_entry.fields().len(), 8);
        assert_eq!(*layouts.mbr_entry.size(), 16);
        assert_eq!(layouts.vbr.fields().len(), 14);
    }

    #[test]
    fn vbr_fields_match_the_boot_sector_offsets() {
        let layouts = Layouts::standard().unwrap();
        let expected = [
            ("bytes_per_sector", 11, 2),
            ("sectors_per_cluster", 13, 1),
            ("reserved_sectors", 14, 2),
            ("num_fat_tables", 16, 1),
            ("max_root_files", 17, 2),
            ("num_sectors_16", 19, 2),
            ("fat_table_size", 22, 2),
            ("sectors_per_track", 24, 2),
            ("num_heads", 26, 2),
            ("partition_offset", 28, 4),
            ("num_sectors", 32, 4),
            ("fat_table_size32", 36, 4),
        ];
        for (name, offset, length) in expected {
            let field = layouts.vbr.field(name).unwrap();
            assert_eq!((field.offset(), field.length()), (offset, length), "{name}");
        }
    }

    #[test]
    fn partition_type_labels() {
        let layouts = Layouts::standard().unwrap();
        let mut entry = [0u8; 16];
        entry[4] = 0x06;
        assert_eq!(
            layouts.partition_type.decode(&entry, 0).unwrap().to_string(),
            "DOS 16-bit FAT for partitions larger than 32MB"
        );
        entry[4] = 0x42;
        assert_eq!(
            layouts.partition_type.decode(&entry, 0).unwrap().to_string(),
            "? (0x42)"
        );
    }

    #[test]
    fn every_partition_type_byte_decodes() {
        let layouts = Layouts::standard().unwrap();
        let mut entry = [0u8; 16];
        for raw in 0..=u8::MAX {
            entry[4] = raw;
            let rendered = layouts.partition_type.decode(&entry, 0).unwrap().to_string();
            match PARTITION_TYPES.iter().find(|(code, _)| *code == u32::from(raw)) {
                Some((_, label)) => assert_eq!(rendered, *label),
                None => assert_eq!(rendered, format!("? ({raw:#x})")),
            }
        }
    }
}
