/// The number of primary partitions supported by MBR.
pub const PART_CNT: usize = 4;

/// The default size of a sector in bytes.
pub const SECTOR_SIZE: usize = 512;

/// Offset of the first partition table entry within the MBR.
pub const PART_TABLE_OFFSET: usize = 0x1BE;

/// Size in bytes of a partition table entry.
pub const PART_ENTRY_SIZE: usize = 16;

/// Offset of the boot signature within a boot sector.
pub const BOOT_SIGNATURE_OFFSET: usize = 0x1FE;

/// The boot signature 0x55AA as read in little-endian byte order.
pub const BOOT_SIGNATURE: u32 = 0xAA55;

/// Size in bytes of a FAT directory entry.
pub const DIR_ENTRY_SIZE: u64 = 32;

/// Default size of the chunks used when streaming a whole image.
pub const CHUNK_SIZE: usize = 64 * 1024;
