use image_forensics::checksum::{digest_bytes, digest_image, digest_reader};
use image_forensics::filesystem::FATType;
use image_forensics::image::{ImageError, ImageReader};
use image_forensics::layout::FieldSpec;
use image_forensics::partition::DiskError;
use image_forensics::traits::LayoutDisplay;
use image_forensics::{Config, Disk, Layouts};
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const SECTOR: usize = 512;

fn put(image: &mut [u8], base: usize, field: &FieldSpec, value: u32) {
    let bytes = field.encode(value).unwrap();
    let start = base + field.offset();
    image[start..start + bytes.len()].copy_from_slice(&bytes);
}

/// Builds a disk with a FAT16 partition, a FAT32 partition, a Linux partition and a
/// FAT32 entry pointing past the end of the image.
fn disk_image() -> Vec<u8> {
    let layouts = Layouts::standard().unwrap();
    let mut image = vec![0; SECTOR * 300];
    image[510] = 0x55;
    image[511] = 0xAA;

    let entries = [
        (0x80, 0x06, 63, 100),
        (0x00, 0x0B, 163, 100),
        (0x00, 0x83, 263, 37),
        (0x00, 0x0C, 100_000, 2048),
    ];
    for (slot, (state, pt_type, start, count)) in entries.into_iter().enumerate() {
        let base = 0x1BE + slot * 16;
        let entry = &layouts.mbr_entry;
        put(&mut image, base, entry.field("current_state").unwrap(), state);
        put(&mut image, base, entry.field("partition_type").unwrap(), pt_type);
        put(&mut image, base, entry.field("sectors_before_partition").unwrap(), start);
        put(&mut image, base, entry.field("sectors_in_partition").unwrap(), count);
    }

    let vbrs: [(usize, &[(&str, u32)]); 2] = [
        (
            63,
            &[
                ("bytes_per_sector", 512),
                ("sectors_per_cluster", 4),
                ("reserved_sectors", 4),
                ("num_fat_tables", 2),
                ("max_root_files", 512),
                ("fat_table_size", 250),
                ("boot_signature", 0xAA55),
            ],
        ),
        (
            163,
            &[
                ("bytes_per_sector", 512),
                ("sectors_per_cluster", 8),
                ("reserved_sectors", 4),
                ("num_fat_tables", 2),
                ("fat_table_size32", 4000),
                ("boot_signature", 0xAA55),
            ],
        ),
    ];
    for (sector, fields) in vbrs {
        for (name, value) in fields {
            put(&mut image, sector * SECTOR, layouts.vbr.field(name).unwrap(), *value);
        }
    }

    image
}

fn image_file(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file
}

#[test]
fn analyses_a_synthetic_disk() {
    let file = image_file(&disk_image());
    let layouts = Layouts::standard().unwrap();
    let disk = Disk::from_file(file.path(), &Config::default(), &layouts).unwrap();

    let entries = disk.mbr().pt_entries();
    assert_eq!(entries.len(), 4);
    assert_eq!(
        entries[0].record().rendered("current_state").as_deref(),
        Some("Active")
    );

    let volumes = disk.volumes();
    assert_eq!(volumes.len(), 3);
    assert_eq!(*volumes[0].fat_type(), FATType::FAT16);
    assert_eq!(*volumes[1].fat_type(), FATType::FAT32);
    assert!(matches!(
        volumes[2].facts(),
        Err(DiskError::Image(ImageError::Truncated { .. }))
    ));

    let fat16 = volumes[0].facts().as_ref().unwrap();
    assert_eq!(fat16.fat_area().start(), 4);
    assert_eq!(fat16.fat_area().end(), Some(503));
    assert_eq!(fat16.first_data_sector(), 536);

    let fat32 = volumes[1].facts().as_ref().unwrap();
    assert_eq!(fat32.first_data_sector(), 4 + 2 * 4000);
}

#[test]
fn layout_output() {
    let file = image_file(&disk_image());
    let layouts = Layouts::standard().unwrap();
    let disk = Disk::from_file(file.path(), &Config::default(), &layouts).unwrap();
    let out = disk.display_layout(0).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(
        &lines[..4],
        [
            "(06) DOS 16-bit FAT for partitions larger than 32MB, 0000000063, 0000000100",
            "(0b) DOS 32-bit FAT, 0000000163, 0000000100",
            "(83) Linux native file systems (Ext2, Ext3, Reiser, xiso), 0000000263, 0000000037",
            "(0c) DOS 32-bit FAT for interrupt 13 support, 0000100000, 0000002048",
        ]
    );
    assert_eq!(lines[4], "Partition 1 (FAT16):");
    assert_eq!(lines[10], "The first sector of cluster 2: 599 sectors");
    assert_eq!(lines[11], "Partition 2 (FAT32):");
    assert_eq!(lines[14], "FAT area: Start sector: 4 Ending sector: 8003");
    assert_eq!(lines[17], "The first sector of cluster 2: 8167 sectors");
    assert!(lines[18].starts_with("Partition 4: Image error: Truncated image"));
    assert_eq!(lines.len(), 19);
}

#[test]
fn missing_and_truncated_images() {
    let layouts = Layouts::standard().unwrap();
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Disk::from_file(&dir.path().join("none.img"), &Config::default(), &layouts),
        Err(DiskError::Image(ImageError::NotFound(_)))
    ));

    let file = image_file(&[0; 100]);
    assert!(matches!(
        Disk::from_file(file.path(), &Config::default(), &layouts),
        Err(DiskError::Image(ImageError::Truncated { .. }))
    ));
}

#[test]
fn image_digest_matches_in_memory_digest() {
    let image = disk_image();
    let file = image_file(&image);
    assert_eq!(digest_image(file.path(), 4096).unwrap(), digest_bytes(&image));
}

#[test]
fn one_reader_serves_hashing_and_analysis() {
    let image = disk_image();
    let file = image_file(&image);
    let layouts = Layouts::standard().unwrap();

    let mut reader = ImageReader::open(file.path()).unwrap();
    assert_eq!(digest_reader(&mut reader, 1000).unwrap(), digest_bytes(&image));
    let shared =
        Disk::from_reader(&mut reader, file.path(), &Config::default(), &layouts).unwrap();

    let fresh = Disk::from_file(file.path(), &Config::default(), &layouts).unwrap();
    assert_eq!(
        shared.display_layout(0).unwrap(),
        fresh.display_layout(0).unwrap()
    );
}

#[test]
fn read_image_binary() {
    let file = image_file(&disk_image());
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_read_image"))
        .arg(file.path())
        .arg("--checksum-dir")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("(06) DOS 16-bit FAT for partitions larger than 32MB"));
    assert!(stdout.contains("The first sector of cluster 2: 599 sectors"));

    let name = file.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(dir.path().join(format!("MD5-{name}.txt")).is_file());
    assert!(dir.path().join(format!("SHA1-{name}.txt")).is_file());
}

#[test]
fn read_image_binary_fails_on_missing_image() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_read_image"))
        .arg(dir.path().join("none.img"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
