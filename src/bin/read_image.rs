//! Reads the partition table and the FAT volume boot records of a raw disk image.
//!
//! The program prints one line per partition table entry, then the layout facts of every
//! FAT partition. The image digests can be written next to the analysis.

use clap::Parser;
use image_forensics::checksum::{digest_reader, write_checksum_files};
use image_forensics::constants::{CHUNK_SIZE, SECTOR_SIZE};
use image_forensics::image::ImageReader;
use image_forensics::{Config, Disk, Layouts};
use log::{error, info};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Reads the MBR and the FAT volume boot records of a raw disk image")]
struct Args {
    /// Path to the raw disk image
    image: PathBuf,
    /// Size in bytes of a sector
    #[arg(short, long, default_value_t = SECTOR_SIZE)]
    sector_size: usize,
    /// Size in bytes of the chunks read while hashing the image
    #[arg(long, default_value_t = CHUNK_SIZE)]
    chunk_size: usize,
    /// Write MD5-<image>.txt and SHA1-<image>.txt into this directory
    #[arg(short, long, value_name = "DIR")]
    checksum_dir: Option<PathBuf>,
    /// Increase the log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    stderrlog::new()
        .modules([module_path!(), "image_forensics"])
        .verbosity(1 + args.verbose as usize)
        .init()
        .unwrap();

    let config = Config::new(args.sector_size, args.chunk_size).unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(1);
    });
    let layouts = Layouts::standard().unwrap_or_else(|e| {
        error!("Invalid layout: {e}");
        std::process::exit(1);
    });

    let mut reader = ImageReader::open(&args.image).unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(1);
    });

    if let Some(dir) = &args.checksum_dir {
        let digests = digest_reader(&mut reader, *config.chunk_size()).unwrap_or_else(|e| {
            error!("Checksum computation failed: {e}");
            std::process::exit(1);
        });
        match write_checksum_files(&args.image, &digests, dir) {
            Ok(paths) => {
                for path in paths {
                    info!("Wrote {}", path.display());
                }
            }
            Err(e) => {
                error!("Failed to write checksum files: {e}");
                std::process::exit(1);
            }
        }
    }

    let disk = Disk::from_reader(&mut reader, &args.image, &config, &layouts)
        .unwrap_or_else(|e| {
            error!("{e}");
            std::process::exit(1);
        });

    if let Err(e) = disk.print_layout() {
        error!("Print layout error: {e}");
        std::process::exit(1);
    }
}
