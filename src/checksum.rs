//! MD5 and SHA-1 digests of whole disk images.
//!
//! Images are streamed in fixed-size chunks; the resulting digests do not depend on the
//! chunk size.

use getset::Getters;
use log::{debug, info};
use md5::Md5;
use sha1::{Digest, Sha1};
use std::fs;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use crate::image::{ImageError, ImageReader};

/// The digests of an image as lowercase hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Digests {
    /// 128-bit MD5 digest.
    #[get = "pub"]
    md5: String,
    /// 160-bit SHA-1 digest.
    #[get = "pub"]
    sha1: String,
}

/// Accumulates both digests over a stream of chunks.
#[derive(Default)]
struct Hasher {
    md5: Md5,
    sha1: Sha1,
}

impl Hasher {
    fn update(&mut self, chunk: &[u8]) {
        self.md5.update(chunk);
        self.sha1.update(chunk);
    }

    fn finalize(self) -> Digests {
        Digests {
            md5: format!("{:x}", self.md5.finalize()),
            sha1: format!("{:x}", self.sha1.finalize()),
        }
    }
}

/// Computes the digests of the image at `path`.
///
/// # Errors
/// - `ImageError::NotFound` if `path` is not a regular file
/// - `ImageError::IOError` if reading fails
pub fn digest_image(path: &Path, chunk_size: usize) -> Result<Digests, ImageError> {
    let mut reader = ImageReader::open(path)?;
    let digests = digest_reader(&mut reader, chunk_size)?;
    info!("Hashed {}", path.display());
    Ok(digests)
}

/// Computes the digests of the whole image behind an already opened reader.
///
/// The reader stays usable afterwards since every read seeks first.
pub fn digest_reader<R: Read + Seek>(
    reader: &mut ImageReader<R>,
    chunk_size: usize,
) -> Result<Digests, ImageError> {
    let mut hasher = Hasher::default();
    let total = reader.for_each_chunk(chunk_size, |chunk| hasher.update(chunk))?;
    debug!("Hashed {total} bytes");
    Ok(hasher.finalize())
}

/// Computes the digests of an in-memory byte sequence.
pub fn digest_bytes(data: &[u8]) -> Digests {
    let mut hasher = Hasher::default();
    hasher.update(data);
    hasher.finalize()
}

/// Writes `MD5-<image name>.txt` and `SHA1-<image name>.txt` into `dir`.
///
/// # Returns
/// - The paths of the written files.
pub fn write_checksum_files(
    image_path: &Path,
    digests: &Digests,
    dir: &Path,
) -> io::Result<Vec<PathBuf>> {
    let name = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no file name", image_path.display()),
            )
        })?;

    let mut written = vec![];
    for (algorithm, digest) in [("MD5", &digests.md5), ("SHA1", &digests.sha1)] {
        let path = dir.join(format!("{algorithm}-{name}.txt"));
        fs::write(&path, digest)?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_input_matches_reference_digests() {
        let digests = digest_bytes(b"");
        assert_eq!(digests.md5(), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(digests.sha1(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn known_sequence_matches_reference_digests() {
        let digests = digest_bytes(b"abc");
        assert_eq!(digests.md5(), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(digests.sha1(), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn chunk_size_does_not_change_the_digest() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i * 7 % 256) as u8).collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();

        let expected = digest_bytes(&data);
        for chunk_size in [1, 7, 512, 4096, 1 << 20] {
            assert_eq!(digest_image(file.path(), chunk_size).unwrap(), expected);
        }
    }

    #[test]
    fn reader_is_usable_after_hashing() {
        let data: Vec<u8> = (0..2048u32).map(|i| (i % 256) as u8).collect();
        let mut reader = ImageReader::new(std::io::Cursor::new(data.clone()));

        assert_eq!(digest_reader(&mut reader, 300).unwrap(), digest_bytes(&data));
        assert_eq!(reader.read_sector(1, 512).unwrap(), &data[512..1024]);
    }

    #[test]
    fn empty_file_on_disk() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let digests = digest_image(file.path(), 512).unwrap();
        assert_eq!(digests.md5(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn writes_one_file_per_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        let digests = digest_bytes(b"abc");
        let written =
            write_checksum_files(Path::new("/images/disk.dd"), &digests, dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("MD5-disk.dd.txt")).unwrap(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("SHA1-disk.dd.txt")).unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }
}
