//! Sector-addressed reads over a raw disk image.

use log::debug;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use super::image_error::ImageError;

/// Read-only access to a raw disk image.
///
/// The reader is generic over its source so that in-memory images can be used in place
/// of files. The underlying file handle is released when the reader is dropped.
#[derive(Debug)]
pub struct ImageReader<R> {
    inner: R,
}

impl ImageReader<File> {
    /// Opens the image at `path` for reading.
    ///
    /// # Errors
    /// - `ImageError::NotFound` if `path` does not resolve to a regular file
    /// - `ImageError::IOError` if the file cannot be opened
    pub fn open(path: &Path) -> Result<Self, ImageError> {
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => {}
            _ => return Err(ImageError::NotFound(path.to_path_buf())),
        }

        debug!("Opening image {}", path.display());
        Ok(ImageReader::new(File::open(path)?))
    }
}

impl<R: Read + Seek> ImageReader<R> {
    pub fn new(inner: R) -> Self {
        ImageReader { inner }
    }

    /// Reads sector `sector` of `sector_size` bytes.
    ///
    /// # Errors
    /// - `ImageError::Truncated` if the image ends before the end of the sector
    pub fn read_sector(&mut self, sector: u64, sector_size: usize) -> Result<Vec<u8>, ImageError> {
        let offset = sector.checked_mul(sector_size as u64).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Sector {sector} is beyond any addressable offset"),
            )
        })?;

        self.read_at(offset, sector_size)
    }

    /// Reads exactly `len` bytes starting at byte `offset`.
    ///
    /// At most `len` bytes are read from the image. Short reads are reported, never
    /// padded.
    pub fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, ImageError> {
        self.inner.seek(SeekFrom::Start(offset))?;

        let mut buffer = Vec::with_capacity(len);
        Read::by_ref(&mut self.inner)
            .take(len as u64)
            .read_to_end(&mut buffer)?;

        if buffer.len() < len {
            return Err(ImageError::Truncated {
                offset,
                requested: len,
                available: buffer.len(),
            });
        }

        Ok(buffer)
    }

    /// Streams the whole image from its first byte in chunks of `chunk_size` bytes.
    ///
    /// # Returns
    /// - The number of bytes streamed.
    pub fn for_each_chunk<F: FnMut(&[u8])>(
        &mut self,
        chunk_size: usize,
        mut f: F,
    ) -> Result<u64, ImageError> {
        self.inner.seek(SeekFrom::Start(0))?;

        let mut buffer = vec![0; chunk_size.max(1)];
        let mut total = 0;
        loop {
            let n = match self.inner.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            f(&buffer[..n]);
            total += n as u64;
        }

        Ok(total)
    }
}
