//! Field descriptors.
//!
//! A [`FieldSpec`] describes how to decode one fixed-width value located at a byte
//! offset relative to the base of a structure. Three kinds of values are supported:
//! - raw unsigned integers, rendered in decimal or hexadecimal
//! - enumerated integers, rendered through a table of labels
//! - null-terminated strings, bounded by a maximum length

use binread::BinReaderExt;
use std::io;

use super::layout_error::LayoutError;
use super::record::FieldValue;

/// Byte order of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl From<Endianness> for binread::Endian {
    fn from(endianness: Endianness) -> Self {
        match endianness {
            Endianness::Little => binread::Endian::Little,
            Endianness::Big => binread::Endian::Big,
        }
    }
}

/// How a raw integer is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Plain decimal, e.g. `2048`.
    Decimal,
    /// `0x`-prefixed lowercase hexadecimal without padding, e.g. `0x6`.
    Hex,
}

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// An unsigned integer.
    RawInteger(DisplayMode),
    /// An unsigned integer looked up in a table of `(value, label)` pairs.
    EnumInteger(&'static [(u32, &'static str)]),
    /// Text ending at the first zero byte, at most `max_length` bytes long.
    NullTerminatedString { max_length: usize },
}

/// Declarative description of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    offset: usize,
    length: usize,
    kind: FieldKind,
    endianness: Endianness,
}

impl FieldSpec {
    /// A little-endian unsigned integer of `length` bytes.
    pub const fn int(offset: usize, length: usize, display: DisplayMode) -> Self {
        FieldSpec {
            offset,
            length,
            kind: FieldKind::RawInteger(display),
            endianness: Endianness::Little,
        }
    }

    /// A little-endian unsigned integer rendered through `labels`.
    pub const fn enumerated(
        offset: usize,
        length: usize,
        labels: &'static [(u32, &'static str)],
    ) -> Self {
        FieldSpec {
            offset,
            length,
            kind: FieldKind::EnumInteger(labels),
            endianness: Endianness::Little,
        }
    }

    /// A null-terminated string of at most `max_length` bytes.
    pub const fn string(offset: usize, max_length: usize) -> Self {
        FieldSpec {
            offset,
            length: max_length,
            kind: FieldKind::NullTerminatedString { max_length },
            endianness: Endianness::Little,
        }
    }

    /// Returns the same field read in big-endian byte order.
    pub const fn big_endian(mut self) -> Self {
        self.endianness = Endianness::Big;
        self
    }

    /// Offset of the field relative to the structure base.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes the field occupies (the maximum length for strings).
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Checks that integer fields are 1, 2 or 4 bytes wide.
    pub fn validate(&self) -> Result<(), LayoutError> {
        match self.kind {
            FieldKind::NullTerminatedString { .. } => Ok(()),
            _ if matches!(self.length, 1 | 2 | 4) => Ok(()),
            _ => Err(LayoutError::InvalidWidth {
                offset: self.offset,
                length: self.length,
            }),
        }
    }

    /// Decodes the field out of `buf` for a structure starting at `base`.
    ///
    /// # Errors
    /// - `LayoutError::OutOfBounds` if the field does not fit in `buf`; a string may stop
    ///   at the end of `buf` when its terminator comes first
    /// - `LayoutError::DecodeError` if a string field is not valid UTF-8
    pub fn decode(&self, buf: &[u8], base: usize) -> Result<FieldValue, LayoutError> {
        match self.kind {
            FieldKind::RawInteger(display) => Ok(FieldValue::Integer {
                raw: self.read_integer(buf, base)?,
                display,
            }),
            FieldKind::EnumInteger(labels) => {
                let raw = self.read_integer(buf, base)?;
                let label = labels
                    .iter()
                    .find(|(value, _)| *value == raw)
                    .map(|(_, label)| *label);
                Ok(FieldValue::Label { raw, label })
            }
            FieldKind::NullTerminatedString { max_length } => {
                let bytes = self.clipped_window(buf, base, max_length)?;
                let bytes = match bytes.iter().position(|b| *b == 0) {
                    Some(end) => &bytes[..end],
                    None if bytes.len() == max_length => bytes,
                    None => return Err(self.out_of_bounds(buf, base, max_length)),
                };
                let text = std::str::from_utf8(bytes).map_err(|source| {
                    LayoutError::DecodeError {
                        offset: base + self.offset,
                        source,
                    }
                })?;
                Ok(FieldValue::Text(text.to_string()))
            }
        }
    }

    /// Reads the raw unsigned value of an integer field.
    pub fn read_integer(&self, buf: &[u8], base: usize) -> Result<u32, LayoutError> {
        if let FieldKind::NullTerminatedString { .. } = self.kind {
            return Err(LayoutError::NotAnInteger(self.offset));
        }
        self.validate()?;

        let bytes = self.window(buf, base, self.length)?;
        let mut reader = io::Cursor::new(bytes);
        let endian = self.endianness.into();

        let value = match self.length {
            1 => u32::from(reader.read_type::<u8>(endian)?),
            2 => u32::from(reader.read_type::<u16>(endian)?),
            _ => reader.read_type::<u32>(endian)?,
        };
        Ok(value)
    }

    /// Encodes `value` into the bytes an integer field would hold on disk.
    pub fn encode(&self, value: u32) -> Result<Vec<u8>, LayoutError> {
        if let FieldKind::NullTerminatedString { .. } = self.kind {
            return Err(LayoutError::NotAnInteger(self.offset));
        }
        self.validate()?;

        if self.length < 4 && value >> (8 * self.length) != 0 {
            return Err(LayoutError::ValueTooWide {
                value,
                length: self.length,
            });
        }

        let bytes = match self.endianness {
            Endianness::Little => value.to_le_bytes()[..self.length].to_vec(),
            Endianness::Big => value.to_be_bytes()[4 - self.length..].to_vec(),
        };
        Ok(bytes)
    }

    /// Returns the `len` bytes at `base + offset`, checking the range explicitly.
    fn window<'a>(&self, buf: &'a [u8], base: usize, len: usize) -> Result<&'a [u8], LayoutError> {
        let start = base.checked_add(self.offset);
        match start.and_then(|start| start.checked_add(len).map(|end| (start, end))) {
            Some((start, end)) if end <= buf.len() => Ok(&buf[start..end]),
            _ => Err(self.out_of_bounds(buf, base, len)),
        }
    }

    /// Returns at most `len` bytes at `base + offset`, stopping at the end of `buf`.
    ///
    /// The start of the field must lie inside `buf` (or right at its end).
    fn clipped_window<'a>(
        &self,
        buf: &'a [u8],
        base: usize,
        len: usize,
    ) -> Result<&'a [u8], LayoutError> {
        match base.checked_add(self.offset) {
            Some(start) if start <= buf.len() => {
                let end = start.saturating_add(len).min(buf.len());
                Ok(&buf[start..end])
            }
            _ => Err(self.out_of_bounds(buf, base, len)),
        }
    }

    fn out_of_bounds(&self, buf: &[u8], base: usize, len: usize) -> LayoutError {
        LayoutError::OutOfBounds {
            offset: base.saturating_add(self.offset),
            length: len,
            available: buf.len(),
        }
    }
}
