//! Error types for field decoding and layout construction.

use std::str::Utf8Error;
use thiserror::Error;

/// Errors that can occur while describing a layout or extracting values from a buffer.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The byte range of a field is not entirely contained in the supplied buffer.
    #[error("Field at byte {offset} ({length} bytes) is out of bounds: only {available} bytes available")]
    OutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },

    /// The bytes of a string field are not valid UTF-8.
    #[error("Invalid text in field at byte {offset}: {source}")]
    DecodeError {
        offset: usize,
        #[source]
        source: Utf8Error,
    },

    /// Integer fields are 1, 2 or 4 bytes wide.
    #[error("Invalid width for integer field at offset {offset}: {length} bytes. Legal values: 1, 2, 4")]
    InvalidWidth { offset: usize, length: usize },

    /// A field extends past the declared size of its structure.
    #[error("Field `{field}` ({offset}..{end}) exceeds the {size}-byte structure `{structure}`")]
    FieldOutsideStructure {
        structure: &'static str,
        field: &'static str,
        offset: usize,
        end: usize,
        size: usize,
    },

    /// Two fields of the same structure share bytes.
    #[error("Fields `{first}` and `{second}` of `{structure}` overlap")]
    OverlappingFields {
        structure: &'static str,
        first: &'static str,
        second: &'static str,
    },

    /// Two fields of the same structure share a name.
    #[error("Field `{field}` is declared twice in `{structure}`")]
    DuplicateField {
        structure: &'static str,
        field: &'static str,
    },

    /// An integer was requested from a field that does not hold one.
    #[error("Field at offset {0} does not hold an integer")]
    NotAnInteger(usize),

    /// A value does not fit in the width of the field it is encoded into.
    #[error("Value {value} does not fit in {length} bytes")]
    ValueTooWide { value: u32, length: usize },

    /// A record lacks a field the caller relies on.
    #[error("Missing field `{0}`")]
    MissingField(String),

    /// Parsing error reported by binread.
    #[error("BinRead Error: `{0}`")]
    BinReadError(binread::Error),
}

/// Converts BinRead errors into LayoutError.
impl From<binread::Error> for LayoutError {
    fn from(err: binread::Error) -> Self {
        LayoutError::BinReadError(err)
    }
}
