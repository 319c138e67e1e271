//! Declarative description of fixed on-disk records.
//!
//! This module provides:
//! - [`FieldSpec`]: how to decode a single fixed-width value out of a byte buffer
//! - [`StructSpec`]: an ordered set of named fields describing one record layout
//! - [`ExtractedRecord`]: the named values produced by applying a [`StructSpec`]
//! - [`Layouts`]: the MBR and VBR layouts used by the interpreter

pub mod catalog;
pub mod field;
pub mod layout_error;
pub mod record;
pub mod structure;

pub use catalog::Layouts;
pub use field::{DisplayMode, Endianness, FieldKind, FieldSpec};
pub use layout_error::LayoutError;
pub use record::{ExtractedRecord, FieldValue};
pub use structure::StructSpec;
