//! Structure descriptors.
//!
//! A [`StructSpec`] is an ordered list of named [`FieldSpec`]s describing one on-disk
//! record. Layouts are checked once when they are built: integer widths, fields
//! contained in the declared size, no overlapping byte ranges and unique names.

use getset::Getters;
use log::debug;

use super::field::FieldSpec;
use super::layout_error::LayoutError;
use super::record::ExtractedRecord;

/// Layout of a fixed-size on-disk record.
#[derive(Debug, Clone, Getters)]
pub struct StructSpec {
    /// Name of the record, used in diagnostics.
    #[get = "pub"]
    name: &'static str,
    /// Declared size of the record in bytes.
    #[get = "pub"]
    size: usize,
    /// The fields in declaration order.
    #[get = "pub"]
    fields: Vec<(&'static str, FieldSpec)>,
}

impl StructSpec {
    /// Builds and validates a structure layout.
    ///
    /// # Errors
    /// - `LayoutError::InvalidWidth` for an integer field that is not 1, 2 or 4 bytes wide
    /// - `LayoutError::FieldOutsideStructure` if a field exceeds `size`
    /// - `LayoutError::OverlappingFields` if two fields share bytes
    /// - `LayoutError::DuplicateField` if two fields share a name
    pub fn new(
        name: &'static str,
        size: usize,
        fields: Vec<(&'static str, FieldSpec)>,
    ) -> Result<Self, LayoutError> {
        let spec = StructSpec { name, size, fields };
        spec.validate()
    }

    /// Returns the field named `name`.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, spec)| spec)
    }

    /// Applies every field to `buf` for a structure starting at `base`.
    ///
    /// The first failing field aborts the extraction; no partial record is returned.
    pub fn extract(&self, buf: &[u8], base: usize) -> Result<ExtractedRecord, LayoutError> {
        let fields = self
            .fields
            .iter()
            .map(|(name, spec)| {
                spec.decode(buf, base)
                    .map(|value| (*name, value))
                    .inspect_err(|err| debug!("{}.{name} at {base}: {err}", self.name))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Extracted `{}` at byte {base}", self.name);
        Ok(ExtractedRecord::new(fields))
    }

    fn validate(self) -> Result<Self, LayoutError> {
        self.check_fields()?.check_non_overlapping()
    }

    /// Checks the width, bounds and name of every field.
    fn check_fields(self) -> Result<Self, LayoutError> {
        for (i, (name, spec)) in self.fields.iter().enumerate() {
            spec.validate()?;

            let end = spec.offset() + spec.length();
            if end > self.size {
                return Err(LayoutError::FieldOutsideStructure {
                    structure: self.name,
                    field: *name,
                    offset: spec.offset(),
                    end,
                    size: self.size,
                });
            }

            if self.fields[..i].iter().any(|(other, _)| other == name) {
                return Err(LayoutError::DuplicateField {
                    structure: self.name,
                    field: *name,
                });
            }
        }

        Ok(self)
    }

    /// Checks that no two fields share a byte.
    fn check_non_overlapping(self) -> Result<Self, LayoutError> {
        let mut ranges: Vec<_> = self
            .fields
            .iter()
            .map(|(name, spec)| (spec.offset(), spec.offset() + spec.length(), *name))
            .collect();
        ranges.sort_by_key(|(start, _, _)| *start);

        match ranges.windows(2).find(|pair| pair[0].1 > pair[1].0) {
            Some(pair) => Err(LayoutError::OverlappingFields {
                structure: self.name,
                first: pair[0].2,
                second: pair[1].2,
            }),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::field::DisplayMode;

    fn entry() -> StructSpec {
        StructSpec::new(
            "entry",
            8,
            vec![
                ("kind", FieldSpec::int(0, 1, DisplayMode::Hex)),
                ("start", FieldSpec::int(4, 4, DisplayMode::Decimal)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn extracts_all_fields_relative_to_base() {
        let buf = [0xFF, 0xFF, 0x0B, 0, 0, 0, 0x00, 0x08, 0, 0];
        let record = entry().extract(&buf, 2).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.rendered("kind").as_deref(), Some("0xb"));
        assert_eq!(record.rendered("start").as_deref(), Some("2048"));
    }

    #[test]
    fn extraction_is_atomic() {
        // `kind` fits but `start` does not.
        let buf = [0x0B, 0, 0, 0, 0, 0];
        assert!(matches!(
            entry().extract(&buf, 0),
            Err(LayoutError::OutOfBounds { offset: 4, .. })
        ));
    }

    #[test]
    fn rejects_overlapping_fields() {
        let spec = StructSpec::new(
            "overlap",
            8,
            vec![
                ("a", FieldSpec::int(0, 4, DisplayMode::Decimal)),
                ("b", FieldSpec::int(2, 2, DisplayMode::Decimal)),
            ],
        );
        assert!(matches!(
            spec,
            Err(LayoutError::OverlappingFields {
                first: "a",
                second: "b",
                ..
            })
        ));
    }

    #[test]
    fn rejects_fields_outside_the_structure() {
        let spec = StructSpec::new(
            "short",
            4,
            vec![("a", FieldSpec::int(2, 4, DisplayMode::Decimal))],
        );
        assert!(matches!(
            spec,
            Err(LayoutError::FieldOutsideStructure { end: 6, size: 4, .. })
        ));
    }

    #[test]
    fn rejects_invalid_widths_and_duplicate_names() {
        let spec = StructSpec::new(
            "wide",
            16,
            vec![("a", FieldSpec::int(0, 8, DisplayMode::Decimal))],
        );
        assert!(matches!(spec, Err(LayoutError::InvalidWidth { length: 8, .. })));

        let spec = StructSpec::new(
            "dup",
            16,
            vec![
                ("a", FieldSpec::int(0, 1, DisplayMode::Decimal)),
                ("a", FieldSpec::int(1, 1, DisplayMode::Decimal)),
            ],
        );
        assert!(matches!(spec, Err(LayoutError::DuplicateField { field: "a", .. })));
    }
}
