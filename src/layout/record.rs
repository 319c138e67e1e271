//! Named values produced by extracting a structure.

use std::fmt;

use super::field::DisplayMode;
use super::layout_error::LayoutError;

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// An unsigned integer and the way it is rendered.
    Integer { raw: u32, display: DisplayMode },
    /// An enumerated integer; `label` is `None` for values missing from the table.
    Label {
        raw: u32,
        label: Option<&'static str>,
    },
    /// Decoded text.
    Text(String),
}

impl FieldValue {
    /// Returns the raw integer behind the value, if any.
    pub fn raw(&self) -> Option<u32> {
        match self {
            FieldValue::Integer { raw, .. } | FieldValue::Label { raw, .. } => Some(*raw),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer {
                raw,
                display: DisplayMode::Decimal,
            } => write!(f, "{raw}"),
            FieldValue::Integer {
                raw,
                display: DisplayMode::Hex,
            } => write!(f, "{raw:#x}"),
            FieldValue::Label {
                label: Some(label), ..
            } => write!(f, "{label}"),
            FieldValue::Label { raw, label: None } => write!(f, "? ({raw:#x})"),
            FieldValue::Text(text) => write!(f, "{text}"),
        }
    }
}

/// The values extracted from one structure, in the order the fields were declared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedRecord {
    fields: Vec<(&'static str, FieldValue)>,
}

impl ExtractedRecord {
    pub(crate) fn new(fields: Vec<(&'static str, FieldValue)>) -> Self {
        ExtractedRecord { fields }
    }

    /// Appends a field to the record.
    pub(crate) fn with_field(mut self, name: &'static str, value: FieldValue) -> Self {
        self.fields.push((name, value));
        self
    }

    /// Returns the value of the field `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Returns the rendered value of the field `name`.
    pub fn rendered(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| value.to_string())
    }

    /// Returns the raw integer held by the field `name`.
    ///
    /// # Errors
    /// - `LayoutError::MissingField` if the record has no integer field with that name
    pub fn raw(&self, name: &str) -> Result<u32, LayoutError> {
        self.get(name)
            .and_then(FieldValue::raw)
            .ok_or_else(|| LayoutError::MissingField(name.to_string()))
    }

    /// Iterates over the fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Renders the record as `{name: 'value', ...}`.
impl fmt::Display for ExtractedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: '{value}'")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ExtractedRecord {
        ExtractedRecord::new(vec![
            (
                "partition_type",
                FieldValue::Integer {
                    raw: 0x0C,
                    display: DisplayMode::Hex,
                },
            ),
            ("label", FieldValue::Text(String::from("NO NAME"))),
        ])
    }

    #[test]
    fn looks_up_fields_by_name() {
        let record = record();
        assert_eq!(record.rendered("partition_type").as_deref(), Some("0xc"));
        assert_eq!(record.raw("partition_type").unwrap(), 0x0C);
        assert!(record.get("unknown").is_none());
    }

    #[test]
    fn raw_requires_an_integer_field() {
        let record = record();
        assert!(matches!(record.raw("label"), Err(LayoutError::MissingField(f)) if f == "label"));
        assert!(matches!(record.raw("absent"), Err(LayoutError::MissingField(_))));
    }

    #[test]
    fn displays_fields_in_order() {
        assert_eq!(
            record().to_string(),
            "{partition_type: '0xc', label: 'NO NAME'}"
        );
    }
}
