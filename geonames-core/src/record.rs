//! Raw rows and the typed records built from them.

use std::fmt::Display;
use std::ops::Deref;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while validating a raw row into a typed record.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    /// A required field was absent or empty.
    #[error("missing required field {field}")]
    MissingField {
        /// Field name.
        field: &'static str,
    },
    /// A field could not be parsed into its target type.
    #[error("invalid value {value:?} for field {field}: {reason}")]
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// Raw text.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// A numeric field fell outside its permitted range.
    #[error("value {value} for field {field} is outside [{min}, {max}]")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Parsed value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// A text field had the wrong length.
    #[error("value {value:?} for field {field} must be {expected} characters long")]
    InvalidLength {
        /// Field name.
        field: &'static str,
        /// Raw text.
        value: String,
        /// Required length in characters.
        expected: usize,
    },
    /// A text field did not match its expected shape.
    #[error("value {value:?} for field {field} does not look like {expected}")]
    InvalidPattern {
        /// Field name.
        field: &'static str,
        /// Raw text.
        value: String,
        /// Human description of the expected shape.
        expected: &'static str,
    },
}

/// One parsed input line: field names zipped with their raw text.
///
/// Fields missing from a short line are simply absent; lookups treat absent
/// and empty fields alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(&'static str, String)>,
}

impl RawRow {
    /// Create an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Build a row from literal pairs.
    ///
    /// ```
    /// use geonames_core::RawRow;
    ///
    /// let row = RawRow::from_pairs(&[("code", "AF"), ("geoname_id", "6255146")]);
    /// assert_eq!(row.text("code"), Some("AF"));
    /// assert_eq!(row.parse::<i64>("geoname_id"), Ok(6_255_146));
    /// ```
    #[must_use]
    pub fn from_pairs(pairs: &[(&'static str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(name, value)| (*name, (*value).to_owned()))
                .collect(),
        }
    }

    /// Append a field.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.fields.push((name, value.into()));
    }

    /// Number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw text of `field`, including empty strings.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Text of `field`, with empty values treated as absent.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|value| !value.is_empty())
    }

    /// Text of a field that must be present and non-empty.
    pub fn required(&self, field: &'static str) -> Result<&str, RecordError> {
        self.text(field)
            .ok_or(RecordError::MissingField { field })
    }

    /// Parse a required field.
    pub fn parse<T>(&self, field: &'static str) -> Result<T, RecordError>
    where
        T: FromStr,
        T::Err: Display,
    {
        parse_text(field, self.required(field)?)
    }

    /// Parse an optional field; absent or empty yields `None`.
    pub fn parse_optional<T>(&self, field: &'static str) -> Result<Option<T>, RecordError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.text(field)
            .map(|value| parse_text(field, value))
            .transpose()
    }
}

fn parse_text<T>(field: &'static str, value: &str) -> Result<T, RecordError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|err: T::Err| RecordError::InvalidValue {
            field,
            value: value.to_owned(),
            reason: err.to_string(),
        })
}

/// A validated value constructed from one [`RawRow`].
pub trait Record: Sized {
    /// Validate and convert a raw row.
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError>;
}

/// A record tagged with its 1-based position in the source.
///
/// Dereferences to the record so predicates and transforms can read fields
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Numbered<R> {
    /// Position of the row after any header or comment lines.
    pub row_num: u64,
    /// The validated record.
    pub record: R,
}

impl<R> Deref for Numbered<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}
