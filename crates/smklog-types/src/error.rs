use std::fmt;

use crate::record::{RecordCategory, RecordKind};

/// Result type for smklog-types operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// A tag string that is not a member of the expected enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} tag {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownTag {}

/// A structurally valid JSON object that is not a valid record
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The decoded value was not a JSON object
    NotAnObject { found: String },

    /// A required key is absent
    MissingField { field: String },

    /// `type` holds something other than `standard`, `meta` or `snakemake`
    InvalidCategory { value: String },

    /// `event` is not registered for the record's category
    UnknownEvent {
        category: RecordCategory,
        value: String,
    },

    /// A field is present but has the wrong shape
    InvalidField { field: String, reason: String },

    /// A key that is not part of the variant's field contract
    UnknownField { kind: RecordKind, field: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::NotAnObject { found } => {
                write!(f, "expected a JSON object, found {}", found)
            }
            DecodeError::MissingField { field } => {
                write!(f, "missing required field `{}`", field)
            }
            DecodeError::InvalidCategory { value } => {
                write!(f, "invalid value for field `type`: {}", value)
            }
            DecodeError::UnknownEvent { category, value } => {
                write!(f, "unknown {} event {:?}", category, value)
            }
            DecodeError::InvalidField { field, reason } => {
                write!(f, "invalid value for field `{}`: {}", field, reason)
            }
            DecodeError::UnknownField { kind, field } => {
                write!(f, "unknown field `{}` for {} record", field, kind)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// The static variant table is inconsistent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two variants were registered under the same key
    Duplicate {
        kind: RecordKind,
        first: &'static str,
        second: &'static str,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Duplicate {
                kind,
                first,
                second,
            } => write!(
                f,
                "record kind {} registered twice ({} and {})",
                kind, first, second
            ),
        }
    }
}

impl std::error::Error for RegistryError {}
