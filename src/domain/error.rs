use std::fmt;

use thiserror::Error;

use super::field::Field;
use super::raw::RawValue;

/// Error classification shared by every layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unrecognized field name
    Schema,
    /// Wrong runtime type for a recognized field
    Type,
    /// Value violates a domain constraint
    Range,
    /// Persistence or query failure
    Storage,
    /// Malformed request at the boundary
    Protocol,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Schema => "schema",
            Self::Type => "type",
            Self::Range => "range",
            Self::Storage => "storage",
            Self::Protocol => "protocol",
        };
        f.write_str(name)
    }
}

/// Row-level validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("unknown field \"{key}\"")]
    UnknownField { key: String, value: RawValue },

    #[error("expect \"{field}\" is \"integer\", actual \"{}\", value = \"{value}\"", .value.type_name())]
    NotInteger { field: Field, value: RawValue },

    #[error("expect \"{field}\" is \"string\", actual \"{}\"", .value.type_name())]
    NotText { field: Field, value: RawValue },

    #[error("expect \"{field}\" is \"string\" or \"date\", actual \"{}\", value = \"{value}\"", .value.type_name())]
    NotDate { field: Field, value: RawValue },

    #[error("expect \"{field}\" is valid date string, actual = \"{value}\"")]
    InvalidDate { field: Field, value: RawValue },

    /// Field absent, or present but outside its domain
    #[error("\"{field}\" {}", .field.constraint())]
    Constraint {
        field: Field,
        value: Option<RawValue>,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownField { .. } => ErrorKind::Schema,
            Self::NotInteger { .. } | Self::NotText { .. } | Self::NotDate { .. } => ErrorKind::Type,
            Self::InvalidDate { .. } | Self::Constraint { .. } => ErrorKind::Range,
        }
    }

    /// Name of the offending column as it should be reported
    pub fn field_name(&self) -> &str {
        match self {
            Self::UnknownField { key, .. } => key,
            Self::NotInteger { field, .. }
            | Self::NotText { field, .. }
            | Self::NotDate { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::Constraint { field, .. } => field.name(),
        }
    }

    /// The recognized field, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::UnknownField { .. } => None,
            Self::NotInteger { field, .. }
            | Self::NotText { field, .. }
            | Self::NotDate { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::Constraint { field, .. } => Some(*field),
        }
    }

    pub fn raw_value(&self) -> Option<&RawValue> {
        match self {
            Self::UnknownField { value, .. }
            | Self::NotInteger { value, .. }
            | Self::NotText { value, .. }
            | Self::NotDate { value, .. }
            | Self::InvalidDate { value, .. } => Some(value),
            Self::Constraint { value, .. } => value.as_ref(),
        }
    }
}
