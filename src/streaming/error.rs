use thiserror::Error;

use super::ingest::IngestState;
use crate::domain::{ErrorKind, Field, RawValue, ValidationError};
use crate::io::IoError;
use crate::storage::StorageError;

/// Cause of an aborted ingestion
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("{0}")]
    Read(#[from] IoError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("ingestion already ran and ended {0}")]
    AlreadyRan(IngestState),
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // Undecodable input is a malformed upload
            Self::Read(_) => ErrorKind::Protocol,
            Self::Validation(e) => e.kind(),
            Self::Storage(e) => e.kind(),
            Self::AlreadyRan(_) => ErrorKind::Protocol,
        }
    }
}

/// Ingestion failure with its row context
///
/// `row_index` is zero-based. For validation and read errors it is the
/// offending row; for storage errors it is the first row of the batch whose
/// write failed. `persisted` counts rows committed by earlier batches, which
/// stay committed.
#[derive(Error, Debug)]
#[error("#{row_index}: {error}")]
pub struct IngestFailure {
    pub row_index: usize,
    pub persisted: u64,
    #[source]
    pub error: IngestError,
}

impl IngestFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn field(&self) -> Option<Field> {
        match &self.error {
            IngestError::Validation(e) => e.field(),
            _ => None,
        }
    }

    pub fn raw_value(&self) -> Option<&RawValue> {
        match &self.error {
            IngestError::Validation(e) => e.raw_value(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_displays_row_prefix() {
        let failure = IngestFailure {
            row_index: 0,
            persisted: 0,
            error: ValidationError::NotInteger {
                field: Field::Age,
                value: RawValue::from("18.1"),
            }
            .into(),
        };

        assert_eq!(
            failure.to_string(),
            "#0: expect \"AGE\" is \"integer\", actual \"string\", value = \"18.1\""
        );
        assert_eq!(failure.kind(), ErrorKind::Type);
        assert_eq!(failure.field(), Some(Field::Age));
        assert_eq!(failure.raw_value(), Some(&RawValue::from("18.1")));
    }

    #[test]
    fn storage_failure_keeps_driver_message() {
        let failure = IngestFailure {
            row_index: 40,
            persisted: 40,
            error: StorageError::Rejected("duplicate key".to_string()).into(),
        };

        assert_eq!(failure.to_string(), "#40: duplicate key");
        assert_eq!(failure.kind(), ErrorKind::Storage);
        assert_eq!(failure.field(), None);
    }
}
