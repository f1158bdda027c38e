use std::io;
use thiserror::Error;

use crate::storage::StorageError;

/// IO-level errors for CSV decoding and NDJSON output
#[derive(Error, Debug)]
pub enum IoError {
    #[error("CSV parsing error: {0}")]
    CsvAsync(#[from] csv_async::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_passes_through_verbatim() {
        let err = IoError::from(StorageError::Rejected("connection reset".to_string()));
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let wrapped = IoError::from(io_err);

        match wrapped {
            IoError::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }
        assert_eq!(
            IoError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed")).to_string(),
            "IO error: closed"
        );
    }
}
