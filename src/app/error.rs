use std::io;
use thiserror::Error;

use super::boundary::ProtocolError;
use super::config::ConfigError;
use crate::domain::ErrorKind;
use crate::io::IoError;
use crate::storage::StorageError;
use crate::streaming::IngestFailure;

/// Top-level application errors unifying all layer errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Output(#[from] IoError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Ingest(#[from] IngestFailure),

    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Classification, where the error belongs to the shared taxonomy
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Storage(e) => Some(e.kind()),
            Self::Ingest(e) => Some(e.kind()),
            Self::Protocol(e) => Some(e.kind()),
            Self::Output(IoError::Storage(e)) => Some(e.kind()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(
            AppError::from(ProtocolError::MissingDateBound).to_string(),
            "provide at least one of \"dateFrom\" and \"dateTo\""
        );
        assert_eq!(
            AppError::from(ConfigError::InvalidMaxConnections).to_string(),
            "invalid configuration: max connections must be at least 1"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err = AppError::from(io_err);

        match app_err {
            AppError::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }
        assert_eq!(AppError::from(io::Error::other("x")).kind(), None);
    }

    #[test]
    fn kinds_follow_source_layer() {
        let storage = AppError::from(StorageError::Rejected("gone".to_string()));
        assert_eq!(storage.kind(), Some(ErrorKind::Storage));

        let mid_export = AppError::from(IoError::from(StorageError::Rejected("gone".to_string())));
        assert_eq!(mid_export.kind(), Some(ErrorKind::Storage));

        let protocol = AppError::from(ProtocolError::InvalidDate { param: "dateTo" });
        assert_eq!(protocol.kind(), Some(ErrorKind::Protocol));
    }
}
