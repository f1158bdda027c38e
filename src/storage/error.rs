use thiserror::Error;

use crate::domain::ErrorKind;

/// Storage-level errors
///
/// Driver messages are carried through unchanged.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("{0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("failed to create connection pool: {0}")]
    PoolBuild(String),

    #[error("batch of {rows} rows needs {params} bind parameters, limit is {limit}")]
    BatchTooLarge {
        rows: usize,
        params: usize,
        limit: usize,
    },

    #[error("row serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Write refused by a store that has no driver error of its own,
    /// such as an in-process test double
    #[error("{0}")]
    Rejected(String),
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Storage
    }
}
