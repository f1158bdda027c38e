use thiserror::Error;

use crate::storage::PostgresConfig;
use crate::streaming::BatchSize;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("batch size must be a positive integer, got {0}")]
    InvalidBatchSize(f64),

    #[error("max connections must be at least 1")]
    InvalidMaxConnections,

    #[error("database url must not be empty")]
    MissingDatabaseUrl,
}

/// Batch size from a possibly fractional number, defaulting when absent
pub fn batch_size(raw: Option<f64>) -> Result<BatchSize, ConfigError> {
    match raw {
        None => Ok(BatchSize::default()),
        Some(size) => BatchSize::from_f64(size).ok_or(ConfigError::InvalidBatchSize(size)),
    }
}

pub fn postgres_config(database_url: &str, max_connections: usize) -> Result<PostgresConfig, ConfigError> {
    if database_url.trim().is_empty() {
        return Err(ConfigError::MissingDatabaseUrl);
    }
    if max_connections == 0 {
        return Err(ConfigError::InvalidMaxConnections);
    }

    Ok(PostgresConfig {
        database_url: database_url.to_string(),
        max_connections,
    })
}
