//! Prelude module for convenient imports
//!
//! Import everything you need with: `use sales::prelude::*;`

// Domain types
pub use crate::domain::{
    DateRange, ErrorKind, Field, Gender, RawRow, RawValue, Record, ValidationError,
    parse_iso8601, validate_row,
};

// Storage types
pub use crate::storage::{
    ConcurrentSalesStore, PostgresConfig, PostgresSalesStore, RowStream, SalesStore,
    StorageError, StoredRow,
};

// Engine types
pub use crate::engine::{BulkPersister, QueryStreamer};

// IO types
pub use crate::io::{CsvRowStream, IoError, LineSerializer, write_lines};

// Streaming types
pub use crate::streaming::{
    Batch, BatchAccumulator, BatchSize, BatchStream, ExportPipeline, IngestError,
    IngestFailure, IngestPipeline, IngestState,
};

// App types
pub use crate::app::{
    AppError, Cli, CliApp, Commands, ConfigError, IngestResponse, ProtocolError, init_logging,
};
