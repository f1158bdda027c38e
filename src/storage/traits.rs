use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::Stream;

use super::error::StorageError;
use crate::domain::DateRange;
use crate::streaming::Batch;

/// A stored row exactly as the substrate returns it
pub type StoredRow = serde_json::Value;

/// Lazily pulled query results; dropping the stream releases the cursor
pub type RowStream = Pin<Box<dyn Stream<Item = Result<StoredRow, StorageError>> + Send>>;

/// Persistent store for sales records with pluggable backends
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Write a whole batch in one statement, stamping every row with `created_at`
    ///
    /// Returns the number of rows the substrate reports as written.
    async fn bulk_insert(&self, batch: Batch, created_at: DateTime<Utc>) -> Result<u64, StorageError>;

    /// Open a forward-only cursor over rows whose purchase date lies in `range`
    async fn query(&self, range: DateRange) -> Result<RowStream, StorageError>;
}

// Allows several pipelines to share one store
#[async_trait]
impl<S: SalesStore + ?Sized> SalesStore for Arc<S> {
    async fn bulk_insert(&self, batch: Batch, created_at: DateTime<Utc>) -> Result<u64, StorageError> {
        (**self).bulk_insert(batch, created_at).await
    }

    async fn query(&self, range: DateRange) -> Result<RowStream, StorageError> {
        (**self).query(range).await
    }
}
