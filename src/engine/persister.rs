use chrono::Utc;
use tracing::debug;

use crate::storage::{SalesStore, StorageError};
use crate::streaming::Batch;

/// Writes one batch per call as a single statement
///
/// Every row of a batch shares the `created_at` taken when the write starts.
/// Callers await each call before issuing the next, so batches land in order
/// and at most one is in flight.
pub struct BulkPersister<S: SalesStore> {
    store: S,
}

impl<S: SalesStore> BulkPersister<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a batch, returning the rows the store reports as written
    pub async fn persist(&self, batch: Batch) -> Result<u64, StorageError> {
        let rows = batch.len();
        let created_at = Utc::now();

        let written = self.store.bulk_insert(batch, created_at).await?;
        debug!(rows, written, "Batch persisted");

        Ok(written)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
