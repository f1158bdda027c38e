use tracing::debug;

use crate::domain::DateRange;
use crate::storage::{RowStream, SalesStore, StorageError};

/// Opens lazily pulled cursors over stored rows
pub struct QueryStreamer<S: SalesStore> {
    store: S,
}

impl<S: SalesStore> QueryStreamer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Rows with `last_purchase_date` inside `range`, in storage scan order
    ///
    /// Nothing is fetched until the stream is polled, and dropping it closes
    /// the cursor.
    pub async fn open(&self, range: DateRange) -> Result<RowStream, StorageError> {
        debug!(from = ?range.from(), to = ?range.to(), "Opening query stream");
        self.store.query(range).await
    }
}
