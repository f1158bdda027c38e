use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use futures::{StreamExt, future, stream};

use super::error::StorageError;
use super::traits::{RowStream, SalesStore};
use crate::domain::{DateRange, Record};
use crate::streaming::Batch;

/// Concurrent in-memory sales store using DashMap
///
/// Rows get sequential ids starting at 1; queries scan ids in ascending order
/// without collecting results up front.
pub struct ConcurrentSalesStore {
    records: Arc<DashMap<i64, Record>>,
    last_id: AtomicI64,
    open_cursors: Arc<AtomicUsize>,
}

impl ConcurrentSalesStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            last_id: AtomicI64::new(0),
            open_cursors: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fetch a stored row by id
    pub fn get(&self, id: i64) -> Option<Record> {
        self.records.get(&id).map(|r| r.value().clone())
    }

    /// Number of query streams that have not been dropped yet
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }
}

impl Default for ConcurrentSalesStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts a cursor as open until dropped
struct CursorGuard(Arc<AtomicUsize>);

impl CursorGuard {
    fn open(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SalesStore for ConcurrentSalesStore {
    async fn bulk_insert(&self, batch: Batch, created_at: DateTime<Utc>) -> Result<u64, StorageError> {
        let rows = batch.len() as i64;
        // Reserve a contiguous id block so concurrent batches never interleave
        let first = self.last_id.fetch_add(rows, Ordering::SeqCst) + 1;

        for (id, record) in (first..).zip(batch.into_records()) {
            self.records.insert(id, record.persisted(id, created_at));
        }

        Ok(rows as u64)
    }

    async fn query(&self, range: DateRange) -> Result<RowStream, StorageError> {
        let guard = CursorGuard::open(&self.open_cursors);
        let records = Arc::clone(&self.records);
        let last = self.last_id.load(Ordering::SeqCst);

        let rows = stream::iter(1..=last).filter_map(move |id| {
            let _cursor = &guard;
            let row = records
                .get(&id)
                .filter(|r| range.contains(r.last_purchase_date()))
                .map(|r| serde_json::to_value(r.value()).map_err(StorageError::from));
            future::ready(row)
        });

        Ok(rows.boxed())
    }
}
