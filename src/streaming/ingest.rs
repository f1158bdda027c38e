use std::fmt;
use std::pin::pin;

use futures::{Stream, StreamExt};
use tracing::{debug, info, warn};

use super::batch::{BatchSize, BatchStream};
use super::error::{IngestError, IngestFailure};
use crate::domain::{RawRow, validate_row};
use crate::engine::BulkPersister;
use crate::io::IoError;
use crate::storage::SalesStore;

/// Ingestion lifecycle
///
/// `Idle → Validating → (Batching ⇄ Persisting) → Completed | Failed`.
/// Both end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestState {
    Idle,
    Validating,
    Batching,
    Persisting,
    Completed,
    Failed,
}

impl IngestState {
    pub fn can_transition_to(self, next: IngestState) -> bool {
        use IngestState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Batching | Completed | Failed)
                | (Batching, Persisting | Completed | Failed)
                | (Persisting, Batching | Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for IngestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Validate, batch and persist one upload
///
/// Rows are pulled one at a time and only while the persister is idle, so at
/// most one batch plus one partial buffer is held in memory. The first bad row
/// or failed write ends the run.
pub struct IngestPipeline<S: SalesStore> {
    persister: BulkPersister<S>,
    batch_size: BatchSize,
    state: IngestState,
}

impl<S: SalesStore> IngestPipeline<S> {
    pub fn new(store: S, batch_size: BatchSize) -> Self {
        Self {
            persister: BulkPersister::new(store),
            batch_size,
            state: IngestState::Idle,
        }
    }

    pub fn state(&self) -> IngestState {
        self.state
    }

    pub fn store(&self) -> &S {
        self.persister.store()
    }

    /// Run the pipeline to completion, returning the number of rows persisted
    ///
    /// A pipeline runs once. Later calls fail without touching `rows` or the
    /// store and leave the end state as it was.
    pub async fn run<R>(&mut self, rows: R) -> Result<u64, IngestFailure>
    where
        R: Stream<Item = Result<RawRow, IoError>>,
    {
        if self.state != IngestState::Idle {
            warn!(state = %self.state, "Ingestion pipeline reused");
            return Err(IngestFailure {
                row_index: 0,
                persisted: 0,
                error: IngestError::AlreadyRan(self.state),
            });
        }
        self.transition(IngestState::Validating);

        let records = rows.enumerate().map(|(index, row)| {
            row.map_err(IngestError::from)
                .and_then(|row| validate_row(&row).map_err(IngestError::from))
                .map_err(|error| (index, error))
        });
        let mut batches = pin!(BatchStream::new(records, self.batch_size));

        let mut persisted = 0u64;
        let mut offered = 0usize;

        while let Some(next) = batches.next().await {
            let batch = match next {
                Ok(batch) => batch,
                Err((row_index, error)) => return Err(self.fail(row_index, persisted, error)),
            };

            if self.state == IngestState::Validating {
                self.transition(IngestState::Batching);
            }
            self.transition(IngestState::Persisting);

            let rows = batch.len();
            match self.persister.persist(batch).await {
                Ok(written) => persisted += written,
                Err(e) => return Err(self.fail(offered, persisted, e.into())),
            }
            offered += rows;

            self.transition(IngestState::Batching);
        }

        self.transition(IngestState::Completed);
        info!(count = persisted, "Ingestion completed");
        Ok(persisted)
    }

    fn fail(&mut self, row_index: usize, persisted: u64, error: IngestError) -> IngestFailure {
        self.transition(IngestState::Failed);
        warn!(row = row_index, persisted, kind = %error.kind(), "Ingestion failed: {}", error);
        IngestFailure {
            row_index,
            persisted,
            error,
        }
    }

    fn transition(&mut self, next: IngestState) {
        if !self.state.can_transition_to(next) {
            warn!(from = %self.state, to = %next, "Illegal ingestion state change ignored");
            return;
        }
        debug!(from = %self.state, to = %next, "Ingestion state");
        self.state = next;
    }
}
