use futures::Stream;
use tokio::io::AsyncWrite;
use tracing::info;

use crate::domain::DateRange;
use crate::engine::QueryStreamer;
use crate::io::{IoError, LineSerializer, write_lines};
use crate::storage::{SalesStore, StorageError};

/// Stream stored rows in a date range out as NDJSON
pub struct ExportPipeline<S: SalesStore> {
    streamer: QueryStreamer<S>,
}

impl<S: SalesStore> ExportPipeline<S> {
    pub fn new(store: S) -> Self {
        Self {
            streamer: QueryStreamer::new(store),
        }
    }

    /// Lines for `range`, produced as the consumer pulls them
    pub async fn lines(
        &self,
        range: DateRange,
    ) -> Result<impl Stream<Item = Result<String, IoError>> + Send, StorageError> {
        let rows = self.streamer.open(range).await?;
        Ok(LineSerializer::lines(rows))
    }

    /// Write every row in `range` to `writer`, returning the row count
    ///
    /// A storage error before the first row leaves `writer` untouched.
    pub async fn run<W>(&self, range: DateRange, writer: W) -> Result<u64, IoError>
    where
        W: AsyncWrite + Unpin,
    {
        let rows = self.streamer.open(range).await?;
        let written = write_lines(rows, writer).await?;

        info!(rows = written, "Export finished");
        Ok(written)
    }
}
