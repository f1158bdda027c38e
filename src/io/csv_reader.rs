use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::io::AsyncRead;
use futures::{Stream, StreamExt, TryStreamExt, stream};
use tokio::fs::File;
use tokio_util::compat::TokioAsyncReadCompatExt;

use super::error::IoError;
use crate::domain::{RawRow, RawValue};

/// Async stream of raw rows from header-driven CSV input
///
/// The first line names the fields. Every later record becomes one [`RawRow`]
/// with text values keyed by those names, in column order. Records whose
/// field count differs from the header are errors.
pub struct CsvRowStream {
    inner: Pin<Box<dyn Stream<Item = Result<RawRow, IoError>> + Send>>,
}

impl CsvRowStream {
    /// Create a new row stream from an async reader
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let mut csv_reader = AsyncReaderBuilder::new()
            .trim(csv_async::Trim::Headers)
            .flexible(false)
            .create_reader(reader);

        let stream = stream::once(async move {
            let headers = csv_reader.headers().await?.clone();
            Ok::<_, IoError>(
                csv_reader
                    .into_records()
                    .map(move |record| {
                        record
                            .map(|record| to_raw_row(&headers, &record))
                            .map_err(IoError::from)
                    }),
            )
        })
        .try_flatten();

        Self {
            inner: Box::pin(stream),
        }
    }

    /// Create a new row stream from a file path
    ///
    /// Opens the file asynchronously and bridges it to the futures IO traits.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let file = File::open(path.as_ref()).await?;
        Ok(Self::new(file.compat()))
    }
}

fn to_raw_row(headers: &StringRecord, record: &StringRecord) -> RawRow {
    headers
        .iter()
        .zip(record.iter())
        .map(|(key, value)| (key, RawValue::from(value)))
        .collect()
}

impl Stream for CsvRowStream {
    type Item = Result<RawRow, IoError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
