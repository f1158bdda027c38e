use futures::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::error::IoError;
use crate::storage::{StorageError, StoredRow};

/// One stored row per line as a standalone JSON object
pub struct LineSerializer;

impl LineSerializer {
    /// Serialize a row and terminate it with `\n`
    pub fn to_line(row: &StoredRow) -> Result<String, IoError> {
        let mut line = serde_json::to_string(row)?;
        line.push('\n');
        Ok(line)
    }

    /// Map a row stream to a line stream, element by element
    pub fn lines<S>(rows: S) -> impl Stream<Item = Result<String, IoError>>
    where
        S: Stream<Item = Result<StoredRow, StorageError>>,
    {
        rows.map(|row| -> Result<String, IoError> { Self::to_line(&row?) })
    }
}

/// Write rows as NDJSON, returning the number of lines written
///
/// Each line is written as soon as its row arrives. On a mid-stream error the
/// lines already written are flushed before the error is returned.
pub async fn write_lines<S, W>(rows: S, mut writer: W) -> Result<u64, IoError>
where
    S: Stream<Item = Result<StoredRow, StorageError>>,
    W: AsyncWrite + Unpin,
{
    let mut lines = std::pin::pin!(LineSerializer::lines(rows));
    let mut written = 0u64;

    while let Some(line) = lines.next().await {
        match line {
            Ok(line) => {
                writer.write_all(line.as_bytes()).await?;
                written += 1;
            }
            Err(e) => {
                writer.flush().await?;
                return Err(e);
            }
        }
    }

    writer.flush().await?;
    Ok(written)
}
