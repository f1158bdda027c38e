//! The two commands, generic over the store so they run against any substrate

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::info;

use super::boundary::{IngestResponse, check_csv_extension};
use super::cli::{ExportArgs, IngestArgs};
use super::config::batch_size;
use super::error::AppError;
use crate::domain::DateRange;
use crate::io::CsvRowStream;
use crate::storage::SalesStore;
use crate::streaming::{ExportPipeline, IngestPipeline};

/// Ingest a CSV file and write the response envelope as one line
///
/// The envelope is written for failures too; the failure is then returned so
/// the process exits non-zero.
pub async fn ingest<S, W>(store: S, args: &IngestArgs, mut writer: W) -> Result<(), AppError>
where
    S: SalesStore,
    W: AsyncWrite + Unpin,
{
    check_csv_extension(&args.file)?;
    let batch_size = batch_size(args.batch_size)?;
    let rows = CsvRowStream::from_file(&args.file).await?;

    info!(file = %args.file.display(), batch_size = batch_size.get(), "Ingesting");
    let result = IngestPipeline::new(store, batch_size).run(rows).await;

    let mut body = IngestResponse::from(&result).to_json()?;
    body.push('\n');
    writer.write_all(body.as_bytes()).await?;
    writer.flush().await?;

    result.map(|_| ()).map_err(AppError::from)
}

/// Stream the rows selected by the date bounds to `writer` as NDJSON
pub async fn export<S, W>(store: S, args: &ExportArgs, writer: W) -> Result<(), AppError>
where
    S: SalesStore,
    W: AsyncWrite + Unpin,
{
    let range = DateRange::from_params(args.date_from.as_deref(), args.date_to.as_deref())?;

    ExportPipeline::new(store).run(range, writer).await?;
    Ok(())
}
