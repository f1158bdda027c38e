pub mod batch;
pub mod error;
pub mod export;
pub mod ingest;

// Re-export commonly used types
pub use batch::{Batch, BatchAccumulator, BatchSize, BatchStream};
pub use error::{IngestError, IngestFailure};
pub use export::ExportPipeline;
pub use ingest::{IngestPipeline, IngestState};
