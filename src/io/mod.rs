pub mod csv_reader;
pub mod error;
pub mod ndjson_writer;

// Re-export commonly used types
pub use csv_reader::CsvRowStream;
pub use error::IoError;
pub use ndjson_writer::{LineSerializer, write_lines};
