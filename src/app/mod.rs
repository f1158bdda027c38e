pub mod boundary;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use boundary::{IngestResponse, ProtocolError, check_csv_extension};
pub use cli::{Cli, CliApp, Commands, ExportArgs, IngestArgs};
pub use config::ConfigError;
pub use error::AppError;
pub use logging::init_logging;
