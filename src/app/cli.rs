use std::future::Future;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio::io::{BufWriter, Stdout};
use tracing::warn;

use super::error::AppError;
use crate::storage::postgres::DEFAULT_DATABASE_URL;

/// Sales record ingest and export
#[derive(Parser, Debug)]
#[command(name = "sales")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL, global = true)]
    pub database_url: String,

    /// Connection pool size
    #[arg(long, env = "SALES_MAX_CONNECTIONS", default_value_t = 16, global = true)]
    pub max_connections: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a CSV upload and store its rows
    Ingest(IngestArgs),

    /// Stream stored rows in a purchase date range as NDJSON
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// CSV file whose first line names the fields
    pub file: PathBuf,

    /// Rows per insert statement; fractions are rounded
    #[arg(long, env = "SALES_BATCH_SIZE")]
    pub batch_size: Option<f64>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Earliest last purchase date (ISO-8601)
    #[arg(long)]
    pub date_from: Option<String>,

    /// Latest last purchase date (ISO-8601)
    #[arg(long)]
    pub date_to: Option<String>,
}

/// CLI application runner that handles:
/// - Signal handling (SIGINT, SIGTERM, SIGHUP)
/// - Stdout buffering and flushing
/// - Exit codes (0 = success, 1 = error, 130 = SIGINT, 143 = SIGTERM)
pub struct CliApp {
    name: String,
}

impl CliApp {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Run the command against buffered stdout, racing it against signals
    ///
    /// A signal drops the command future, which closes any open export cursor.
    /// This function never returns.
    pub async fn run<F, Fut>(self, main_fn: F) -> !
    where
        F: FnOnce(BufWriter<Stdout>) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let writer = BufWriter::new(tokio::io::stdout());

        tokio::select! {
            result = main_fn(writer) => {
                match result {
                    Ok(()) => std::process::exit(0),
                    Err(e) => {
                        eprintln!("{}: {}", self.name, e);
                        std::process::exit(1);
                    }
                }
            }
            signal_code = wait_for_signal() => {
                std::process::exit(signal_code);
            }
        }
    }
}

/// Wait for SIGINT, SIGTERM or SIGHUP (Ctrl+C elsewhere)
/// and return the matching exit code
async fn wait_for_signal() -> i32 {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let (Ok(mut sigterm), Ok(mut sigint), Ok(mut sighup)) = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::hangup()),
        ) else {
            warn!("Signal handlers unavailable, running without them");
            return std::future::pending().await;
        };

        tokio::select! {
            _ = sigterm.recv() => {
                eprintln!("Received SIGTERM");
                143 // 128 + 15
            }
            _ = sigint.recv() => {
                eprintln!("Received SIGINT");
                130 // 128 + 2
            }
            _ = sighup.recv() => {
                eprintln!("Received SIGHUP");
                129 // 128 + 1
            }
        }
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_err() {
            warn!("Ctrl+C handler unavailable, running without it");
            return std::future::pending().await;
        }
        eprintln!("Received Ctrl+C");
        130
    }
}
