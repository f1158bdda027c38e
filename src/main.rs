use clap::Parser;
use sales::app::{commands, config};
use sales::prelude::*;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    CliApp::new("sales").run(|stdout| run(cli, stdout)).await
}

/// Connect to PostgreSQL and dispatch the subcommand
async fn run(
    cli: Cli,
    stdout: tokio::io::BufWriter<tokio::io::Stdout>,
) -> Result<(), AppError> {
    let pg_config = config::postgres_config(&cli.database_url, cli.max_connections)?;
    let store = PostgresSalesStore::connect(&pg_config).await?;

    match cli.command {
        Commands::Ingest(args) => commands::ingest(store, &args, stdout).await,
        Commands::Export(args) => commands::export(store, &args, stdout).await,
    }
}
