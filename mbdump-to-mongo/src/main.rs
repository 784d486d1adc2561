//! `mbdump_to_mongo` — load MusicBrainz PostgreSQL dump files into MongoDB.

mod cli;
mod error;
mod logging;
mod output;

use clap::Parser;
use tracing::error as trace_error;

use cli::Cli;
use dump_loader::{DumpPaths, load_schema_file, load_table};
use merge_core::MergeClient;

#[tokio::main]
async fn main() {
    logging::init();

    match run().await {
        Ok(all_succeeded) => {
            if !all_succeeded {
                std::process::exit(1);
            }
        }
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(true)` if every requested table loaded cleanly. A schema or
/// conversion failure on one table is fatal for that table only — the
/// remaining tables are still attempted, matching the error taxonomy's
/// per-table scoping.
async fn run() -> error::CliResult<bool> {
    let cli = Cli::parse();

    let client = MergeClient::builder().uri(cli.uri).build().await?;
    let paths = DumpPaths::resolve().unwrap_or_else(|_| DumpPaths::new("."));
    let schema = load_schema_file(&paths.schema_file())?;

    let mut all_succeeded = true;
    for table in &cli.tables {
        match load_table(&client, &paths, &schema, table).await {
            Ok(report) => {
                output::table_summary(table, report.count, report.duration);
            }
            Err(e) => {
                all_succeeded = false;
                trace_error!(table, error = %e, "table load failed");
                output::error(&format!("{table}: {e}"));
            }
        }
    }

    Ok(all_succeeded)
}
