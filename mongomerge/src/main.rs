//! `mongomerge` — denormalize a MongoDB parent collection in place.

mod cli;
mod error;
mod logging;
mod output;

use clap::Parser;

use cli::Cli;
use error::CliResult;
use merge_core::{MergeClient, MergeOrchestrator};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let mut builder = MergeClient::builder();
    if let Some(uri) = cli.uri {
        builder = builder.uri(uri);
    }
    let client = builder.build().await?;

    let orchestrator = MergeOrchestrator::new(client);
    let report = orchestrator.execute(&cli.parent, &cli.specs).await?;

    output::success(&format!(
        "merged {} into {} ({} parents updated)",
        cli.specs.join(", "),
        cli.parent,
        report.parents_updated
    ));
    output::summary(report.parents_updated, report.duration);

    Ok(())
}
