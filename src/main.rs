// src/main.rs
use anyhow::Result;
use clap::Parser;
use tracing::debug;

use mongo_sanity::checker::ClusterChecker;
use mongo_sanity::config::{self, Cli};
use mongo_sanity::report::Reporter;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout belongs to the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mongo_sanity=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let uri = config::resolve_uri(cli.uri)?;

    let checker = ClusterChecker::new(Reporter::new(cli.verbosity));
    let summary = checker.run(&uri).await;

    debug!(
        errors = summary.errors,
        warnings = summary.warnings,
        infos = summary.infos,
        "sanity checks finished"
    );

    Ok(())
}
