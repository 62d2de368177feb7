// src/config/mod.rs
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::report::Severity;

#[derive(Debug, Parser)]
#[command(
    name = "mongo-sanity",
    version,
    about = "Runs a fixed checklist of health checks against a MongoDB deployment"
)]
pub struct Cli {
    /// MongoDB connection string; falls back to MONGO_URI, then an interactive prompt
    #[arg(short, long, env = "MONGO_URI")]
    pub uri: Option<String>,

    /// Verbosity threshold for the report
    #[arg(short, long, value_enum, default_value = "info")]
    pub verbosity: Severity,
}

/// Resolve the connection endpoint. The `--uri` flag and the MONGO_URI
/// variable are already folded into `uri` by clap (flag wins); anything
/// still missing is requested interactively.
pub fn resolve_uri(uri: Option<String>) -> Result<String> {
    match uri {
        Some(uri) if !uri.trim().is_empty() => Ok(uri),
        _ => prompt_for_uri(),
    }
}

fn prompt_for_uri() -> Result<String> {
    print!("Please provide your MongoDB Atlas URI: ");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read URI from stdin")?;

    let uri = line.trim();
    if uri.is_empty() {
        bail!("no MongoDB URI provided");
    }
    Ok(uri.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_defaults_to_info() {
        temp_env::with_var("MONGO_URI", None::<&str>, || {
            let cli = Cli::try_parse_from(["mongo-sanity"]).unwrap();
            assert_eq!(cli.verbosity, Severity::Info);
            assert!(cli.uri.is_none());
        });
    }

    #[test]
    fn verbosity_parses_short_flag() {
        let cli = Cli::try_parse_from(["mongo-sanity", "-v", "error"]).unwrap();
        assert_eq!(cli.verbosity, Severity::Error);
    }

    #[test]
    fn verbosity_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["mongo-sanity", "-v", "debug"]).is_err());
    }

    #[test]
    fn uri_read_from_environment() {
        temp_env::with_var("MONGO_URI", Some("mongodb://env:27017"), || {
            let cli = Cli::try_parse_from(["mongo-sanity"]).unwrap();
            assert_eq!(cli.uri.as_deref(), Some("mongodb://env:27017"));
        });
    }

    #[test]
    fn uri_flag_wins_over_environment() {
        temp_env::with_var("MONGO_URI", Some("mongodb://env:27017"), || {
            let cli =
                Cli::try_parse_from(["mongo-sanity", "--uri", "mongodb://flag:27017"]).unwrap();
            assert_eq!(cli.uri.as_deref(), Some("mongodb://flag:27017"));
        });
    }

    #[test]
    fn resolve_passes_through_nonempty_uri() {
        let uri = resolve_uri(Some("mongodb://localhost:27017".to_string())).unwrap();
        assert_eq!(uri, "mongodb://localhost:27017");
    }
}
