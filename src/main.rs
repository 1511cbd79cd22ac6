//! filmstats - Per-director statistics for a remote film catalogue
//!
//! Fetches the catalogue once, then prints the answer to the requested query.
//! Logs go to stderr; stdout only carries the query result.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use filmstats::cli::{execute, Cli};
use filmstats::{FilmService, HttpFilmSource, SourceConfig};

/// Installs the tracing subscriber, honouring `RUST_LOG` and defaulting to `warn`
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let config = match SourceConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };
    debug!(endpoint = %config.endpoint, timeout = ?config.timeout, "Using films endpoint");

    let source = match HttpFilmSource::new(config) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let service = FilmService::new(source);

    let output = match execute(&cli.command, &service).await {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Queries degrade to zero values on a failed load; say why on stderr.
    if let Some(e) = service.cache().load_error() {
        eprintln!("warning: film catalogue unavailable: {}", e);
    }

    println!("{}", output);
    ExitCode::SUCCESS
}
