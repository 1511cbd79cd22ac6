//! Command-line interface parsing for filmstats
//!
//! This module handles parsing of CLI arguments using clap, turns them into a
//! `SourceConfig` for the films endpoint, and renders query results as text.

use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Url;
use thiserror::Error;

use crate::data::source::{DEFAULT_FILMS_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::data::{Film, FilmSource, SourceConfig};
use crate::query::FilmService;

/// Error types for CLI argument handling and output
#[derive(Debug, Error)]
pub enum CliError {
    /// Timeout must be at least one second
    #[error("Invalid timeout: {0} seconds. The timeout must be at least 1 second")]
    InvalidTimeout(u64),

    /// Endpoint is not an absolute http(s) URL
    #[error("Invalid endpoint: '{0}'. Expected an absolute http:// or https:// URL")]
    InvalidEndpoint(String),

    /// Films could not be rendered as JSON
    #[error("Failed to render films as JSON: {0}")]
    Render(#[from] serde_json::Error),
}

/// filmstats - Query a remote film catalogue by director
#[derive(Parser, Debug)]
#[command(name = "filmstats")]
#[command(about = "Per-director film statistics from a remote film catalogue")]
#[command(version)]
pub struct Cli {
    /// URL of the films endpoint
    #[arg(long, env = "FILMS_ENDPOINT", default_value = DEFAULT_FILMS_ENDPOINT)]
    pub endpoint: String,

    /// Bearer token sent in the Authorization header
    #[arg(long, env = "FILMS_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "FILMS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Queries available from the command line
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List every film in the catalogue
    Films {
        /// Print the films as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print the best-rated film by a director
    BestRated {
        /// Director name (exact, case-sensitive)
        #[arg(long)]
        director: String,
    },

    /// Print the director with the most films
    MostFilms,

    /// Print the average rating of a director's films, to one decimal
    AverageRating {
        /// Director name (exact, case-sensitive)
        #[arg(long)]
        director: String,
    },

    /// Print the shortest gap in days between two releases by a director
    ReleaseGap {
        /// Director name (exact, case-sensitive)
        #[arg(long)]
        director: String,
    },
}

impl SourceConfig {
    /// Creates a SourceConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(SourceConfig)` with the endpoint, token and timeout
    /// * `Err(CliError)` if the endpoint or timeout is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout(cli.timeout_secs));
        }

        let endpoint = cli.endpoint.trim();
        match Url::parse(endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => return Err(CliError::InvalidEndpoint(cli.endpoint.clone())),
        }

        // An empty token means "no token" so FILMS_API_TOKEN= can unset it.
        let token = cli
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(SourceConfig {
            endpoint: endpoint.to_string(),
            token,
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}

/// Formats a film as a single human-readable line
pub fn format_film(film: &Film) -> String {
    format!(
        "{} ({}) - {}, rated {}, {} min",
        film.name, film.release_date, film.director_name, film.rating, film.length
    )
}

/// Runs a command against the service and renders its output
///
/// The returned text has no trailing newline.
pub async fn execute<S: FilmSource>(
    command: &Command,
    service: &FilmService<S>,
) -> Result<String, CliError> {
    let output = match command {
        Command::Films { json: true } => serde_json::to_string_pretty(service.films().await)?,
        Command::Films { json: false } => service
            .films()
            .await
            .iter()
            .map(format_film)
            .collect::<Vec<_>>()
            .join("\n"),
        Command::BestRated { director } => service.best_rated_film(director).await,
        Command::MostFilms => service.director_with_most_films().await,
        Command::AverageRating { director } => {
            format!("{:.1}", service.average_rating(director).await)
        }
        Command::ReleaseGap { director } => {
            service.shortest_film_release_gap(director).await.to_string()
        }
    };

    Ok(output)
}
