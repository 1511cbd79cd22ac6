//! Films endpoint client
//!
//! Defines the `FilmSource` seam the cache loads through, and the HTTP
//! implementation that calls the films endpoint with a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::Film;

/// Default URL of the films endpoint
pub const DEFAULT_FILMS_ENDPOINT: &str = "https://toolbox.palette-adv.spectrocloud.com:5002/films";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur when fetching films
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connection, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Films endpoint returned status {0}")]
    Status(StatusCode),

    /// Response body was not a JSON array of films
    #[error("Failed to parse films response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can produce the full film collection
#[async_trait]
pub trait FilmSource: Send + Sync {
    /// Fetches every film the source knows about
    async fn fetch_all_films(&self) -> Result<Vec<Film>, FetchError>;
}

/// Connection settings for the films endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    /// URL of the films endpoint
    pub endpoint: String,
    /// Bearer token sent in the `Authorization` header, if any
    pub token: Option<String>,
    /// Timeout applied to the whole request
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FILMS_ENDPOINT.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for fetching films from the films endpoint over HTTP
#[derive(Debug, Clone)]
pub struct HttpFilmSource {
    client: Client,
    config: SourceConfig,
}

impl HttpFilmSource {
    /// Creates a new HttpFilmSource with the given configuration
    ///
    /// # Returns
    /// * `Ok(HttpFilmSource)` on success
    /// * `Err(FetchError::Request)` if the HTTP client cannot be built
    pub fn new(config: SourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Returns the configuration this source was built with
    #[cfg(test)]
    pub(crate) fn config(&self) -> &SourceConfig {
        &self.config
    }
}

#[async_trait]
impl FilmSource for HttpFilmSource {
    async fn fetch_all_films(&self) -> Result<Vec<Film>, FetchError> {
        debug!(endpoint = %self.config.endpoint, "Requesting films");

        let mut request = self.client.get(&self.config.endpoint);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let text = response.text().await?;
        let films: Vec<Film> = serde_json::from_str(&text)?;

        debug!(count = films.len(), "Decoded films response");
        Ok(films)
    }
}
