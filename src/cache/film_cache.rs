//! Load-once film cache
//!
//! Provides a `FilmCache` that fetches the film collection from its source on
//! first access and serves the same snapshot for the rest of its lifetime.

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::data::{FetchError, Film, FilmSource};

/// Outcome of the one-shot load
#[derive(Debug)]
struct LoadedFilms {
    /// Films returned by the source, empty if the fetch failed
    films: Vec<Film>,
    /// The fetch failure, if there was one
    error: Option<FetchError>,
}

/// In-memory film collection loaded at most once from a `FilmSource`
///
/// The first caller of [`FilmCache::films`] triggers the fetch; callers that
/// arrive while it is in flight wait for it and see the same result. A failed
/// fetch is logged and leaves the cache empty for good.
#[derive(Debug)]
pub struct FilmCache<S> {
    source: S,
    state: OnceCell<LoadedFilms>,
}

impl<S: FilmSource> FilmCache<S> {
    /// Creates an empty, unloaded cache over the given source
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: OnceCell::new(),
        }
    }

    /// Returns the cached films, loading them on first call
    pub async fn films(&self) -> &[Film] {
        &self.load().await.films
    }

    /// Returns the error from the one-shot load, if it failed
    ///
    /// Returns `None` while the cache has not been loaded yet.
    pub fn load_error(&self) -> Option<&FetchError> {
        self.state.get().and_then(|loaded| loaded.error.as_ref())
    }

    /// Whether the one-shot load has completed
    pub fn is_loaded(&self) -> bool {
        self.state.initialized()
    }

    /// Returns the underlying source
    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    async fn load(&self) -> &LoadedFilms {
        self.state
            .get_or_init(|| async {
                match self.source.fetch_all_films().await {
                    Ok(films) => {
                        info!(count = films.len(), "Loaded films");
                        LoadedFilms { films, error: None }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to load films, continuing with an empty collection");
                        LoadedFilms {
                            films: Vec::new(),
                            error: Some(e),
                        }
                    }
                }
            })
            .await
    }
}
