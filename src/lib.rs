//! filmstats Library
//!
//! Loads a film catalogue from a remote endpoint once and answers
//! per-director queries over it. The modules are public for use by the
//! binary and integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod query;

pub use cache::FilmCache;
pub use data::{FetchError, Film, FilmSource, HttpFilmSource, SourceConfig};
pub use query::FilmService;
