//! Cache module for holding the film collection in memory
//!
//! This module provides a cache that loads the film collection from a data
//! source exactly once and shares that snapshot with every query. A failed
//! load degrades to an empty collection; the failure stays observable through
//! `FilmCache::load_error`.

mod film_cache;

pub use film_cache::FilmCache;
