//! Per-director queries over the film collection
//!
//! The free functions work on any slice of films. `FilmService` runs them
//! against a `FilmCache`, loading the collection on the first query.

use std::collections::HashMap;

use tracing::warn;

use crate::cache::FilmCache;
use crate::data::{Film, FilmSource};

/// Returns the name of the best-rated film by `director_name`
///
/// Ratings are compared on their full value. When two films share the top
/// rating the first one in collection order wins.
///
/// # Returns
/// * The film name, or an empty string if the director has no films
pub fn best_rated_film(films: &[Film], director_name: &str) -> String {
    let mut best: Option<&Film> = None;

    for film in films.iter().filter(|f| f.is_directed_by(director_name)) {
        match best {
            Some(current) if film.rating <= current.rating => {}
            _ => best = Some(film),
        }
    }

    best.map(|f| f.name.clone()).unwrap_or_default()
}

/// Returns the director credited with the most films
///
/// On a tie, the director whose first film appears earliest wins.
///
/// # Returns
/// * The director name, or an empty string if there are no films
pub fn director_with_most_films(films: &[Film]) -> String {
    // (count, index of first appearance)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, film) in films.iter().enumerate() {
        let entry = counts.entry(film.director_name.as_str()).or_insert((0, index));
        entry.0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then_with(|| first_b.cmp(first_a))
        })
        .map(|(director, _)| director.to_string())
        .unwrap_or_default()
}

/// Returns the mean rating of `director_name`'s films, rounded to one decimal
///
/// Rounds half away from zero.
///
/// # Returns
/// * The rounded mean, or `0.0` if the director has no films
pub fn average_rating(films: &[Film], director_name: &str) -> f64 {
    let (sum, count) = films
        .iter()
        .filter(|f| f.is_directed_by(director_name))
        .fold((0.0_f64, 0_usize), |(sum, count), f| (sum + f.rating, count + 1));

    if count == 0 {
        return 0.0;
    }

    round_to_tenth(sum / count as f64)
}

/// Returns the shortest gap in whole days between two releases by `director_name`
///
/// Films whose release date does not parse are skipped.
///
/// # Returns
/// * The smallest gap between consecutive release dates, or `0` if fewer than
///   two films have a valid date
pub fn shortest_film_release_gap(films: &[Film], director_name: &str) -> i64 {
    let mut dates: Vec<_> = films
        .iter()
        .filter(|f| f.is_directed_by(director_name))
        .filter_map(|f| match f.release_day() {
            Ok(date) => Some(date),
            Err(e) => {
                warn!(
                    film = %f.name,
                    release_date = %f.release_date,
                    error = %e,
                    "Skipping film with unparseable release date"
                );
                None
            }
        })
        .collect();

    if dates.len() < 2 {
        return 0;
    }

    dates.sort_unstable();
    dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .min()
        .unwrap_or(0)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Query surface over a load-once film cache
#[derive(Debug)]
pub struct FilmService<S> {
    cache: FilmCache<S>,
}

impl<S: FilmSource> FilmService<S> {
    /// Creates a service whose cache loads from `source` on first query
    pub fn new(source: S) -> Self {
        Self {
            cache: FilmCache::new(source),
        }
    }

    /// Returns the underlying cache
    pub fn cache(&self) -> &FilmCache<S> {
        &self.cache
    }

    /// Returns every cached film
    pub async fn films(&self) -> &[Film] {
        self.cache.films().await
    }

    /// See [`best_rated_film`]
    pub async fn best_rated_film(&self, director_name: &str) -> String {
        best_rated_film(self.films().await, director_name)
    }

    /// See [`director_with_most_films`]
    pub async fn director_with_most_films(&self) -> String {
        director_with_most_films(self.films().await)
    }

    /// See [`average_rating`]
    pub async fn average_rating(&self, director_name: &str) -> f64 {
        average_rating(self.films().await, director_name)
    }

    /// See [`shortest_film_release_gap`]
    pub async fn shortest_film_release_gap(&self, director_name: &str) -> i64 {
        shortest_film_release_gap(self.films().await, director_name)
    }
}
