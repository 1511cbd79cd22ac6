//! Core data models for filmstats
//!
//! This module contains the film record decoded from the films endpoint and
//! the data source that fetches it.

pub mod source;

pub use source::{FetchError, FilmSource, HttpFilmSource, SourceConfig};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Date format used by the films endpoint for release dates
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single film as returned by the films endpoint
///
/// The release date is kept as the raw string from the payload so that one
/// malformed date only affects the queries that need it, not the whole load.
/// A missing, null or non-string date decodes as `""`, and a missing or
/// non-integer length decodes as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    /// Display name of the film (not guaranteed unique)
    pub name: String,
    /// Running time in minutes
    #[serde(default, deserialize_with = "deserialize_minutes_or_zero")]
    pub length: u32,
    /// Rating score
    pub rating: f64,
    /// Release date in `YYYY-MM-DD` format
    #[serde(default, deserialize_with = "deserialize_string_or_empty")]
    pub release_date: String,
    /// Name of the director credited for the film
    pub director_name: String,
}

impl Film {
    /// Parses the release date into a calendar date
    ///
    /// # Returns
    /// * `Ok(NaiveDate)` if the date matches `YYYY-MM-DD`
    /// * `Err(chrono::ParseError)` otherwise
    pub fn release_day(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(&self.release_date, RELEASE_DATE_FORMAT)
    }

    /// Returns true if this film is credited to exactly `director_name`
    pub fn is_directed_by(&self, director_name: &str) -> bool {
        self.director_name == director_name
    }
}

fn deserialize_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

fn deserialize_minutes_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = Value::deserialize(deserializer)?
        .as_u64()
        .and_then(|m| u32::try_from(m).ok())
        .unwrap_or(0);
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batman_begins() -> Film {
        Film {
            name: "Batman Begins".to_string(),
            length: 140,
            rating: 8.2,
            release_date: "2006-06-16".to_string(),
            director_name: "Christopher Nolan".to_string(),
        }
    }

    #[test]
    fn test_film_deserializes_camel_case_payload() {
        let json = r#"{
            "name": "Interstellar",
            "length": 169,
            "rating": 8.6,
            "releaseDate": "2014-11-07",
            "directorName": "Christopher Nolan"
        }"#;

        let film: Film = serde_json::from_str(json).expect("Failed to deserialize Film");

        assert_eq!(film.name, "Interstellar");
        assert_eq!(film.length, 169);
        assert!((film.rating - 8.6).abs() < 0.0001);
        assert_eq!(film.release_date, "2014-11-07");
        assert_eq!(film.director_name, "Christopher Nolan");
    }

    #[test]
    fn test_film_serializes_with_endpoint_keys() {
        let json = serde_json::to_string(&batman_begins()).expect("Failed to serialize Film");

        assert!(json.contains("\"releaseDate\":\"2006-06-16\""));
        assert!(json.contains("\"directorName\":\"Christopher Nolan\""));
        assert!(!json.contains("release_date"));
    }

    #[test]
    fn test_film_missing_field_is_rejected() {
        let json = r#"{"name": "Memento", "rating": 8.4}"#;
        let result: Result<Film, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_release_date_keeps_other_films() {
        let json = r#"[
            {"name": "Batman Begins", "length": 140, "rating": 8.2,
             "releaseDate": "2006-06-16", "directorName": "Christopher Nolan"},
            {"name": "Interstellar", "length": 169, "rating": 8.6,
             "releaseDate": null, "directorName": "Christopher Nolan"},
            {"name": "Prestige", "length": 130, "rating": 8.5,
             "directorName": "Christopher Nolan"},
            {"name": "Tenet", "length": 150, "rating": 7.3,
             "releaseDate": 20200826, "directorName": "Christopher Nolan"}
        ]"#;

        let films: Vec<Film> = serde_json::from_str(json).expect("bad dates should not fail the load");

        assert_eq!(films.len(), 4);
        assert_eq!(films[1].release_date, "");
        assert_eq!(films[2].release_date, "");
        assert_eq!(films[3].release_date, "");
        assert!(films[1].release_day().is_err());
        assert!(films[0].release_day().is_ok());
    }

    #[test]
    fn test_non_integer_length_decodes_as_zero() {
        let json = r#"[
            {"name": "Heat", "length": 170.5, "rating": 8.3,
             "releaseDate": "1995-12-15", "directorName": "Michael Mann"},
            {"name": "Thief", "rating": 7.4,
             "releaseDate": "1981-03-27", "directorName": "Michael Mann"},
            {"name": "Collateral", "length": "120", "rating": 7.5,
             "releaseDate": "2004-08-06", "directorName": "Michael Mann"}
        ]"#;

        let films: Vec<Film> = serde_json::from_str(json).expect("bad lengths should not fail the load");

        assert_eq!(films.len(), 3);
        assert!(films.iter().all(|f| f.length == 0));
        assert_eq!(films[0].name, "Heat");
    }

    #[test]
    fn test_release_day_parses_iso_date() {
        let film = batman_begins();
        assert_eq!(
            film.release_day().unwrap(),
            NaiveDate::from_ymd_opt(2006, 6, 16).unwrap()
        );
    }

    #[test]
    fn test_release_day_rejects_other_formats() {
        let mut film = batman_begins();

        film.release_date = "16/06/2006".to_string();
        assert!(film.release_day().is_err());

        film.release_date = "2006-13-01".to_string();
        assert!(film.release_day().is_err());

        film.release_date = String::new();
        assert!(film.release_day().is_err());
    }

    #[test]
    fn test_is_directed_by_is_case_sensitive() {
        let film = batman_begins();
        assert!(film.is_directed_by("Christopher Nolan"));
        assert!(!film.is_directed_by("christopher nolan"));
        assert!(!film.is_directed_by("Christopher"));
    }
}
