use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Catalog a show record originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Tvmaze,
    Tmdb,
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Tvmaze => write!(f, "tvmaze"),
            Source::Tmdb => write!(f, "tmdb"),
        }
    }
}

/// A single row of the processed show table
///
/// Produced by the cleaning pipeline and loaded wholesale by the
/// recommendation engine. Unknown fields in the table file are rejected so
/// that a stale or hand-edited dataset fails at load rather than silently
/// shifting the feature space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ShowRecord {
    /// Unique identifier within the merged table
    pub id: i64,
    pub title: String,
    /// Average catalog rating (0-10 scale), absent for unrated shows
    #[serde(default)]
    pub rating: Option<f64>,
    /// Normalized genre tags from the schema vocabulary
    #[serde(default)]
    pub genres: Vec<String>,
    /// Episode runtime in minutes
    #[serde(default)]
    pub runtime: Option<f64>,
    /// Catalog popularity score (TMDB only)
    #[serde(default)]
    pub popularity: Option<f64>,
    /// Year of first airing
    #[serde(default)]
    pub premiered_year: Option<f64>,
    pub source: Source,
}

impl ShowRecord {
    /// Raw rating with the engine's missing-value convention applied
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// A single ranked result returned by the engine
///
/// `score` is a cosine similarity in [-1, 1] for similar-show queries and a
/// predicted rating in [0, 5] for personalized recommendations.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub id: i64,
    pub title: String,
    pub score: f64,
    pub genres: Vec<String>,
    pub rating: f64,
}

/// Uncleaned candidate row emitted by a catalog provider
///
/// Carries everything the cleaning pipeline needs to decide whether the row
/// survives: rows missing a title or rating are dropped, dates are resolved
/// to years, and genre labels are normalized to the schema vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateShow {
    pub id: i64,
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub genres: Vec<String>,
    pub runtime: Option<f64>,
    pub popularity: Option<f64>,
    /// Premiere date as `YYYY-MM-DD`, parsed during cleaning
    pub premiered: Option<String>,
    pub source: Source,
}

// ============================================================================
// TVMaze API Types
// ============================================================================

/// Raw show payload from the TVMaze `/shows` index
#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeShow {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: TvMazeRating,
    #[serde(default)]
    pub runtime: Option<f64>,
    /// Premiere date as `YYYY-MM-DD`
    #[serde(default)]
    pub premiered: Option<String>,
}

impl From<TvMazeShow> for CandidateShow {
    fn from(show: TvMazeShow) -> Self {
        CandidateShow {
            id: show.id,
            title: show.name,
            rating: show.rating.average,
            genres: show.genres,
            runtime: show.runtime,
            popularity: None,
            premiered: show.premiered,
            source: Source::Tvmaze,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TvMazeRating {
    #[serde(default)]
    pub average: Option<f64>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw show payload from the TMDB popular-TV listing
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbShow {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    /// Numeric TMDB genre ids, resolved to names by the provider
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    /// First air date as `YYYY-MM-DD`
    #[serde(default)]
    pub first_air_date: Option<String>,
}

/// One page of TMDB results
#[derive(Debug, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<TmdbShow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_record_deserialization() {
        let json = r#"{
            "id": 1,
            "title": "Under the Dome",
            "rating": 6.5,
            "genres": ["Drama", "Science-Fiction"],
            "runtime": 60.0,
            "premiered_year": 2013.0,
            "source": "tvmaze"
        }"#;

        let record: ShowRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.title, "Under the Dome");
        assert_eq!(record.rating, Some(6.5));
        assert_eq!(record.genres, vec!["Drama", "Science-Fiction"]);
        assert_eq!(record.popularity, None);
        assert_eq!(record.source, Source::Tvmaze);
    }

    #[test]
    fn test_show_record_rejects_unknown_fields() {
        let json = r#"{
            "id": 1,
            "title": "Under the Dome",
            "source": "tvmaze",
            "status": "Ended"
        }"#;

        assert!(serde_json::from_str::<ShowRecord>(json).is_err());
    }

    #[test]
    fn test_rating_or_zero() {
        let json = r#"{"id": 2, "title": "Unrated", "source": "tmdb"}"#;
        let record: ShowRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.rating_or_zero(), 0.0);
    }

    #[test]
    fn test_tvmaze_show_deserialization() {
        let json = r#"{
            "id": 250,
            "name": "Kirby Buckets",
            "genres": ["Comedy"],
            "rating": {"average": null},
            "runtime": 30,
            "premiered": "2014-10-20",
            "status": "Ended"
        }"#;

        let show: TvMazeShow = serde_json::from_str(json).unwrap();
        assert_eq!(show.id, 250);
        assert_eq!(show.name.as_deref(), Some("Kirby Buckets"));
        assert_eq!(show.rating.average, None);
        assert_eq!(show.runtime, Some(30.0));
        assert_eq!(show.premiered.as_deref(), Some("2014-10-20"));
    }

    #[test]
    fn test_tvmaze_show_to_candidate() {
        let show = TvMazeShow {
            id: 1,
            name: Some("Under the Dome".to_string()),
            genres: vec!["Drama".to_string()],
            rating: TvMazeRating { average: Some(6.5) },
            runtime: Some(60.0),
            premiered: Some("2013-06-24".to_string()),
        };

        let candidate: CandidateShow = show.into();
        assert_eq!(candidate.id, 1);
        assert_eq!(candidate.title.as_deref(), Some("Under the Dome"));
        assert_eq!(candidate.rating, Some(6.5));
        assert_eq!(candidate.popularity, None);
        assert_eq!(candidate.source, Source::Tvmaze);
    }

    #[test]
    fn test_tmdb_page_deserialization() {
        let json = r#"{
            "page": 1,
            "results": [{
                "id": 1399,
                "name": "Game of Thrones",
                "genre_ids": [10765, 18],
                "vote_average": 8.4,
                "popularity": 369.6,
                "first_air_date": "2011-04-17"
            }]
        }"#;

        let page: TmdbPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, 1399);
        assert_eq!(page.results[0].genre_ids, vec![10765, 18]);
        assert_eq!(page.results[0].vote_average, Some(8.4));
    }
}
