use std::collections::HashSet;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::ShowRecord;

/// Numeric show attributes eligible for the feature space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Rating,
    Runtime,
    Popularity,
    PremieredYear,
}

impl NumericField {
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Rating => "rating",
            NumericField::Runtime => "runtime",
            NumericField::Popularity => "popularity",
            NumericField::PremieredYear => "premiered_year",
        }
    }

    pub fn extract(&self, show: &ShowRecord) -> Option<f64> {
        match self {
            NumericField::Rating => show.rating,
            NumericField::Runtime => show.runtime,
            NumericField::Popularity => show.popularity,
            NumericField::PremieredYear => show.premiered_year,
        }
    }
}

/// Declared feature space for the similarity engine
///
/// The feature vector layout is fixed: numeric fields in declaration order,
/// then one indicator column per genre in vocabulary order. Identity and
/// text fields never enter the space.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    pub numeric: Vec<NumericField>,
    pub genres: Vec<String>,
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self {
            numeric: vec![
                NumericField::Rating,
                NumericField::Runtime,
                NumericField::Popularity,
                NumericField::PremieredYear,
            ],
            genres: [
                "Action",
                "Adventure",
                "Animation",
                "Comedy",
                "Crime",
                "Documentary",
                "Drama",
                "Family",
                "Fantasy",
                "History",
                "Horror",
                "Kids",
                "Music",
                "Mystery",
                "News",
                "Reality",
                "Romance",
                "Science-Fiction",
                "Soap",
                "Sports",
                "Talk",
                "Thriller",
                "War",
                "Western",
            ]
            .iter()
            .map(|g| g.to_string())
            .collect(),
        }
    }
}

impl FeatureSchema {
    /// Total width of a feature vector under this schema
    pub fn width(&self) -> usize {
        self.numeric.len() + self.genres.len()
    }

    /// Checks every row against the declared vocabulary, failing fast on
    /// genre tags the schema does not know about.
    pub fn validate(&self, shows: &[ShowRecord]) -> AppResult<()> {
        let known: HashSet<&str> = self.genres.iter().map(String::as_str).collect();
        for show in shows {
            for genre in &show.genres {
                if !known.contains(genre.as_str()) {
                    return Err(AppError::Dataset(format!(
                        "show {} carries genre '{}' not present in the feature schema",
                        show.id, genre
                    )));
                }
            }
        }
        Ok(())
    }

    /// Projects a show onto the raw (unstandardized) feature vector,
    /// filling missing numerics with zero.
    pub fn vector(&self, show: &ShowRecord) -> Vec<f64> {
        let mut features = Vec::with_capacity(self.width());
        for field in &self.numeric {
            features.push(field.extract(show).unwrap_or(0.0));
        }
        for genre in &self.genres {
            features.push(if show.genres.iter().any(|g| g == genre) {
                1.0
            } else {
                0.0
            });
        }
        features
    }
}

/// The merged show table produced by the cleaning pipeline
#[derive(Debug, Clone)]
pub struct ShowTable {
    shows: Vec<ShowRecord>,
}

impl ShowTable {
    /// Builds a table from in-memory records, enforcing id uniqueness
    pub fn from_records(shows: Vec<ShowRecord>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for show in &shows {
            if !seen.insert(show.id) {
                return Err(AppError::Dataset(format!(
                    "duplicate show id {} in table",
                    show.id
                )));
            }
        }
        Ok(Self { shows })
    }

    /// Loads the table from the processed JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let shows: Vec<ShowRecord> = serde_json::from_str(&contents).map_err(|e| {
            AppError::Dataset(format!("failed to parse {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), shows = shows.len(), "Show table loaded");

        Self::from_records(shows)
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    pub fn shows(&self) -> &[ShowRecord] {
        &self.shows
    }

    pub fn get(&self, idx: usize) -> &ShowRecord {
        &self.shows[idx]
    }

    /// Row index of a show id, if present
    pub fn index_of(&self, id: i64) -> Option<usize> {
        self.shows.iter().position(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn show(id: i64, genres: &[&str]) -> ShowRecord {
        ShowRecord {
            id,
            title: format!("Show {}", id),
            rating: Some(7.0),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            runtime: None,
            popularity: None,
            premiered_year: None,
            source: Source::Tvmaze,
        }
    }

    #[test]
    fn test_vector_layout() {
        let schema = FeatureSchema::default();
        let record = show(1, &["Drama"]);
        let vector = schema.vector(&record);

        assert_eq!(vector.len(), schema.width());
        // Numeric block: rating filled, the rest missing -> zero
        assert_eq!(vector[0], 7.0);
        assert_eq!(vector[1], 0.0);
        assert_eq!(vector[2], 0.0);
        assert_eq!(vector[3], 0.0);
        // Exactly one genre indicator set
        let ones = vector[4..].iter().filter(|&&v| v == 1.0).count();
        assert_eq!(ones, 1);
        let drama_pos = schema.genres.iter().position(|g| g == "Drama").unwrap();
        assert_eq!(vector[4 + drama_pos], 1.0);
    }

    #[test]
    fn test_validate_rejects_unknown_genre() {
        let schema = FeatureSchema::default();
        let shows = vec![show(1, &["Drama"]), show(2, &["Speedrunning"])];
        let err = schema.validate(&shows).unwrap_err();
        assert!(err.to_string().contains("Speedrunning"));
    }

    #[test]
    fn test_from_records_rejects_duplicate_ids() {
        let shows = vec![show(1, &[]), show(1, &[])];
        assert!(ShowTable::from_records(shows).is_err());
    }

    #[test]
    fn test_index_of() {
        let table = ShowTable::from_records(vec![show(10, &[]), show(20, &[])]).unwrap();
        assert_eq!(table.index_of(20), Some(1));
        assert_eq!(table.index_of(99), None);
    }
}
