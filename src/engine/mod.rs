use std::collections::HashMap;

use crate::dataset::{FeatureSchema, ShowTable};
use crate::error::{AppError, AppResult};
use crate::models::{Recommendation, ShowRecord};

mod knn;
mod scaler;

pub use knn::NearestNeighbors;
pub use scaler::StandardScaler;

/// Fitted similarity engine over the show table
///
/// Built fully before serving and immutable afterwards: queries are pure
/// reads, so the engine can be shared across concurrent requests without
/// locks. A dataset change means fitting a fresh engine and swapping it in,
/// never mutating this one.
pub struct RecommendationEngine {
    table: ShowTable,
    knn: NearestNeighbors,
}

impl RecommendationEngine {
    /// Projects the table into the schema's feature space, standardizes
    /// every column over the whole dataset, and fits the neighbor index.
    pub fn fit(table: ShowTable, schema: &FeatureSchema) -> AppResult<Self> {
        if table.is_empty() {
            return Err(AppError::Dataset(
                "cannot fit an engine on an empty show table".to_string(),
            ));
        }
        schema.validate(table.shows())?;

        let raw: Vec<Vec<f64>> = table.shows().iter().map(|s| schema.vector(s)).collect();
        let (_, matrix) = StandardScaler::fit_transform(&raw);
        let knn = NearestNeighbors::fit(matrix);

        tracing::info!(
            shows = table.len(),
            features = schema.width(),
            "Recommendation engine fitted"
        );

        Ok(Self { table, knn })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn recommendation(&self, idx: usize, score: f64) -> Recommendation {
        let show = self.table.get(idx);
        Recommendation {
            id: show.id,
            title: show.title.clone(),
            score,
            genres: show.genres.clone(),
            rating: show.rating_or_zero(),
        }
    }

    /// The n shows most similar to a given show
    ///
    /// Queries n+1 neighbors so the self match can be stripped, and converts
    /// each cosine distance d to a similarity score `1 - d`. Results come
    /// back in descending-similarity order; fewer than n when the table is
    /// smaller.
    pub fn similar_shows(&self, show_id: i64, n: usize) -> AppResult<Vec<Recommendation>> {
        let idx = self.table.index_of(show_id).ok_or_else(|| {
            AppError::NotFound(format!("Show ID {} not found in the dataset", show_id))
        })?;

        let similar = self
            .knn
            .kneighbors_of(idx, n + 1)
            .into_iter()
            .filter(|&(neighbor, _)| neighbor != idx)
            .take(n)
            .map(|(neighbor, distance)| self.recommendation(neighbor, 1.0 - distance))
            .collect();

        Ok(similar)
    }

    /// Personalized recommendations from a sparse set of user ratings
    ///
    /// Memory-based collaborative filtering: each rated show contributes
    /// `similarity x normalized_rating` to every other show's score, and its
    /// similarities to a single denominator shared across all rated shows.
    /// The shared denominator is deliberate; it is a global normalizer, not
    /// a per-item weighted mean. Rated ids missing from the table are
    /// skipped, not errors.
    pub fn recommend(&self, ratings: &HashMap<i64, f64>, n: usize) -> Vec<Recommendation> {
        let mut scores = vec![0.0; self.table.len()];
        let mut weight_sum = 0.0;

        // Fixed iteration order keeps the floating-point accumulation, and
        // therefore the ranking, identical across calls.
        let mut rated: Vec<(i64, f64)> = ratings.iter().map(|(&id, &r)| (id, r)).collect();
        rated.sort_by_key(|&(id, _)| id);

        for (show_id, rating) in rated {
            let normalized = (rating - 1.0) / 4.0;

            let Some(idx) = self.table.index_of(show_id) else {
                tracing::warn!(show_id, "Rated show not in table, skipping");
                continue;
            };

            // Exhaustive neighbor list: every other item in the table
            for (neighbor, distance) in self.knn.kneighbors_of(idx, self.table.len()) {
                if neighbor == idx {
                    continue;
                }
                let similarity = 1.0 - distance;
                scores[neighbor] += similarity * normalized;
                weight_sum += similarity;
            }
        }

        if weight_sum > 0.0 {
            for score in &mut scores {
                *score /= weight_sum;
            }
        }

        let mut ranked: Vec<usize> = (0..self.table.len()).collect();
        ranked.sort_by(|&a, &b| {
            scores[b]
                .total_cmp(&scores[a])
                .then(self.table.get(a).id.cmp(&self.table.get(b).id))
        });

        ranked
            .into_iter()
            .filter(|&idx| !ratings.contains_key(&self.table.get(idx).id))
            .take(n)
            .map(|idx| self.recommendation(idx, scores[idx] * 5.0))
            .collect()
    }

    /// Case-insensitive substring search over show titles
    pub fn search(&self, query: &str) -> Vec<&ShowRecord> {
        let needle = query.to_lowercase();
        self.table
            .shows()
            .iter()
            .filter(|show| show.title.to_lowercase().contains(&needle))
            .collect()
    }
}
