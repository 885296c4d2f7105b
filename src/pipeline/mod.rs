use std::collections::HashSet;
use std::path::Path;

use chrono::{Datelike, NaiveDate};

use crate::{
    dataset::FeatureSchema,
    error::AppResult,
    models::{CandidateShow, ShowRecord},
    providers::CatalogProvider,
};

/// Resolves a provider genre label to zero or more schema vocabulary tags
///
/// TMDB uses compound labels ("Sci-Fi & Fantasy"), TVMaze uses single
/// canonical tags plus a long tail the schema does not track. Anything that
/// cannot be mapped into the vocabulary is dropped.
fn normalize_genre(label: &str, vocabulary: &HashSet<&str>) -> Vec<String> {
    label
        .split(" & ")
        .filter_map(|part| {
            let tag = match part.trim() {
                "Sci-Fi" | "Science Fiction" => "Science-Fiction",
                other => other,
            };
            if vocabulary.contains(tag) {
                Some(tag.to_string())
            } else {
                tracing::debug!(label = part, "Dropping genre outside the schema vocabulary");
                None
            }
        })
        .collect()
}

/// Premiere date string (`YYYY-MM-DD`) to a numeric year
fn parse_premiere_year(date: &str) -> Option<f64> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year() as f64)
}

/// Cleans one candidate row, or drops it
///
/// Rows missing crucial information (title or rating) do not survive;
/// everything else is normalized into the table's representation.
fn clean_one(candidate: CandidateShow, vocabulary: &HashSet<&str>) -> Option<ShowRecord> {
    let title = candidate.title?;
    let rating = candidate.rating?;

    let mut genres: Vec<String> = candidate
        .genres
        .iter()
        .flat_map(|label| normalize_genre(label, vocabulary))
        .collect();
    genres.dedup();

    Some(ShowRecord {
        id: candidate.id,
        title,
        rating: Some(rating),
        genres,
        runtime: candidate.runtime,
        popularity: candidate.popularity,
        premiered_year: candidate.premiered.as_deref().and_then(parse_premiere_year),
        source: candidate.source,
    })
}

/// Cleans a batch of candidates against the schema vocabulary
pub fn clean(candidates: Vec<CandidateShow>, schema: &FeatureSchema) -> Vec<ShowRecord> {
    let vocabulary: HashSet<&str> = schema.genres.iter().map(String::as_str).collect();
    let total = candidates.len();

    let cleaned: Vec<ShowRecord> = candidates
        .into_iter()
        .filter_map(|candidate| clean_one(candidate, &vocabulary))
        .collect();

    tracing::info!(
        total,
        kept = cleaned.len(),
        dropped = total - cleaned.len(),
        "Candidate rows cleaned"
    );

    cleaned
}

/// Merges cleaned rows from all sources into one table
///
/// The merged table's id uniqueness invariant is enforced here: a row whose
/// id collides with an earlier one (possible across catalogs, which assign
/// ids independently) is skipped with a warning.
pub fn merge(cleaned: Vec<ShowRecord>) -> Vec<ShowRecord> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(cleaned.len());

    for show in cleaned {
        if seen.insert(show.id) {
            merged.push(show);
        } else {
            tracing::warn!(show_id = show.id, source = %show.source, "Skipping colliding show id at merge");
        }
    }

    merged
}

/// Fetches candidate rows from every provider, best-effort
///
/// A failed page is logged and yields nothing; collection never aborts on a
/// single provider error.
pub async fn collect(providers: &[Box<dyn CatalogProvider>], pages: u32) -> Vec<CandidateShow> {
    let mut candidates = Vec::new();

    for provider in providers {
        for page in 0..pages {
            match provider.fetch_page(page).await {
                Ok(batch) => candidates.extend(batch),
                Err(e) => {
                    tracing::error!(provider = provider.name(), page, error = %e, "Catalog fetch failed");
                }
            }
        }
    }

    candidates
}

/// Writes the merged table to the processed dataset file
pub fn write_table(path: impl AsRef<Path>, shows: &[ShowRecord]) -> AppResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(shows)
        .map_err(|e| crate::error::AppError::Internal(e.to_string()))?;
    std::fs::write(path, contents)?;

    tracing::info!(path = %path.display(), shows = shows.len(), "Show table written");

    Ok(())
}

/// Full collection run: fetch, clean, merge, write
pub async fn build_table(
    providers: &[Box<dyn CatalogProvider>],
    pages: u32,
    schema: &FeatureSchema,
    path: impl AsRef<Path>,
) -> AppResult<usize> {
    let candidates = collect(providers, pages).await;
    let merged = merge(clean(candidates, schema));
    write_table(path, &merged)?;
    Ok(merged.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::Source;
    use crate::providers::MockCatalogProvider;

    fn candidate(id: i64, title: Option<&str>, rating: Option<f64>) -> CandidateShow {
        CandidateShow {
            id,
            title: title.map(str::to_string),
            rating,
            genres: vec![],
            runtime: None,
            popularity: None,
            premiered: None,
            source: Source::Tvmaze,
        }
    }

    #[test]
    fn test_clean_drops_rows_missing_crucial_fields() {
        let schema = FeatureSchema::default();
        let candidates = vec![
            candidate(1, Some("Kept"), Some(7.0)),
            candidate(2, None, Some(6.0)),
            candidate(3, Some("Unrated"), None),
        ];

        let cleaned = clean(candidates, &schema);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].id, 1);
    }

    #[test]
    fn test_clean_normalizes_compound_and_alias_genres() {
        let schema = FeatureSchema::default();
        let mut show = candidate(1, Some("Raised by Wolves"), Some(7.4));
        show.genres = vec![
            "Sci-Fi & Fantasy".to_string(),
            "War & Politics".to_string(),
            "Supernatural".to_string(),
        ];

        let cleaned = clean(vec![show], &schema);
        assert_eq!(
            cleaned[0].genres,
            vec!["Science-Fiction", "Fantasy", "War"]
        );
    }

    #[test]
    fn test_clean_resolves_premiere_year() {
        let schema = FeatureSchema::default();
        let mut ok = candidate(1, Some("Dated"), Some(7.0));
        ok.premiered = Some("2013-06-24".to_string());
        let mut bad = candidate(2, Some("Garbled"), Some(7.0));
        bad.premiered = Some("not-a-date".to_string());

        let cleaned = clean(vec![ok, bad], &schema);
        assert_eq!(cleaned[0].premiered_year, Some(2013.0));
        assert_eq!(cleaned[1].premiered_year, None);
    }

    #[test]
    fn test_merge_skips_colliding_ids() {
        let schema = FeatureSchema::default();
        let mut tmdb = candidate(1, Some("TMDB Twin"), Some(6.0));
        tmdb.source = Source::Tmdb;
        let cleaned = clean(
            vec![candidate(1, Some("TVMaze Twin"), Some(7.0)), tmdb],
            &schema,
        );

        let merged = merge(cleaned);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "TVMaze Twin");
    }

    #[tokio::test]
    async fn test_collect_is_best_effort_across_failures() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_name().return_const("mock");
        provider.expect_fetch_page().returning(|page| {
            if page == 1 {
                Err(AppError::ExternalApi("boom".to_string()))
            } else {
                Ok(vec![CandidateShow {
                    id: page as i64,
                    title: Some(format!("Page {}", page)),
                    rating: Some(7.0),
                    genres: vec![],
                    runtime: None,
                    popularity: None,
                    premiered: None,
                    source: Source::Tvmaze,
                }])
            }
        });

        let providers: Vec<Box<dyn CatalogProvider>> = vec![Box::new(provider)];
        let candidates = collect(&providers, 3).await;

        // Page 1 failed, pages 0 and 2 survived
        let ids: Vec<i64> = candidates.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }
}
