use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{CandidateShow, Source, TmdbPage, TmdbShow},
    providers::CatalogProvider,
};

/// TMDB TV genre id table
///
/// The popular-TV listing only carries numeric genre ids; the id space is
/// stable and documented, so it is resolved locally instead of via the
/// `/genre/tv/list` endpoint.
const TV_GENRES: &[(i64, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

fn genre_name(id: i64) -> Option<&'static str> {
    TV_GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
}

fn extract(show: TmdbShow) -> CandidateShow {
    let genres = show
        .genre_ids
        .iter()
        .filter_map(|&id| genre_name(id))
        .map(str::to_string)
        .collect();

    CandidateShow {
        id: show.id,
        title: show.name,
        rating: show.vote_average,
        genres,
        runtime: None,
        popularity: show.popularity,
        premiered: show.first_air_date,
        source: Source::Tmdb,
    }
}

/// TMDB catalog provider
///
/// Pages through the popular-TV listing. Requires an API key; construction
/// fails without one so the collector can skip the source cleanly.
pub struct TmdbProvider {
    http_client: HttpClient,
    api_url: String,
    api_key: String,
}

impl TmdbProvider {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn fetch_page(&self, page: u32) -> AppResult<Vec<CandidateShow>> {
        // TMDB pages are one-based
        let url = format!("{}/tv/popular", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("page", &(page + 1).to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {} for page {}",
                response.status(),
                page + 1
            )));
        }

        let listing: TmdbPage = response.json().await?;

        tracing::info!(
            page,
            shows = listing.results.len(),
            provider = "tmdb",
            "Catalog page fetched"
        );

        Ok(listing.results.into_iter().map(extract).collect())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_ids_resolve_to_names() {
        let show = TmdbShow {
            id: 1399,
            name: Some("Game of Thrones".to_string()),
            genre_ids: vec![10765, 18, 10759],
            vote_average: Some(8.4),
            popularity: Some(369.6),
            first_air_date: Some("2011-04-17".to_string()),
        };

        let candidate = extract(show);
        assert_eq!(
            candidate.genres,
            vec!["Sci-Fi & Fantasy", "Drama", "Action & Adventure"]
        );
        assert_eq!(candidate.source, Source::Tmdb);
    }

    #[test]
    fn test_unknown_genre_ids_are_dropped() {
        let show = TmdbShow {
            id: 2,
            name: Some("Unknown".to_string()),
            genre_ids: vec![18, 424242],
            vote_average: None,
            popularity: None,
            first_air_date: None,
        };

        let candidate = extract(show);
        assert_eq!(candidate.genres, vec!["Drama"]);
    }
}
