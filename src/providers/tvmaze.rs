use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{CandidateShow, TvMazeShow},
    providers::CatalogProvider,
};

/// TVMaze catalog provider
///
/// Pages through the public `/shows` index. No API key required; the index
/// is zero-based and returns 404 past the last page, which is reported as
/// an external API error and handled as an empty batch by the pipeline.
pub struct TvMazeProvider {
    http_client: HttpClient,
    api_url: String,
}

impl TvMazeProvider {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TvMazeProvider {
    async fn fetch_page(&self, page: u32) -> AppResult<Vec<CandidateShow>> {
        let url = format!("{}/shows?page={}", self.api_url, page);

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TVMaze returned status {} for page {}",
                response.status(),
                page
            )));
        }

        let shows: Vec<TvMazeShow> = response.json().await?;

        tracing::info!(page, shows = shows.len(), provider = "tvmaze", "Catalog page fetched");

        Ok(shows.into_iter().map(CandidateShow::from).collect())
    }

    fn name(&self) -> &'static str {
        "tvmaze"
    }
}
