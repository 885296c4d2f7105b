use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Recommendation, ShowRecord},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    #[serde(default = "default_n")]
    n: usize,
}

fn default_n() -> usize {
    5
}

/// Handler for the similar-shows endpoint
pub async fn similar(
    State(state): State<AppState>,
    Path(show_id): Path<i64>,
    Query(params): Query<SimilarParams>,
) -> AppResult<Json<Vec<Recommendation>>> {
    if params.n < 1 {
        return Err(AppError::InvalidInput("n must be at least 1".to_string()));
    }

    let engine = state.engine().await?;
    let similar = engine.similar_shows(show_id, params.n)?;

    tracing::info!(show_id, n = params.n, results = similar.len(), "Similar shows served");

    Ok(Json(similar))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// Handler for the title search endpoint
///
/// Truncation to the configured bound happens here, at the boundary; the
/// engine itself returns every match.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<ShowRecord>>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let engine = state.engine().await?;
    let mut shows: Vec<ShowRecord> = engine.search(query).into_iter().cloned().collect();
    shows.truncate(state.search_limit);

    Ok(Json(shows))
}
