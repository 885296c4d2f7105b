use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Recommendation,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub ratings: HashMap<i64, f64>,
    #[serde(default = "default_n")]
    pub n: usize,
}

fn default_n() -> usize {
    5
}

/// Handler for the personalized recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<Recommendation>>> {
    if request.n < 1 {
        return Err(AppError::InvalidInput("n must be at least 1".to_string()));
    }
    for (&show_id, &rating) in &request.ratings {
        if !(1.0..=5.0).contains(&rating) {
            return Err(AppError::InvalidInput(format!(
                "rating {} for show {} is outside the 1-5 scale",
                rating, show_id
            )));
        }
    }

    let engine = state.engine().await?;
    let recommendations = engine.recommend(&request.ratings, request.n);

    tracing::info!(
        rated = request.ratings.len(),
        n = request.n,
        results = recommendations.len(),
        "Recommendations served"
    );

    Ok(Json(recommendations))
}
