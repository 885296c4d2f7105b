use std::sync::Arc;

use tokio::sync::RwLock;

use crate::engine::RecommendationEngine;
use crate::error::{AppError, AppResult};

/// Shared application state
///
/// The engine is an immutable snapshot: it is fitted completely before being
/// installed, queries only ever read it, and a dataset change installs a
/// freshly fitted replacement rather than mutating the current one. The lock
/// guards the slot, not the engine.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RwLock<Option<Arc<RecommendationEngine>>>>,
    pub search_limit: usize,
}

impl AppState {
    /// Creates state with an empty engine slot
    pub fn new(search_limit: usize) -> Self {
        Self {
            engine: Arc::new(RwLock::new(None)),
            search_limit,
        }
    }

    /// The current engine snapshot, or NotReady when none is installed
    pub async fn engine(&self) -> AppResult<Arc<RecommendationEngine>> {
        self.engine.read().await.clone().ok_or(AppError::NotReady)
    }

    /// Atomically swaps in a freshly fitted engine
    pub async fn install(&self, engine: RecommendationEngine) {
        *self.engine.write().await = Some(Arc::new(engine));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{FeatureSchema, ShowTable};
    use crate::models::{ShowRecord, Source};

    fn fitted_engine() -> RecommendationEngine {
        let table = ShowTable::from_records(vec![ShowRecord {
            id: 1,
            title: "Solo".to_string(),
            rating: Some(7.0),
            genres: vec!["Drama".to_string()],
            runtime: None,
            popularity: None,
            premiered_year: None,
            source: Source::Tvmaze,
        }])
        .unwrap();
        RecommendationEngine::fit(table, &FeatureSchema::default()).unwrap()
    }

    #[tokio::test]
    async fn test_empty_slot_is_not_ready() {
        let state = AppState::new(10);
        assert!(matches!(state.engine().await, Err(AppError::NotReady)));
    }

    #[tokio::test]
    async fn test_install_replaces_snapshot() {
        let state = AppState::new(10);
        state.install(fitted_engine()).await;

        let engine = state.engine().await.unwrap();
        assert_eq!(engine.len(), 1);
    }
}
