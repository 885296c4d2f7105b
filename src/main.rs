use tracing_subscriber::EnvFilter;

use showrec::{
    config::Config,
    dataset::{FeatureSchema, ShowTable},
    engine::RecommendationEngine,
    routes::create_router,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    // Fit the engine fully before accepting any request; queries only ever
    // see a complete snapshot.
    let table = ShowTable::load(&config.dataset_path)?;
    let engine = RecommendationEngine::fit(table, &FeatureSchema::default())?;

    let state = AppState::new(config.search_limit);
    state.install(engine).await;

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
