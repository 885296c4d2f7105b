//! Dataset collection run: fetches the TVMaze and TMDB catalogs, cleans and
//! merges them, and writes the processed show table the server loads.
//! Run with: cargo run --bin collect

use tracing_subscriber::EnvFilter;

use showrec::{
    config::Config,
    dataset::FeatureSchema,
    pipeline,
    providers::{CatalogProvider, TmdbProvider, TvMazeProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let mut providers: Vec<Box<dyn CatalogProvider>> =
        vec![Box::new(TvMazeProvider::new(config.tvmaze_api_url.clone()))];

    match &config.tmdb_api_key {
        Some(api_key) => providers.push(Box::new(TmdbProvider::new(
            config.tmdb_api_url.clone(),
            api_key.clone(),
        ))),
        None => tracing::warn!("TMDB_API_KEY not set, collecting from TVMaze only"),
    }

    let schema = FeatureSchema::default();
    let written = pipeline::build_table(
        &providers,
        config.collect_pages,
        &schema,
        &config.dataset_path,
    )
    .await?;

    tracing::info!(
        shows = written,
        path = %config.dataset_path,
        "Collection complete"
    );

    Ok(())
}
