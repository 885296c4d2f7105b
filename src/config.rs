use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the processed show table
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// TVMaze API base URL
    #[serde(default = "default_tvmaze_api_url")]
    pub tvmaze_api_url: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDB API key (collection is skipped for TMDB when absent)
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// Number of catalog pages fetched per provider during collection
    #[serde(default = "default_collect_pages")]
    pub collect_pages: u32,

    /// Maximum number of results returned by title search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_dataset_path() -> String {
    "data/processed/shows.json".to_string()
}

fn default_tvmaze_api_url() -> String {
    "https://api.tvmaze.com".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_collect_pages() -> u32 {
    5
}

fn default_search_limit() -> usize {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
