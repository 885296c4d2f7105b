/// Catalog data provider abstraction
///
/// A pluggable layer over the external TV catalogs (TVMaze, TMDB). Each
/// provider fetches one page of its listing at a time and emits candidate
/// rows for the cleaning pipeline; everything source-specific (auth, paging
/// conventions, genre id resolution) stays behind the trait.
use crate::{error::AppResult, models::CandidateShow};

pub mod tmdb;
pub mod tvmaze;

pub use tmdb::TmdbProvider;
pub use tvmaze::TvMazeProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch one page of the catalog listing
    ///
    /// Page numbering follows the provider's own convention (TVMaze starts
    /// at 0, TMDB at 1); callers pass a zero-based index and providers
    /// translate.
    async fn fetch_page(&self, page: u32) -> AppResult<Vec<CandidateShow>>;

    /// Provider name for logging and the table's source column
    fn name(&self) -> &'static str;
}
