//! Catalog provider abstraction
//!
//! One implementation per upstream catalog: TMDB for movies and TV,
//! Jikan for anime. Each exposes genre-filtered discovery, a trending or
//! top feed, and per-id detail lookup, all normalized to the shared
//! record shapes. The aggregator and routes only see these traits so
//! tests can substitute mocks.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::AppResult,
    models::{MediaDetails, UnifiedRecommendation},
};

pub mod jikan;
pub mod tmdb;

pub use jikan::JikanCatalog;
pub use tmdb::TmdbCatalog;

/// Movie/TV catalog operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MovieTvCatalog: Send + Sync {
    /// Discover movies and TV shows by genre-id lists, one list per media
    /// kind, both queried concurrently. Movies come first in the merged
    /// result. An empty genre list skips that query.
    async fn discover(
        &self,
        movie_genres: &[u32],
        tv_genres: &[u32],
        page: u32,
    ) -> AppResult<Vec<UnifiedRecommendation>>;

    /// One page of trending movies (day window).
    async fn trending_movies(&self, page: u32) -> AppResult<Vec<UnifiedRecommendation>>;

    /// One page of trending TV shows (day window).
    async fn trending_tv(&self, page: u32) -> AppResult<Vec<UnifiedRecommendation>>;

    /// Detail record for one movie.
    async fn movie_details(&self, id: i64) -> AppResult<MediaDetails>;

    /// Detail record for one TV show.
    async fn tv_details(&self, id: i64) -> AppResult<MediaDetails>;
}

/// Anime catalog operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnimeCatalog: Send + Sync {
    /// Anime filtered by MAL genre ids. An empty list yields an empty
    /// result without a request.
    async fn by_genres(&self, genres: &[u32], page: u32) -> AppResult<Vec<UnifiedRecommendation>>;

    /// One page of the top-anime ranking.
    async fn top_page(&self, page: u32) -> AppResult<Vec<UnifiedRecommendation>>;

    /// Detail record for one anime.
    async fn details(&self, id: i64) -> AppResult<MediaDetails>;
}
